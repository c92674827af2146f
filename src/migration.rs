//! Versioned schema migrations for the `parks` table.
//! Applied migrations are recorded in `_park_migrations`; each pending one runs in its own transaction.

use crate::error::AppError;
use crate::seed::seed_parks;
use crate::sql::{self, bind_params};
use sqlx::{PgConnection, PgPool};

pub const MIGRATIONS_TABLE: &str = "_park_migrations";

pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub statements: &'static [&'static str],
    /// Insert the seed rows after `statements`.
    pub seed: bool,
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    statements: &[r#"
        CREATE TABLE "parks" (
            "id" INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            "name" TEXT NOT NULL,
            "category" TEXT NOT NULL,
            "state" TEXT NOT NULL,
            "longitude" DOUBLE PRECISION NOT NULL,
            "latitude" DOUBLE PRECISION NOT NULL,
            "area" DOUBLE PRECISION NOT NULL,
            "visitors" INTEGER NOT NULL,
            "est_date" DATE NOT NULL,
            "version" BIGINT NOT NULL DEFAULT 1
        )
        "#],
    seed: true,
}];

/// Create the ledger table, then apply every migration not yet recorded. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let ledger_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            version BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        MIGRATIONS_TABLE
    );
    sqlx::query(&ledger_ddl).execute(pool).await?;

    let applied: Vec<i64> = sqlx::query_scalar(&format!("SELECT version FROM {}", MIGRATIONS_TABLE))
        .fetch_all(pool)
        .await?;

    for m in pending(MIGRATIONS, &applied) {
        let mut tx = pool.begin().await?;
        for stmt in m.statements {
            sqlx::query(stmt).execute(&mut *tx).await?;
        }
        if m.seed {
            insert_seed_rows(&mut tx).await?;
        }
        sqlx::query(&format!("INSERT INTO {} (version, name) VALUES ($1, $2)", MIGRATIONS_TABLE))
            .bind(m.version)
            .bind(m.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(version = m.version, name = m.name, "migration applied");
    }
    Ok(())
}

fn pending<'a>(migrations: &'a [Migration], applied: &[i64]) -> impl Iterator<Item = &'a Migration> {
    let applied = applied.to_vec();
    migrations.iter().filter(move |m| !applied.contains(&m.version))
}

/// Insert seed rows with their fixed ids, then move the identity past the highest one.
async fn insert_seed_rows(conn: &mut PgConnection) -> Result<(), AppError> {
    for park in seed_parks() {
        let q = sql::insert_with_id(&park);
        tracing::debug!(sql = %q.sql, params = ?q.params, "seed");
        bind_params!(sqlx::query(&q.sql), &q.params).execute(&mut *conn).await?;
    }
    let reset = format!(
        "SELECT setval(pg_get_serial_sequence('\"{0}\"', 'id'), (SELECT MAX(\"id\") FROM \"{0}\"))",
        sql::PARKS_TABLE
    );
    sqlx::query(&reset).execute(&mut *conn).await?;
    Ok(())
}
