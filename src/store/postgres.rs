//! PostgreSQL-backed `ParkStore`.

use super::ParkStore;
use crate::error::{AppError, ConfigError};
use crate::model::{Park, ParkFilter, ParkInput};
use crate::sql::{self, bind_params};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgParkStore {
    pool: PgPool,
}

impl PgParkStore {
    pub fn new(pool: PgPool) -> Self {
        PgParkStore { pool }
    }
}

#[async_trait]
impl ParkStore for PgParkStore {
    async fn list(&self, filter: &ParkFilter) -> Result<Vec<Park>, AppError> {
        let q = sql::select_list(filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params!(sqlx::query_as::<_, Park>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Park>, AppError> {
        let q = sql::select_by_id(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params!(sqlx::query_as::<_, Park>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, input: &ParkInput) -> Result<Park, AppError> {
        let q = sql::insert(input);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params!(sqlx::query_as::<_, Park>(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn current_version(&self, id: i32) -> Result<Option<i64>, AppError> {
        let q = sql::select_version(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let version = bind_params!(sqlx::query_scalar::<_, i64>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(version)
    }

    async fn update(&self, id: i32, input: &ParkInput, expected_version: i64) -> Result<bool, AppError> {
        let q = sql::update(id, input, expected_version);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let result = bind_params!(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let q = sql::delete(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let result = bind_params!(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let q = sql::select_exists(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let exists = bind_params!(sqlx::query_scalar::<_, bool>(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Connect to the server's `postgres` database and create the target database when missing.
/// URLs that name no database, or name `postgres` itself, are left alone.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = bootstrap_target(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Admin connection options plus the database to create, or `None` when there is nothing to create.
fn bootstrap_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        value: e.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
