//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the `parks` table.

use crate::model::{Park, ParkFilter, ParkInput};
use crate::sql::SqlParam;

pub const PARKS_TABLE: &str = "parks";

/// Writable columns in insert/update order.
const DATA_COLUMNS: &[&str] = &[
    "name",
    "category",
    "state",
    "longitude",
    "latitude",
    "area",
    "visitors",
    "est_date",
];

/// Quote identifier for PostgreSQL (identifiers are compile-time constants).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    fn push_data(&mut self, input: &ParkInput) -> Vec<String> {
        let values = [
            SqlParam::Text(input.name.clone()),
            SqlParam::Text(input.category.clone()),
            SqlParam::Text(input.state.clone()),
            SqlParam::Float(input.longitude),
            SqlParam::Float(input.latitude),
            SqlParam::Float(input.area),
            SqlParam::Int(input.visitors),
            SqlParam::Date(input.est_date),
        ];
        values.into_iter().map(|v| format!("${}", self.push_param(v))).collect()
    }
}

fn table() -> String {
    quoted(PARKS_TABLE)
}

/// Every column of a `Park`, in struct order.
pub fn select_column_list() -> String {
    std::iter::once("id")
        .chain(DATA_COLUMNS.iter().copied())
        .chain(std::iter::once("version"))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT with optional substring filters (literal, case-sensitive), ORDER BY id.
pub fn select_list(filter: &ParkFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, needle) in [("name", &filter.name), ("category", &filter.category), ("state", &filter.state)] {
        if let Some(needle) = needle {
            let n = q.push_param(SqlParam::Text(needle.clone()));
            where_parts.push(format!("strpos({}, ${}) > 0", quoted(col), n));
        }
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(),
        table(),
        where_clause,
        quoted("id")
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!("SELECT {} FROM {} WHERE {} = ${}", select_column_list(), table(), quoted("id"), n);
    q
}

/// SELECT the concurrency token of one row.
pub fn select_version(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!("SELECT {} FROM {} WHERE {} = ${}", quoted("version"), table(), quoted("id"), n);
    q
}

pub fn select_exists(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ${})", table(), quoted("id"), n);
    q
}

/// INSERT with a store-generated id. Any id or version on the input is ignored.
pub fn insert(input: &ParkInput) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders = q.push_data(input);
    let cols: Vec<String> = DATA_COLUMNS.iter().map(|c| quoted(c)).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table(),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list()
    );
    q
}

/// INSERT with an explicit id and version, used for seed rows.
pub fn insert_with_id(park: &Park) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id_ph = format!("${}", q.push_param(SqlParam::Int(park.id)));
    let input = ParkInput {
        id: Some(park.id),
        name: park.name.clone(),
        category: park.category.clone(),
        state: park.state.clone(),
        longitude: park.longitude,
        latitude: park.latitude,
        area: park.area,
        visitors: park.visitors,
        est_date: park.est_date,
        version: Some(park.version),
    };
    let mut placeholders = vec![id_ph];
    placeholders.extend(q.push_data(&input));
    placeholders.push(format!("${}", q.push_param(SqlParam::BigInt(park.version))));
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table(),
        select_column_list(),
        placeholders.join(", ")
    );
    q
}

/// Conditional whole-row UPDATE: matches only when the stored version equals `expected_version`.
pub fn update(id: i32, input: &ParkInput, expected_version: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders = q.push_data(input);
    let mut sets: Vec<String> = DATA_COLUMNS
        .iter()
        .zip(placeholders)
        .map(|(c, ph)| format!("{} = {}", quoted(c), ph))
        .collect();
    sets.push(format!("{0} = {0} + 1", quoted("version")));
    let id_param = q.push_param(SqlParam::Int(id));
    let version_param = q.push_param(SqlParam::BigInt(expected_version));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} AND {} = ${}",
        table(),
        sets.join(", "),
        quoted("id"),
        id_param,
        quoted("version"),
        version_param
    );
    q
}

/// DELETE by id.
pub fn delete(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", table(), quoted("id"), n);
    q
}
