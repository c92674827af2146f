//! Typed values bound to PostgreSQL placeholders.

use chrono::NaiveDate;

/// A value bound to a `$n` placeholder, in placeholder order.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Int(i32),
    BigInt(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

/// Bind every `SqlParam` of a slice onto a `sqlx::query` or `sqlx::query_as` builder.
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for p in $params {
            query = match p {
                $crate::sql::SqlParam::Int(v) => query.bind(*v),
                $crate::sql::SqlParam::BigInt(v) => query.bind(*v),
                $crate::sql::SqlParam::Float(v) => query.bind(*v),
                $crate::sql::SqlParam::Text(v) => query.bind(v.clone()),
                $crate::sql::SqlParam::Date(v) => query.bind(*v),
            };
        }
        query
    }};
}

pub(crate) use bind_params;
