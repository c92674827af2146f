//! Park record, its input payload, and listing filter.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A row of the `parks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub state: String,
    pub longitude: f64,
    pub latitude: f64,
    pub area: f64,
    pub visitors: i32,
    #[schema(value_type = String, format = Date)]
    pub est_date: NaiveDate,
    /// Concurrency token, incremented on every write.
    pub version: i64,
}

impl Park {
    pub fn from_input(id: i32, version: i64, input: &ParkInput) -> Self {
        Park {
            id,
            name: input.name.clone(),
            category: input.category.clone(),
            state: input.state.clone(),
            longitude: input.longitude,
            latitude: input.latitude,
            area: input.area,
            visitors: input.visitors,
            est_date: input.est_date,
            version,
        }
    }
}

/// Request body for create, replace and patch. Validated before deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParkInput {
    /// Ignored on create; must equal the path id on replace.
    #[serde(default, alias = "parkId")]
    pub id: Option<i32>,
    pub name: String,
    pub category: String,
    pub state: String,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub visitors: i32,
    #[serde(deserialize_with = "deserialize_est_date")]
    #[schema(value_type = String, format = Date)]
    pub est_date: NaiveDate,
    /// Expected concurrency token on replace. When absent the stored token is used.
    #[serde(default)]
    pub version: Option<i64>,
}

/// Substring filters for listing. Absent filters match everything.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParkFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub state: Option<String>,
}

impl ParkFilter {
    pub fn matches(&self, park: &Park) -> bool {
        fn contains(field: &str, needle: &Option<String>) -> bool {
            needle.as_deref().map_or(true, |n| field.contains(n))
        }
        contains(&park.name, &self.name)
            && contains(&park.category, &self.category)
            && contains(&park.state, &self.state)
    }
}

/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS[.f]` or RFC 3339; the time part is dropped.
pub fn parse_est_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

fn deserialize_est_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_est_date(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s)))
}
