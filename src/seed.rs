//! Rows inserted by the initial migration.

use crate::model::Park;
use chrono::NaiveDate;

#[allow(clippy::too_many_arguments)]
fn row(
    id: i32,
    name: &str,
    category: &str,
    state: &str,
    (longitude, latitude): (f64, f64),
    area: f64,
    visitors: i32,
    (y, m, d): (i32, u32, u32),
) -> Park {
    Park {
        id,
        name: name.to_string(),
        category: category.to_string(),
        state: state.to_string(),
        longitude,
        latitude,
        area,
        visitors,
        est_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        version: 1,
    }
}

pub fn seed_parks() -> Vec<Park> {
    vec![
        row(1, "Grand Canyon", "National", "Arizona", (-112.14, 36.06), 4926.0, 2_897_098, (1919, 2, 26)),
        row(2, "Silver Falls", "State", "Oregon", (-122.36, 44.86), 36.0, 1_100_000, (1933, 7, 23)),
        row(3, "Everglades", "National", "Florida", (-80.93, 25.32), 6106.0, 702_319, (1934, 5, 30)),
        row(4, "Painted Hills", "State", "Oregon", (-120.27, 44.66), 13.0, 74_873, (1919, 2, 26)),
        row(5, "Yosemite", "National", "California", (-119.50, 37.83), 3083.0, 2_268_313, (1975, 10, 8)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{RequestValidator, PARK_RULES};

    #[test]
    fn seed_ids_are_unique_and_ascending() {
        let ids: Vec<i32> = seed_parks().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn seed_rows_pass_validation() {
        for park in seed_parks() {
            let value = serde_json::to_value(&park).unwrap();
            let body = value.as_object().unwrap();
            assert!(RequestValidator::validate(body, PARK_RULES).is_ok(), "{}", park.name);
        }
    }
}
