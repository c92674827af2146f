//! ParkService over the store seam, plus rule-driven request validation.

mod parks;
mod validation;
pub use parks::ParkService;
pub use validation::{FieldKind, RequestValidator, ValidationErrors, ValidationRule, PARK_RULES};
