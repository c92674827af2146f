//! HTTP handlers for park CRUD.

pub mod parks;
pub use parks::*;
