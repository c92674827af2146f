//! Park API: REST backend for US national and state park records.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Park, ParkFilter, ParkInput};
pub use routes::{app, common_routes, park_routes};
pub use service::ParkService;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryParkStore, ParkStore, PgParkStore};
