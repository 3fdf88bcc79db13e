//! Books API: a CRUD service over SQLite whose SQL is derived from record descriptors.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;

pub use config::AppConfig;
pub use database::{connect, connect_in_memory, register_tables};
pub use error::{AppError, ConfigError};
pub use model::Book;
pub use routes::{book_routes, ready_routes};
pub use schema::{Descriptor, Record};
pub use service::RecordStore;
pub use state::AppState;

use axum::Router;

/// The full application router: readiness plus the book routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(ready_routes(state.clone()))
        .merge(book_routes(state))
}
