//! User API - CRUD service for user records
//!
//! Lists, creates, replaces and deletes users stored through SeaORM, plus a
//! derived full-name listing. Every mutation is guarded by a minimum-age
//! check that runs before the request reaches the service layer.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve` and `migrate` subcommands
//! - **config**: Environment configuration and constants
//! - **domain**: User entity and request/response types
//! - **services**: User use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: Handlers, the age guard extractor and routes
//! - **types**: Pagination and numeric coercion
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! cargo run -- serve --port 3000
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{DeleteResult, FullName, User, UserPayload};
pub use errors::{AppError, AppResult};
