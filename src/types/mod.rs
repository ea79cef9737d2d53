//! Shared types used across layers.

mod number;
mod pagination;

pub use number::{coerce_number, coerce_str, deserialize_whole_number, display_value};
pub use pagination::{normalize_params, PaginationParams, MAX_WINDOW};
