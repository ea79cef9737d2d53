//! Custom request extractors.

mod age_guarded;

pub use age_guarded::{validate_age, AgeGuarded};
