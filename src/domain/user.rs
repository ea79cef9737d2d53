//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::deserialize_whole_number;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Database-assigned identifier
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Ann")]
    pub first_name: String,
    #[schema(example = "Smith")]
    pub last_name: String,
    #[schema(example = 25)]
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First and last name joined by a single space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of create and update requests.
///
/// Only `age` is required; missing names are stored empty. Update replaces
/// every field with what the body carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    /// Also accepted as `name`
    #[serde(default, alias = "name")]
    #[schema(example = "Ann")]
    pub first_name: String,
    #[serde(default)]
    #[schema(example = "Smith")]
    pub last_name: String,
    /// Whole number, at least 18. Numeric strings are accepted.
    #[serde(deserialize_with = "deserialize_whole_number")]
    #[schema(example = 25, minimum = 18)]
    pub age: i32,
}

/// Derived full-name listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FullName {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Ann Smith")]
    pub full_name: String,
}

impl From<&User> for FullName {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
        }
    }
}

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResult {
    /// Rows removed; `0` when the id did not exist
    #[schema(example = 1)]
    pub affected: u64,
}
