//! Age guard extractor - Rejects mutations for users under the minimum age.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{AGE_UNSET, MINIMUM_USER_AGE};
use crate::errors::{AppError, AppResult};
use crate::types::{coerce_number, display_value};

/// Check the `age` field of a request body.
///
/// The body passes when `age` is present and coerces to a number of at least
/// [`MINIMUM_USER_AGE`]. A missing or non-object body counts as an unset age.
pub fn validate_age(body: &Value) -> AppResult<()> {
    let age = body.get("age");
    let allowed = age
        .and_then(coerce_number)
        .is_some_and(|n| n >= f64::from(MINIMUM_USER_AGE));

    if allowed {
        return Ok(());
    }

    let shown = age
        .map(display_value)
        .unwrap_or_else(|| AGE_UNSET.to_string());
    tracing::warn!(age = %shown, "Rejected request below minimum age");

    Err(AppError::bad_request(format!(
        "use age ( {} ) is less that minimum allowed age ( {} )",
        shown, MINIMUM_USER_AGE
    )))
}

/// JSON body extractor that runs [`validate_age`] before deserializing.
///
/// The handler taking this extractor only runs once the guard has passed, so
/// a rejected request never reaches the service layer. An empty body is read
/// as `null` rather than refused, which lets bodiless DELETE requests reach
/// the guard and fail there.
///
/// ```rust,ignore
/// async fn create_user(AgeGuarded(payload): AgeGuarded<UserPayload>) {
///     // payload.age >= 18
/// }
/// ```
pub struct AgeGuarded<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AgeGuarded<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let body = parse_body(&bytes)?;
        validate_age(&body)?;

        let value = serde_json::from_value(body).map_err(|e| AppError::validation(e.to_string()))?;

        Ok(AgeGuarded(value))
    }
}

fn parse_body(bytes: &[u8]) -> AppResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(bytes)
        .map_err(|e| AppError::bad_request(format!("Malformed JSON body: {}", e)))
}
