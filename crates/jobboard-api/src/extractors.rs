//! Custom Axum Extractors
//!
//! Body extraction with validation. Public endpoints validate while
//! extracting; role-gated endpoints take the raw body and call
//! [`validated`] once the caller's role has been checked.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, Path, Request,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// JSON extractor with validation
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + RequestBody,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Json::<T>::from_request(req, state).await;
        validated(body).map(ValidatedJson).map_err(error_response)
    }
}

/// A request body with declarative rules plus checks `validator` cannot express
pub trait RequestBody: Validate {
    /// Extra checks run after the declarative rules pass
    fn check(&self) -> ApiResult<()> {
        Ok(())
    }
}

/// Unwrap a deferred JSON body and run its validation rules
pub fn validated<T: RequestBody>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let Json(value) = body?;
    value.validate()?;
    value.check()?;
    Ok(value)
}

/// Unwrap a deferred path parameter
pub fn path_param<T>(path: Result<Path<T>, PathRejection>) -> ApiResult<T> {
    let Path(value) = path?;
    Ok(value)
}

/// Reject values that are empty or whitespace only
pub fn require_not_blank(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::ValidationError(format!("{} must not be blank", field)))
    } else {
        Ok(())
    }
}

/// Create error response from ApiError
pub fn error_response(error: ApiError) -> Response {
    error.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "name should be at least 2 characters long"))]
        name: String,
    }

    impl RequestBody for Sample {
        fn check(&self) -> ApiResult<()> {
            require_not_blank("name", &self.name)
        }
    }

    #[test]
    fn test_validated_accepts_valid_body() {
        let sample = validated(Ok(Json(Sample { name: "ok".into() }))).unwrap();
        assert_eq!(sample.name, "ok");
    }

    #[test]
    fn test_validated_rejects_rule_violation() {
        let err = validated(Ok(Json(Sample { name: "x".into() }))).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(ref m) if m.contains("at least 2")));
    }

    #[test]
    fn test_validated_runs_extra_checks() {
        let err = validated(Ok(Json(Sample { name: "   ".into() }))).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(ref m) if m == "name must not be blank"));
    }

    #[test]
    fn test_require_not_blank() {
        assert!(require_not_blank("title", "Engineer").is_ok());
        assert!(require_not_blank("title", "   ").is_err());
        assert!(require_not_blank("title", "").is_err());
    }
}
