//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving every
//! endpoint the same JSON error envelope and status mapping. The terminal
//! rendering with an explicit [`RuntimeMode`] lives in
//! [`crate::middleware::Translate`]; this module owns the wire shape.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::RuntimeMode;
use crate::domain::{Error, ErrorKind};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Title applied to errors whose failure site attached none.
pub(crate) const FALLBACK_TITLE: &str = "Server Error";

/// Map an error kind to its HTTP status.
pub(crate) const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound | ErrorKind::RouteNotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error envelope returned by every failure path.
///
/// `errors` is omitted entirely when no field errors exist; `stack` is
/// always present and `null` in production mode.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Short failure category shown to users.
    #[schema(example = "Bad request.")]
    pub title: String,
    /// Human-readable description of the failure.
    #[schema(example = "Bad request.")]
    pub message: String,
    /// Ordered validation violation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Diagnostic trace; `null` in production mode.
    pub stack: Option<String>,
}

impl ErrorBody {
    /// Build the wire envelope for a domain error under the given mode.
    pub fn from_error(error: &Error, mode: RuntimeMode) -> Self {
        let errors = if error.field_errors().is_empty() {
            None
        } else {
            Some(error.field_errors().to_vec())
        };
        let stack = if mode.is_production() {
            None
        } else {
            error.trace().map(ToOwned::to_owned)
        };
        Self {
            title: error.title().unwrap_or(FALLBACK_TITLE).to_owned(),
            message: error.message().to_owned(),
            errors,
            stack,
        }
    }
}

/// Render a domain error as a complete HTTP response.
pub fn render(error: &Error, mode: RuntimeMode) -> HttpResponse {
    HttpResponse::build(status_for(error.kind())).json(ErrorBody::from_error(error, mode))
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        // Without an explicit mode the conservative choice is to withhold
        // the trace; the translator re-renders with the configured mode.
        render(self, RuntimeMode::Production)
    }
}

/// Catch-all handler for requests matching no route.
pub async fn fallback() -> ApiResult<HttpResponse> {
    Err(Error::route_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(ErrorKind::Validation, StatusCode::BAD_REQUEST)]
    #[case(ErrorKind::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorKind::RouteNotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_mapping_is_total(#[case] kind: ErrorKind, #[case] status: StatusCode) {
        assert_eq!(status_for(kind), status);
    }

    #[rstest]
    fn untitled_errors_fall_back_to_server_error() {
        let body = ErrorBody::from_error(&Error::route_not_found(), RuntimeMode::Production);
        assert_eq!(body.title, FALLBACK_TITLE);
        assert_eq!(body.message, "The requested resource couldn't be found.");
    }

    #[rstest]
    fn errors_key_is_omitted_when_no_field_errors() {
        let body = ErrorBody::from_error(&Error::not_found("gone"), RuntimeMode::Production);
        let json = serde_json::to_value(&body).expect("serialize body");
        assert!(json.get("errors").is_none());
        assert_eq!(json.get("stack"), Some(&Value::Null));
    }

    #[rstest]
    fn validation_body_lists_every_violation() {
        let error = Error::validation(vec!["first".to_owned(), "second".to_owned()]);
        let body = ErrorBody::from_error(&error, RuntimeMode::Production);
        let json = serde_json::to_value(&body).expect("serialize body");
        assert_eq!(
            json.get("errors"),
            Some(&json!(["first", "second"])),
            "violations must keep declaration order"
        );
    }

    #[rstest]
    fn stack_is_withheld_in_production_only() {
        let error = Error::internal("boom");
        let production = ErrorBody::from_error(&error, RuntimeMode::Production);
        assert!(production.stack.is_none());

        let development = ErrorBody::from_error(&error, RuntimeMode::Development);
        assert!(development.stack.is_some_and(|stack| !stack.is_empty()));
    }

    #[rstest]
    fn response_error_defaults_to_production_rendering() {
        let error = Error::internal("boom");
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
