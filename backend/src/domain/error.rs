//! Domain-level operational errors.
//!
//! These values are transport agnostic. The HTTP adapter maps each kind to a
//! status code and the terminal translator renders the JSON envelope, so no
//! handler ever formats an error response itself.

use std::backtrace::Backtrace;
use std::fmt;

use super::ports::TweetPersistenceError;

/// Failure category of an [`Error`].
///
/// The category is the single source of truth for the HTTP status: the
/// inbound adapter maps it with a total function rather than storing a raw
/// integer on the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request body failed one or more validation rules.
    Validation,
    /// A lookup by identifier matched no record.
    NotFound,
    /// The request matched no route at all.
    RouteNotFound,
    /// An unexpected failure in the store or the framework.
    Internal,
}

/// Operational error raised at the point a business rule fails.
///
/// Constructed through the per-kind factory functions, propagated to the
/// terminal translator, then discarded. The diagnostic trace is captured at
/// the construction site; whether it is exposed is decided by the translator
/// alone.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    title: Option<String>,
    message: String,
    field_errors: Vec<String>,
    trace: Option<String>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            message: message.into(),
            field_errors: Vec::new(),
            trace: Some(Backtrace::force_capture().to_string()),
        }
    }

    /// A 400-class error aggregating every violated validation rule.
    ///
    /// The violation list keeps the order in which the rules were declared.
    pub fn validation(field_errors: Vec<String>) -> Self {
        let mut error = Self::new(ErrorKind::Validation, "Bad request.");
        error.title = Some("Bad request.".to_owned());
        error.field_errors = field_errors;
        error
    }

    /// A lookup by identifier that matched no record.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// A request that matched no route.
    pub fn route_not_found() -> Self {
        Self::new(
            ErrorKind::RouteNotFound,
            "The requested resource couldn't be found.",
        )
    }

    /// An unexpected store or framework failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach a human-readable title.
    ///
    /// Untitled errors fall back to the adapter's generic title when
    /// rendered.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Failure category.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Title, when one was attached at the failure site.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Ordered validation violation messages; empty for non-validation kinds.
    pub fn field_errors(&self) -> &[String] {
        self.field_errors.as_slice()
    }

    /// Diagnostic trace captured at the construction site.
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<TweetPersistenceError> for Error {
    fn from(err: TweetPersistenceError) -> Self {
        Self::internal(err.to_string())
    }
}
