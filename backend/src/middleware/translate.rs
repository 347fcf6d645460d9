//! Terminal response translator.
//!
//! Every error surfaced from routing, extraction, validation, or a handler
//! crosses this middleware exactly once and leaves as the uniform JSON
//! envelope. The runtime mode is injected at construction, so whether a
//! diagnostic trace is exposed is decided here and nowhere else — in
//! production mode no trace ever leaves the process.

use std::backtrace::Backtrace;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::HttpResponse;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::config::RuntimeMode;
use crate::domain::{Error, ErrorKind};
use crate::inbound::http::error::{ErrorBody, FALLBACK_TITLE, render};

/// Middleware factory converting raised errors into JSON responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::config::RuntimeMode;
/// use backend::middleware::Translate;
///
/// let app = App::new().wrap(Translate::new(RuntimeMode::Production));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Translate {
    mode: RuntimeMode,
}

impl Translate {
    /// Build a translator for the given runtime mode.
    pub const fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Translate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = TranslateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TranslateMiddleware {
            service,
            mode: self.mode,
        }))
    }
}

/// Service wrapper produced by [`Translate`].
pub struct TranslateMiddleware<S> {
    service: S,
    mode: RuntimeMode,
}

impl<S, B> Service<ServiceRequest> for TranslateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mode = self.mode;
        let (request, payload) = req.into_parts();
        let fut = self
            .service
            .call(ServiceRequest::from_parts(request.clone(), payload));
        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(res.map_into_left_body()),
                Err(err) => {
                    let response = error_response(&err, mode);
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                }
            }
        })
    }
}

/// Render any raised error as the JSON envelope.
///
/// Domain errors carry their own kind, title, and trace. Foreign errors
/// (extractor failures, framework errors) keep the status they report and
/// fall back to the generic title; their message is whatever they display.
fn error_response(err: &actix_web::Error, mode: RuntimeMode) -> HttpResponse {
    if let Some(error) = err.as_error::<Error>() {
        if error.kind() == ErrorKind::Internal {
            error!(message = error.message(), "request failed");
        }
        return render(error, mode);
    }

    let status = err.as_response_error().status_code();
    if status.is_server_error() {
        error!(error = %err, "unhandled error reached the translator");
    }
    let stack = if mode.is_production() {
        None
    } else {
        Some(Backtrace::force_capture().to_string())
    };
    HttpResponse::build(status).json(ErrorBody {
        title: FALLBACK_TITLE.to_owned(),
        message: err.to_string(),
        errors: None,
        stack,
    })
}
