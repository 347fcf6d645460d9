//! Actix middleware: request logging and the terminal error translator.

pub mod request_log;
pub mod translate;

pub use request_log::RequestLog;
pub use translate::Translate;
