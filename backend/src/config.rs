//! Server configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4000";
const PRODUCTION_ENVIRONMENT: &str = "production";

/// Runtime mode controlling how much diagnostic detail leaves the process.
///
/// Resolved once at startup and passed explicitly to the response
/// translator; nothing reads ambient process state after boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    /// Error responses include the captured diagnostic trace.
    Development,
    /// Error responses never expose internal detail.
    Production,
}

impl RuntimeMode {
    /// Whether diagnostic detail must be withheld.
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Configuration values controlling the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TWEETS")]
pub struct ServerSettings {
    /// Interface the HTTP server binds to.
    pub bind_address: Option<String>,
    /// TCP port the HTTP server listens on.
    pub port: Option<u16>,
    /// PostgreSQL connection string. When unset the service runs on the
    /// in-memory fixture store, which is only suitable for development.
    pub database_url: Option<String>,
    /// Runtime environment name; `production` suppresses diagnostic detail
    /// in error responses.
    pub environment: Option<String>,
    /// Origin allowed to make cross-site requests.
    pub cors_origin: Option<String>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured CORS origin, falling back to the default.
    pub fn cors_origin(&self) -> &str {
        self.cors_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    /// Resolve the runtime mode from the environment name.
    pub fn runtime_mode(&self) -> RuntimeMode {
        if self.environment.as_deref() == Some(PRODUCTION_ENVIRONMENT) {
            RuntimeMode::Production
        } else {
            RuntimeMode::Development
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("TWEETS_BIND_ADDRESS", None::<String>),
            ("TWEETS_PORT", None::<String>),
            ("TWEETS_DATABASE_URL", None::<String>),
            ("TWEETS_ENVIRONMENT", None::<String>),
            ("TWEETS_CORS_ORIGIN", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.cors_origin(), DEFAULT_CORS_ORIGIN);
        assert!(settings.database_url.is_none());
        assert_eq!(settings.runtime_mode(), RuntimeMode::Development);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TWEETS_BIND_ADDRESS", Some("127.0.0.1".to_owned())),
            ("TWEETS_PORT", Some("9090".to_owned())),
            (
                "TWEETS_DATABASE_URL",
                Some("postgres://localhost/tweets".to_owned()),
            ),
            ("TWEETS_ENVIRONMENT", Some("production".to_owned())),
            (
                "TWEETS_CORS_ORIGIN",
                Some("http://localhost:5173".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), "127.0.0.1");
        assert_eq!(settings.port(), 9090);
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/tweets")
        );
        assert_eq!(settings.cors_origin(), "http://localhost:5173");
        assert_eq!(settings.runtime_mode(), RuntimeMode::Production);
    }

    #[rstest]
    #[case(None, RuntimeMode::Development)]
    #[case(Some("development"), RuntimeMode::Development)]
    #[case(Some("staging"), RuntimeMode::Development)]
    #[case(Some("production"), RuntimeMode::Production)]
    fn runtime_mode_requires_exact_production_name(
        #[case] environment: Option<&str>,
        #[case] expected: RuntimeMode,
    ) {
        let _guard = lock_env([("TWEETS_ENVIRONMENT", environment.map(ToOwned::to_owned))]);
        let settings = load_from_empty_args();
        assert_eq!(settings.runtime_mode(), expected);
        assert_eq!(
            settings.runtime_mode().is_production(),
            expected == RuntimeMode::Production
        );
    }
}
