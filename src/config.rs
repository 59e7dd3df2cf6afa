use std::env;

/// AppConfig
///
/// The crate's runtime configuration. Immutable once loaded, so it can be
/// shared by value across the engine and the field-values provider without
/// coordination.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Endpoint of the remote field-values service (GET, JSON object of
    /// optional value-list keys). The single network read this crate makes.
    pub field_values_url: String,
    /// Runtime environment marker. Controls how strictly `load` treats
    /// missing variables.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to decide between developer-friendly
/// fallbacks and fail-fast production loading.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup, without requiring any environment variables.
    fn default() -> Self {
        Self {
            field_values_url: "http://localhost:8000/field-values".to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical startup initializer. Reads configuration from
    /// environment variables and fails fast where a production deployment
    /// would otherwise run half-configured.
    ///
    /// # Panics
    /// Panics when `FIELD_VALUES_URL` is unset in the Production environment.
    /// A production portal silently falling back to a localhost endpoint
    /// would keep serving compiled-in defaults forever.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let field_values_url = match env {
            Env::Production => env::var("FIELD_VALUES_URL")
                .expect("FATAL: FIELD_VALUES_URL must be set in production."),
            // Local development defaults to the dockerized backend port.
            Env::Local => env::var("FIELD_VALUES_URL")
                .unwrap_or_else(|_| "http://localhost:8000/field-values".to_string()),
        };

        Self {
            field_values_url,
            env,
        }
    }
}
