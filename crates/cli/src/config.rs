use mdip_auth::PasswordConfig;
use mdip_db::DatabaseConfig;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "mdip=info,mdip_db=info,mdip_auth=info";

/// Process configuration loaded from environment variables.
///
/// Storage and hashing settings are read by their own crates' `from_env`;
/// this struct only adds what the binary itself needs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub password: PasswordConfig,
    /// Emit log lines as JSON instead of human-readable text.
    pub log_json: bool,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var      | Default |
    /// |--------------|---------|
    /// | `LOG_FORMAT` | `text`  |
    ///
    /// See [`DatabaseConfig::from_env`] and [`PasswordConfig::from_env`] for
    /// the rest.
    pub fn from_env() -> Self {
        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            database: DatabaseConfig::from_env(),
            password: PasswordConfig::from_env(),
            log_json,
        }
    }
}
