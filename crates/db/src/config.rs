/// Default database location, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://intelligence_platform.db";

/// Storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://data/platform.db` or `sqlite::memory:`.
    pub url: String,
    /// Create the database file when it does not exist yet.
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                              |
    /// |------------------------------|--------------------------------------|
    /// | `DATABASE_URL`               | `sqlite://intelligence_platform.db`  |
    /// | `DATABASE_CREATE_IF_MISSING` | `true`                               |
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());

        let create_if_missing = std::env::var("DATABASE_CREATE_IF_MISSING")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            url,
            create_if_missing,
        }
    }

    /// An in-memory database. Its contents live only as long as the
    /// gateway's connection stays open.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            create_if_missing: true,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.into(),
            create_if_missing: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
