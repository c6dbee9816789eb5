/// Argon2id cost parameters loaded from environment variables.
///
/// The defaults follow the OWASP minimum for Argon2id (19 MiB, 2 passes,
/// 1 lane). Hashes embed their own parameters, so changing these only
/// affects newly hashed passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

/// Default memory cost in KiB.
pub const DEFAULT_MEMORY_KIB: u32 = 19_456;
/// Default number of passes.
pub const DEFAULT_ITERATIONS: u32 = 2;
/// Default lane count.
pub const DEFAULT_PARALLELISM: u32 = 1;

impl PasswordConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default |
    /// |-----------------------|---------|
    /// | `ARGON2_MEMORY_KIB`   | `19456` |
    /// | `ARGON2_ITERATIONS`   | `2`     |
    /// | `ARGON2_PARALLELISM`  | `1`     |
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            memory_kib: env_u32("ARGON2_MEMORY_KIB", DEFAULT_MEMORY_KIB),
            iterations: env_u32("ARGON2_ITERATIONS", DEFAULT_ITERATIONS),
            parallelism: env_u32("ARGON2_PARALLELISM", DEFAULT_PARALLELISM),
        }
    }

    /// The cheapest parameters Argon2 accepts. For tests only.
    pub fn insecure_fast() -> Self {
        Self {
            memory_kib: argon2::Params::MIN_M_COST,
            iterations: argon2::Params::MIN_T_COST,
            parallelism: argon2::Params::MIN_P_COST,
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_MEMORY_KIB,
            iterations: DEFAULT_ITERATIONS,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "Ignoring invalid value");
            default
        }),
        Err(_) => default,
    }
}
