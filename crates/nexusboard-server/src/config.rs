//! Server configuration.

/// Server configuration.
pub struct Config {
    /// HTTP server bind address.
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8420".to_string(),
        }
    }
}

impl Config {
    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("NEXUSBOARD_BIND_ADDR") {
            config.bind_addr = addr;
        }
        config
    }
}
