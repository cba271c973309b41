// Configuration module entry point
// Loads layered configuration and owns the shared application state

mod state;
mod types;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Default config file (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the optional file,
    /// then `TODO_` environment variables (`TODO_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("TODO")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, without any file or environment layer
    #[cfg(test)]
    pub fn built_in() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "todo-server")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576) // 1MB
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_defaults() {
        let cfg = Config::built_in().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.performance.read_timeout, 30);
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert!(cfg.http.route_prefix.is_none());
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::built_in().unwrap();
        cfg.server.host = "0.0.0.0".to_string();
        cfg.server.port = 9000;
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 9000);

        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("todo-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("override.toml");
        std::fs::write(&file, "[http]\nroute_prefix = \"/api\"\n").unwrap();

        let base = dir.join("override");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.http.route_prefix.as_deref(), Some("/api"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
