//! API server configuration.
//!
//! Layered with the `config` crate, later sources win:
//!
//! ```text
//!   built-in defaults
//!     └── quotedesk.toml (optional, working directory)
//!           └── QUOTEDESK_* environment variables
//! ```
//!
//! | Key               | Env var                      | Default                       |
//! |-------------------|------------------------------|-------------------------------|
//! | `bind_addr`       | `QUOTEDESK_BIND_ADDR`        | `127.0.0.1:8080`              |
//! | `database_path`   | `QUOTEDESK_DATABASE_PATH`    | `<data dir>/quotedesk.db`     |
//! | `max_connections` | `QUOTEDESK_MAX_CONNECTIONS`  | `5`                           |
//! | `log_filter`      | `QUOTEDESK_LOG_FILTER`       | unset (`RUST_LOG` or default) |

use directories::ProjectDirs;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Base name of the optional config file (`quotedesk.toml`).
pub const CONFIG_FILE: &str = "quotedesk";

const ENV_PREFIX: &str = "QUOTEDESK";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: i64 = 5;

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size handed to `DbConfig`
    pub max_connections: u32,

    /// tracing `EnvFilter` directive, overrides the built-in default
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl ApiConfig {
    /// Loads configuration from defaults, `quotedesk.toml`, and the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Like [`ApiConfig::load`] with an explicit config file. The file is
    /// optional; its extension may be omitted.
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default(
                "database_path",
                default_database_path().to_string_lossy().into_owned(),
            )?
            .set_default("max_connections", DEFAULT_MAX_CONNECTIONS)?
            .add_source(::config::File::from(file).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("database_path".to_string()));
        }

        Ok(())
    }
}

/// Platform data directory, e.g. `~/.local/share/quotedesk/quotedesk.db`.
///
/// Falls back to the working directory when no home directory is known.
pub fn default_database_path() -> PathBuf {
    match ProjectDirs::from("com", "quotedesk", "quotedesk") {
        Some(dirs) => dirs.data_dir().join("quotedesk.db"),
        None => PathBuf::from("quotedesk.db"),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "quotedesk-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ApiConfig::load_from(Path::new("/nonexistent/quotedesk")).unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.max_connections, 5);
        assert!(config.database_path.ends_with("quotedesk.db"));
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_config(
            "override",
            r#"
            bind_addr = "0.0.0.0:9000"
            database_path = "/tmp/quotes.db"
            max_connections = 2
            log_filter = "debug"
            "#,
        );

        let config = ApiConfig::load_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/quotes.db"));
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_zero_connections_rejected() {
        let path = temp_config("zero", "max_connections = 0\n");

        let result = ApiConfig::load_from(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::InvalidValue(ref key)) if key == "max_connections"));
    }

    #[test]
    fn test_bad_bind_addr_rejected() {
        let path = temp_config("addr", "bind_addr = \"not-an-address\"\n");

        let result = ApiConfig::load_from(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
