//! Configuration file and environment overrides
//!
//! Looked up in this order, first hit wins:
//! 1. An explicit path (`--config`)
//! 2. `<config dir>/kosh/config.toml`
//! 3. Built-in defaults
//!
//! `KOSH_DB`, `KOSH_HOST` and `KOSH_PORT` then override whatever was loaded.
//!
//! ```toml
//! [database]
//! path = "/var/lib/kosh/kosh.db"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! session_ttl_hours = 12
//! allowed_origins = ["https://kosh.example.com"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const DB_PATH_ENV: &str = "KOSH_DB";
pub const HOST_ENV: &str = "KOSH_HOST";
pub const PORT_ENV: &str = "KOSH_PORT";

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("kosh.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// How long a login session stays valid
    pub session_ttl_hours: i64,
    /// Extra CORS origins on top of localhost
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            session_ttl_hours: 24,
            allowed_origins: Vec::new(),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    database: Option<RawDatabase>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDatabase {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    session_ttl_hours: Option<i64>,
    allowed_origins: Option<Vec<String>>,
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kosh").join("config.toml"))
}

impl Config {
    /// Load from an explicit path or the default location, then apply
    /// environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::parse(&content)
    }

    /// Parse TOML, filling anything missing with defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(database) = raw.database {
            if let Some(path) = database.path {
                config.database.path = path;
            }
        }

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            if let Some(ttl) = server.session_ttl_hours {
                if ttl <= 0 {
                    return Err(Error::Config(
                        "session_ttl_hours must be positive".to_string(),
                    ));
                }
                config.server.session_ttl_hours = ttl;
            }
            if let Some(origins) = server.allowed_origins {
                config.server.allowed_origins = origins;
            }
        }

        Ok(config)
    }

    /// Apply `KOSH_*` overrides from a variable lookup
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = get(DB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(host) = get(HOST_ENV).filter(|v| !v.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = get(PORT_ENV).filter(|v| !v.is_empty()) {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a valid port: {}", PORT_ENV, port)))?;
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.server.session_ttl_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            [server]
            port = 8080
            allowed_origins = ["https://kosh.example.com"]
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.allowed_origins, vec!["https://kosh.example.com"]);
        assert_eq!(config.database.path, PathBuf::from("kosh.db"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::parse("[server]\nport = \"eighty\"").is_err());
        assert!(Config::parse("[server]\nsession_ttl_hours = 0").is_err());
        assert!(Config::parse("[databse]\npath = \"x.db\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (DB_PATH_ENV, "/tmp/other.db"),
            (PORT_ENV, "9000"),
            (HOST_ENV, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");

        let mut config = Config::default();
        let bad_port = config.apply_overrides(|key| (key == PORT_ENV).then(|| "http".to_string()));
        assert!(bad_port.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"budget.db\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("budget.db"));

        assert!(Config::from_file(Path::new("/nonexistent/kosh.toml")).is_err());
    }
}
