//! Node configuration types.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Configuration for the Wharf node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// API listen address.
    pub listen: SocketAddr,
    /// Log level.
    pub log_level: String,
    /// Seed a demo repository on startup.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ([127, 0, 0, 1], wharf_api::DEFAULT_API_PORT).into(),
            log_level: "info".to_string(),
            seed_demo: false,
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file, falling back to defaults
    /// when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/wharf.yaml")).unwrap();
        assert_eq!(config.log_level, "info");
        assert!(!config.seed_demo);
    }

    #[test]
    fn yaml_file_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen: 0.0.0.0:9999").unwrap();
        writeln!(file, "log_level: debug").unwrap();
        writeln!(file, "seed_demo: true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.listen.port(), 9999);
        assert_eq!(config.log_level, "debug");
        assert!(config.seed_demo);
    }
}
