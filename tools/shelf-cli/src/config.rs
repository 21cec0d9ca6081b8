//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shelf_gateway::GatewayConfig;
use shelf_store::StoreConfig;

use crate::logging::LoggingConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where products come from.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Store behavior.
    #[serde(default)]
    pub store: StoreConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    ///
    /// A relative `gateway.fixture` path is resolved against the directory
    /// holding the config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let (Some(fixture), Some(dir)) = (&config.gateway.fixture, path.parent()) {
            if fixture.is_relative() {
                config.gateway.fixture = Some(dir.join(fixture));
            }
        }

        Ok(config)
    }

    /// Parse config text as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default shelf.toml config file.
pub fn generate_default_config() -> String {
    r#"# Product Shelf configuration

[gateway]
# Feed file to serve; the bundled sample feed is used when unset.
# fixture = "products.json"
latency_ms = 0
# Fail every n-th request to exercise the error state.
# fail_every = 4

[gateway.retry]
max_attempts = 0

[gateway.retry.backoff]
kind = "exponential"
base_ms = 200
max_ms = 2000

[store]
fetch_timeout_ms = 10000
refresh_delay_ms = 0

[logging]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;

    #[test]
    fn test_empty_config_is_default() {
        let config = CliConfig::parse("", false).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = CliConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.gateway, GatewayConfig::default());
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_parse_json() {
        let config = CliConfig::parse(
            r#"{ "gateway": { "fail_every": 3 }, "logging": { "format": "json" } }"#,
            true,
        )
        .unwrap();
        assert_eq!(config.gateway.fail_every, Some(3));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_relative_fixture_resolved_against_config_dir() {
        let dir = std::env::temp_dir().join(format!("shelf-cli-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shelf.toml");
        std::fs::write(&path, "[gateway]\nfixture = \"feed.json\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.gateway.fixture, Some(dir.join("feed.json")));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
