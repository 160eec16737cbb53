use serde::Deserialize;
use std::path::Path;

/// What to do with a client whose protocol revision is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedAction {
    /// Disconnect during login.
    Kick,
    /// Let the client in, with a warning in the log.
    Warn,
    /// Let the client in quietly.
    Allow,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(rename = "unsupported-version-action", default = "default_action")]
    pub unsupported_version_action: UnsupportedAction,
    #[serde(rename = "enable-metrics", default = "default_enable_metrics")]
    pub enable_metrics: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub log_packets: bool,
}

fn default_action() -> UnsupportedAction {
    UnsupportedAction::Kick
}

fn default_enable_metrics() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            unsupported_version_action: default_action(),
            enable_metrics: default_enable_metrics(),
            debug: false,
            log_packets: false,
        }
    }
}

impl BridgeConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: BridgeConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::info!("No config file found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.unsupported_version_action, UnsupportedAction::Kick);
        assert!(config.enable_metrics);
        assert!(!config.debug);
        assert!(!config.log_packets);
    }

    #[test]
    fn test_parse_full_file() {
        let config: BridgeConfig = toml::from_str(
            r#"
            unsupported-version-action = "warn"
            enable-metrics = false
            debug = true
            log_packets = true
            "#,
        )
        .unwrap();
        assert_eq!(config.unsupported_version_action, UnsupportedAction::Warn);
        assert!(!config.enable_metrics);
        assert!(config.debug);
        assert!(config.log_packets);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: BridgeConfig =
            toml::from_str(r#"unsupported-version-action = "allow""#).unwrap();
        assert_eq!(config.unsupported_version_action, UnsupportedAction::Allow);
        assert!(config.enable_metrics);
        assert!(!config.debug);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<BridgeConfig, _> =
            toml::from_str(r#"unsupported-version-action = "ban""#);
        assert!(result.is_err());
    }
}
