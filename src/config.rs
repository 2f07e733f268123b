//! Application configuration.
//!
//! The configuration is loaded from
//! `$XDG_CONFIG_HOME/hyprpair/config.json`, falling back to compiled-in
//! defaults when the file is missing or unreadable.  Every field is
//! optional — a minimal `{}` file is valid.
//!
//! # Example
//!
//! ```json
//! {
//!   "primary": "eDP-1",
//!   "primary_pattern": "eDP",
//!   "state_dir": "/run/user/1000"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exact name of the monitor to treat as primary.  When set, the named
    /// monitor must be present; its absence is an error (with a degraded
    /// fallback applied).
    pub primary: Option<String>,

    /// Substring identifying the laptop panel when no exact name is
    /// configured.
    pub primary_pattern: String,

    /// Directory for the toggle-state files.  Defaults to
    /// `$XDG_RUNTIME_DIR`, falling back to `/tmp`.
    pub state_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary: None,
            primary_pattern: "eDP".into(),
            state_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "primary": "eDP-1",
            "primary_pattern": "LVDS",
            "state_dir": "/tmp/hyprpair"
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.primary.as_deref(), Some("eDP-1"));
        assert_eq!(cfg.primary_pattern, "LVDS");
        assert_eq!(cfg.state_dir.as_deref(), Some("/tmp/hyprpair"));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert!(cfg.primary.is_none());
        assert_eq!(cfg.primary_pattern, "eDP");
        assert!(cfg.state_dir.is_none());
    }

    #[test]
    fn deserialize_partial_keeps_other_defaults() {
        let json = r#"{ "primary": "DP-3" }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.primary.as_deref(), Some("DP-3"));
        assert_eq!(cfg.primary_pattern, "eDP");
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "primary_pattern": "eDP", "future_section": { "key": 42 } }"#;
        // Should not fail — unknown keys are silently ignored.
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }
}
