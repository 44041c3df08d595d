//! Application configuration.

use cre8tly_core::storage::DEFAULT_NAMESPACE;
use cre8tly_core::time::Duration;
use cre8tly_core::{RouteTargets, UploadClientConfig};
use serde::{Deserialize, Serialize};

/// Shell configuration. Every field has a default, so a partial JSON
/// document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub upload: UploadClientConfig,
    /// Directory name for native preference storage.
    pub storage_namespace: String,
    /// Delay before the entry navigation fires.
    pub navigation_delay_ms: u64,
    pub routes: RouteTargets,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload: UploadClientConfig::default(),
            storage_namespace: DEFAULT_NAMESPACE.to_string(),
            navigation_delay_ms: 250,
            routes: RouteTargets::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cre8tly_core::routing::NAVIGATION_DELAY;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.navigation_delay(), NAVIGATION_DELAY);
        assert_eq!(config.routes.desktop.path(), "/login");
        assert_eq!(config.upload.base_url.as_str(), "https://cre8tlystudio.com/api");
        assert!(config.upload.with_credentials);
    }

    #[test]
    fn test_partial_json() {
        let config = AppConfig::from_json(r#"{"navigation_delay_ms": 0}"#).unwrap();
        assert_eq!(config.navigation_delay_ms, 0);
        assert_eq!(config.storage_namespace, "cre8tly");
        assert_eq!(config.routes, RouteTargets::default());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(AppConfig::from_json(r#"{"upload": {"base_url": "not a url"}}"#).is_err());
    }
}
