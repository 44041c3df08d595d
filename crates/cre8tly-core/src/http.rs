//! Upload API client configuration.
//!
//! This does not perform I/O. It resolves endpoint URLs and the headers and
//! flags every request to the upload API must carry, and hands the result to
//! whatever transport the platform provides. Failures and retries are the
//! caller's concern.

use crate::storage::{StorageError, TokenStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://cre8tlystudio.com/api";

/// Upload client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Request path must be relative to the API base: {0:?}")]
    AbsolutePath(String),
    #[error("Token lookup failed: {0}")]
    Token(#[from] StorageError),
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// Settings for the upload client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadClientConfig {
    /// API root every request path is resolved against.
    pub base_url: Url,
    /// Send cookies with cross-origin requests.
    pub with_credentials: bool,
    /// Request timeout in milliseconds. `None` means no timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for UploadClientConfig {
    fn default() -> Self {
        Self {
            // Compile-time constant, pinned by `test_default_base_url_parses`.
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            with_credentials: true,
            timeout_ms: None,
        }
    }
}

/// A request ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub with_credentials: bool,
    pub timeout: Option<Duration>,
}

impl PreparedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Client for the upload API.
#[derive(Debug, Clone)]
pub struct UploadClient {
    config: UploadClientConfig,
    /// Base URL with a trailing slash so relative joins append.
    base: Url,
    tokens: TokenStore,
}

impl UploadClient {
    pub fn new(config: UploadClientConfig, tokens: TokenStore) -> Self {
        let mut base = config.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { config, base, tokens }
    }

    pub fn config(&self) -> &UploadClientConfig {
        &self.config
    }

    /// Resolve `path` against the API base.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        if path.starts_with("//") || Url::parse(path).is_ok() {
            return Err(ClientError::AbsolutePath(path.to_string()));
        }
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    /// Build a request for `path`, attaching the stored bearer token if any.
    pub fn prepare(&self, method: Method, path: &str) -> Result<PreparedRequest, ClientError> {
        let url = self.endpoint(path)?;
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(token) = self.tokens.token()? {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        log::debug!("Prepared {} {}", method, url);
        Ok(PreparedRequest {
            method,
            url,
            headers,
            with_credentials: self.config.with_credentials,
            timeout: self.config.timeout_ms.map(Duration::from_millis),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn client(token: Option<&str>) -> UploadClient {
        let store = match token {
            Some(t) => MemoryStore::with_entries([("accessToken", t)]),
            None => MemoryStore::new(),
        };
        UploadClient::new(UploadClientConfig::default(), TokenStore::new(Arc::new(store)))
    }

    #[test]
    fn test_default_base_url_parses() {
        let url = Url::parse(DEFAULT_BASE_URL).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_defaults() {
        let config = UploadClientConfig::default();
        assert_eq!(config.base_url.as_str(), "https://cre8tlystudio.com/api");
        assert!(config.with_credentials);
        assert_eq!(config.timeout_ms, None);
    }

    #[test]
    fn test_endpoint_keeps_api_prefix() {
        let client = client(None);
        assert_eq!(
            client.endpoint("/uploads/image").unwrap().as_str(),
            "https://cre8tlystudio.com/api/uploads/image"
        );
        assert_eq!(
            client.endpoint("uploads/image").unwrap().as_str(),
            "https://cre8tlystudio.com/api/uploads/image"
        );
    }

    #[test]
    fn test_absolute_paths_rejected() {
        let client = client(None);
        assert!(matches!(
            client.endpoint("https://elsewhere.example/x"),
            Err(ClientError::AbsolutePath(_))
        ));
        assert!(matches!(
            client.endpoint("//elsewhere.example/x"),
            Err(ClientError::AbsolutePath(_))
        ));
    }

    #[test]
    fn test_bearer_attached_when_present() {
        let request = client(Some("t0k3n")).prepare(Method::Post, "uploads").unwrap();
        assert_eq!(request.header("authorization"), Some("Bearer t0k3n"));
        assert!(request.with_credentials);
        assert_eq!(request.timeout, None);
    }

    #[test]
    fn test_no_bearer_when_signed_out() {
        let request = client(None).prepare(Method::Get, "uploads").unwrap();
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(request.header("accept"), Some("application/json"));
    }

    #[test]
    fn test_timeout_from_config() {
        let config = UploadClientConfig {
            timeout_ms: Some(1500),
            ..Default::default()
        };
        let client = UploadClient::new(config, TokenStore::new(Arc::new(MemoryStore::new())));
        let request = client.prepare(Method::Put, "x").unwrap();
        assert_eq!(request.timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: UploadClientConfig =
            serde_json::from_str(r#"{ "timeout_ms": 3000 }"#).unwrap();
        assert_eq!(config.base_url.as_str(), "https://cre8tlystudio.com/api");
        assert_eq!(config.timeout_ms, Some(3000));
    }
}
