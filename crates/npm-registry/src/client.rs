use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::record::SearchResponse;
use crate::{PackageRecord, PackageSource, SearchError};

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.com";
pub const SEARCH_PATH: &str = "/-/v1/search";
/// Results per search. There is no pagination.
pub const PAGE_SIZE: usize = 10;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("npm-alfred/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RegistryConfig {
    /// Defaults, overridden by `NPM_REGISTRY_URL` and `NPM_REGISTRY_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = var("NPM_REGISTRY_URL").filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }
        if let Some(secs) = var("NPM_REGISTRY_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}{SEARCH_PATH}?size={PAGE_SIZE}&text={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }
}

/// Blocking client for the registry search endpoint.
#[derive(Debug, Clone, Default)]
pub struct RegistryClient {
    config: RegistryConfig,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Search the registry, reporting any failure.
    pub fn try_search(&self, query: &str) -> Result<Vec<PackageRecord>, SearchError> {
        let url = self.config.search_url(query);
        debug!("GET {url}");

        let client = Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| SearchError::Client {
                message: e.to_string(),
            })?;

        let response = client
            .get(&url)
            .send()
            .map_err(SearchError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.text().map_err(SearchError::from_request)?;
        let results: SearchResponse = serde_json::from_str(&body)?;
        Ok(results.into_records())
    }

    /// Search the registry; failures of any kind count as zero results.
    pub fn search(&self, query: &str) -> Vec<PackageRecord> {
        self.try_search(query).unwrap_or_else(|err| {
            debug!("registry search for {query:?} absorbed {}: {err}", err.class_name());
            Vec::new()
        })
    }
}

impl PackageSource for RegistryClient {
    fn fetch(&self, query: &str) -> Result<Vec<PackageRecord>, SearchError> {
        Ok(self.search(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npm_alfred_test_utils::registry::{
        MockRegistry, UNREACHABLE_REGISTRY_URL, package, search_body,
    };
    use reqwest::StatusCode;
    use std::collections::HashMap;

    fn client_for(registry: &MockRegistry) -> RegistryClient {
        RegistryClient::new(RegistryConfig::default().with_base_url(registry.uri()))
    }

    #[test]
    fn test_default_search_url() {
        let config = RegistryConfig::default();
        assert_eq!(
            config.search_url("lodash"),
            "https://registry.npmjs.com/-/v1/search?size=10&text=lodash"
        );
        assert_eq!(
            config.search_url("@types/node react dom"),
            "https://registry.npmjs.com/-/v1/search?size=10&text=%40types%2Fnode%20react%20dom"
        );
        assert_eq!(
            config.search_url(""),
            "https://registry.npmjs.com/-/v1/search?size=10&text="
        );
    }

    #[test]
    fn test_config_from_vars() {
        let vars = HashMap::from([
            ("NPM_REGISTRY_URL", "http://localhost:4873/ "),
            ("NPM_REGISTRY_TIMEOUT_SECS", "5"),
        ]);
        let config = RegistryConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://localhost:4873");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.search_url("a"),
            "http://localhost:4873/-/v1/search?size=10&text=a"
        );
    }

    #[test]
    fn test_config_ignores_invalid_vars() {
        let vars = HashMap::from([
            ("NPM_REGISTRY_URL", "  "),
            ("NPM_REGISTRY_TIMEOUT_SECS", "soon"),
        ]);
        let config = RegistryConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_search_success() {
        let registry = MockRegistry::start();
        registry.search_returns(
            "lodash",
            search_body([
                package(
                    "lodash",
                    "4.17.21",
                    Some("Lodash library"),
                    serde_json::json!({
                        "homepage": "https://lodash.com",
                        "repository": "https://github.com/lodash/lodash",
                        "npm": "https://npmjs.com/package/lodash"
                    }),
                ),
                package(
                    "lodash.merge",
                    "4.6.2",
                    None,
                    serde_json::json!({"npm": "https://npmjs.com/package/lodash.merge"}),
                ),
            ]),
        );

        let records = client_for(&registry).try_search("lodash").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "lodash");
        assert_eq!(records[0].info.as_deref(), Some("Lodash library"));
        assert_eq!(records[1].name, "lodash.merge");
        assert_eq!(
            records[1].homepage_uri.as_deref(),
            Some("https://npmjs.com/package/lodash.merge")
        );
    }

    #[test]
    fn test_search_sends_encoded_query_and_page_size() {
        let registry = MockRegistry::start();
        registry.search_returns("@babel/core", search_body([]));

        let records = client_for(&registry).try_search("@babel/core").unwrap();
        assert!(records.is_empty());
        assert_eq!(
            registry.received_queries(),
            vec!["size=10&text=%40babel%2Fcore".to_string()]
        );
    }

    #[test]
    fn test_server_error_is_absorbed() {
        let registry = MockRegistry::start();
        registry.search_fails(500);
        let client = client_for(&registry);

        match client.try_search("lodash") {
            Err(SearchError::Status(status)) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(client.search("lodash").is_empty());
    }

    #[test]
    fn test_malformed_body_is_absorbed() {
        let registry = MockRegistry::start();
        registry.search_returns_raw("<html>not json</html>");
        let client = client_for(&registry);

        assert!(matches!(
            client.try_search("lodash"),
            Err(SearchError::Decode(_))
        ));
        assert!(client.search("lodash").is_empty());
    }

    #[test]
    fn test_missing_objects_is_absorbed() {
        let registry = MockRegistry::start();
        registry.search_returns_raw(r#"{"total": 3}"#);
        let client = client_for(&registry);

        assert!(matches!(
            client.try_search("lodash"),
            Err(SearchError::Decode(_))
        ));
        assert!(client.search("lodash").is_empty());
    }

    #[test]
    fn test_unreachable_registry_is_absorbed() {
        let client =
            RegistryClient::new(RegistryConfig::default().with_base_url(UNREACHABLE_REGISTRY_URL));

        let err = client.try_search("lodash").unwrap_err();
        assert!(err.is_network(), "expected network error, got {err:?}");
        assert!(client.search("lodash").is_empty());
        assert!(client.fetch("lodash").unwrap().is_empty());
    }

    #[test]
    fn test_timeout_is_absorbed() {
        let registry = MockRegistry::start();
        registry.search_delays(Duration::from_secs(3), search_body([]));
        let client = RegistryClient::new(
            RegistryConfig::default()
                .with_base_url(registry.uri())
                .with_timeout(Duration::from_millis(200)),
        );

        assert!(matches!(
            client.try_search("slow"),
            Err(SearchError::Timeout { .. })
        ));
        assert!(client.search("slow").is_empty());
    }
}
