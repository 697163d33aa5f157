//! In-process stand-in for the npm registry search endpoint.
//!
//! The registry client is blocking, so the mock server runs on its own tokio
//! runtime owned by the fixture and every call here blocks on it. Tests stay
//! plain `#[test]` functions.
//!
//! ```no_run
//! use npm_alfred_test_utils::registry::{MockRegistry, package, search_body};
//!
//! let registry = MockRegistry::start();
//! registry.search_returns(
//!     "lodash",
//!     search_body([package("lodash", "4.17.21", None, serde_json::json!({}))]),
//! );
//! let base_url = registry.uri();
//! ```

use serde_json::{Value, json};
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/-/v1/search";

/// Nothing listens on port 1, so connecting fails immediately.
pub const UNREACHABLE_REGISTRY_URL: &str = "http://127.0.0.1:1";

pub struct MockRegistry {
    // Dropped before the runtime that serves it.
    server: MockServer,
    runtime: Runtime,
}

impl MockRegistry {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build tokio runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    /// Base URL to point the registry client at.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer searches for exactly `query` with `body`.
    pub fn search_returns(&self, query: &str, body: Value) -> &Self {
        self.mount(
            search()
                .and(query_param("text", query))
                .respond_with(ResponseTemplate::new(200).set_body_json(body)),
        )
    }

    /// Answer every search with a bare status code.
    pub fn search_fails(&self, status: u16) -> &Self {
        self.mount(search().respond_with(ResponseTemplate::new(status)))
    }

    /// Answer every search with `body` verbatim.
    pub fn search_returns_raw(&self, body: &str) -> &Self {
        self.mount(search().respond_with(
            ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json"),
        ))
    }

    /// Answer every search with `body` after `delay`.
    pub fn search_delays(&self, delay: Duration, body: Value) -> &Self {
        self.mount(search().respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(delay),
        ))
    }

    /// Raw query strings of every request received so far.
    pub fn received_queries(&self) -> Vec<String> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.query().unwrap_or_default().to_string())
            .collect()
    }

    fn mount(&self, mock: Mock) -> &Self {
        self.runtime.block_on(mock.mount(&self.server));
        self
    }
}

fn search() -> MockBuilder {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("size", "10"))
}

/// A search response wrapping `packages` in registry order.
pub fn search_body(packages: impl IntoIterator<Item = Value>) -> Value {
    let objects: Vec<Value> = packages
        .into_iter()
        .map(|package| json!({ "package": package, "score": { "final": 1.0 } }))
        .collect();
    json!({ "total": objects.len(), "objects": objects })
}

/// One `package` object as the registry reports it.
pub fn package(name: &str, version: &str, description: Option<&str>, links: Value) -> Value {
    json!({
        "name": name,
        "version": version,
        "description": description,
        "links": links,
    })
}
