//! BrowserAct API client
//!
//! Async HTTP client for the task API. Every operation is a single
//! request/response pair; there are no retries and no local task state.
//! Task lifecycle authority always stays with the service.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::api::agent::AgentApi;
use crate::api::types::{MAX_LIMIT, MIN_LIMIT, MIN_PAGE};
use crate::api::workflow::WorkflowApi;
use crate::core::config::DEFAULT_BASE_URL;
use crate::core::{ApiKey, BrowserActError, Config, Result};

/// Authenticated client for the BrowserAct API
///
/// Cheap to clone; all clones share the same connection pool. The agent
/// and workflow surfaces are reached through [`BrowserActClient::agent`]
/// and [`BrowserActClient::workflow`].
#[derive(Clone)]
pub struct BrowserActClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
    debug: bool,
}

impl BrowserActClient {
    /// Create a client for the production endpoint
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            debug: false,
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.auth.api_key.clone().ok_or_else(|| {
            BrowserActError::config(
                "API key not set. Add it to the config file or set BROWSERACT_API_KEY",
            )
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base_url: checked_base_url(&config.api.base_url)?,
            api_key: ApiKey::new(api_key),
            debug: config.api.debug,
        })
    }

    /// Create a client with a custom base URL (self-hosted gateways, tests)
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<ApiKey>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: checked_base_url(&base_url.into())?,
            api_key: api_key.into(),
            debug: false,
        })
    }

    /// Enable or disable debug output
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// The configured base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Operations on agents and their tasks
    pub fn agent(&self) -> AgentApi<'_> {
        AgentApi::new(self)
    }

    /// Operations on workflows and their tasks
    pub fn workflow(&self) -> WorkflowApi<'_> {
        WorkflowApi::new(self)
    }

    /// Build a full request URL with properly encoded query parameters
    fn url_for(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| BrowserActError::config(format!("Invalid URL for {}: {}", path, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET a JSON payload
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url_for(path, query)?;
        self.debug_print("GET", url.as_str());

        let response = self
            .client
            .get(url)
            .bearer_auth(self.api_key.expose())
            .send()
            .await?;

        self.read_json(response).await
    }

    /// POST a JSON body and parse a JSON payload back
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url_for(path, &[])?;
        // Bodies can carry login secrets, so only the URL is logged
        self.debug_print("POST", url.as_str());

        let response = self
            .client
            .post(url)
            .bearer_auth(self.api_key.expose())
            .json(body)
            .send()
            .await?;

        self.read_json(response).await
    }

    /// PUT with no body; success responses are empty
    pub(crate) async fn put_unit(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        let url = self.url_for(path, query)?;
        self.debug_print("PUT", url.as_str());

        let response = self
            .client
            .put(url)
            .bearer_auth(self.api_key.expose())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            self.debug_print("Response", &format!("{} (empty)", status.as_u16()));
            return Ok(());
        }

        let body = response.text().await?;
        self.debug_print("Response", &format!("{} {}", status.as_u16(), body));
        Err(BrowserActError::from_error_body(status.as_u16(), &body))
    }

    /// Map a response to a parsed payload or an API error
    async fn read_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        self.debug_print("Response", &format!("{} {}", status.as_u16(), body));

        if !status.is_success() {
            return Err(BrowserActError::from_error_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(BrowserActError::from)
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.chars().count() > 500 {
                let truncated: String = content.chars().take(500).collect();
                eprintln!("DEBUG {}: {}...", label, truncated);
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

/// Validate and normalize a base URL at construction time
fn checked_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| BrowserActError::config(format!("Invalid base URL '{}': {}", trimmed, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(BrowserActError::config(format!(
            "Base URL must be http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

/// Reject out-of-range pagination before a request is issued
pub(crate) fn validate_page_params(page: u32, limit: u32) -> Result<()> {
    if page < MIN_PAGE {
        return Err(BrowserActError::invalid(format!(
            "page must be at least {}, got {}",
            MIN_PAGE, page
        )));
    }
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(BrowserActError::invalid(format!(
            "limit must be between {} and {}, got {}",
            MIN_LIMIT, MAX_LIMIT, limit
        )));
    }
    Ok(())
}
