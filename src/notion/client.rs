//! Outbound client for Notion's database query endpoint.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::config::NotionConfig;
use crate::notion::query::DatabaseQuery;
use crate::notion::types::{QueryError, QueryResponse, QueryResult};

const NOTION_VERSION_HEADER: &str = "notion-version";

const MISSING_CREDENTIALS: &str =
    "Missing NOTION_API_KEY or NOTION_DATABASE_ID environment variables";

/// Client for one Notion database.
///
/// Issues exactly one request per [`NotionClient::query`] call: no retries
/// and no per-call timeout.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    config: NotionConfig,
}

impl NotionClient {
    /// Build a client. Missing credentials are accepted here and reported
    /// by [`NotionClient::query`].
    pub fn new(config: NotionConfig) -> QueryResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tool-directory/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// Query endpoint URL for the configured database.
    fn query_url(&self, database_id: &str) -> String {
        format!(
            "{}/v1/databases/{}/query",
            self.config.api_base_url.trim_end_matches('/'),
            database_id
        )
    }

    fn credentials(&self) -> QueryResult<(&str, &str)> {
        self.config
            .credentials()
            .ok_or(QueryError::Configuration(MISSING_CREDENTIALS))
    }

    /// Run the directory query and return Notion's body untouched.
    pub async fn query(&self, query: &DatabaseQuery) -> QueryResult<QueryResponse> {
        let (api_key, database_id) = self.credentials()?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| QueryError::Configuration("NOTION_API_KEY is not a valid header value"))?;
        headers.insert(AUTHORIZATION, bearer);
        let version = HeaderValue::from_str(&self.config.notion_version)
            .map_err(|_| QueryError::Configuration("notion_version is not a valid header value"))?;
        headers.insert(NOTION_VERSION_HEADER, version);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let url = self.query_url(database_id);
        tracing::debug!(url = %url, "Querying Notion database");

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let payload = serde_json::from_slice::<Value>(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
            return Err(QueryError::Upstream { status, payload });
        }

        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(QueryResponse { body })
    }
}
