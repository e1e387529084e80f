use async_trait::async_trait;

use crate::data_models::SearchResult;
use crate::error::WikibotError;
use crate::query::OpenSearchQuery;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer an opensearch query.
#[async_trait]
pub trait Search: Send + Sync {
    async fn search(&self, query: &OpenSearchQuery) -> Result<SearchResult, WikibotError>;
}

/// Talks to a MediaWiki `api.php` endpoint. One attempt per query, no retries.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    api_url: String,
}

impl WikiClient {
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        WikiClient {
            http,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Search for WikiClient {
    async fn search(&self, query: &OpenSearchQuery) -> Result<SearchResult, WikibotError> {
        let request = self.http.get(&self.api_url).query(query).build()?;
        log::info!("making API call to wikipedia: {}", request.url());

        let res = self.http.execute(request).await.map_err(|e| {
            log::error!("error making wikipedia request for {:?}: {:#}", query.search, e);
            WikibotError::from(e)
        })?;

        let status = res.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unexpected status");
            log::error!(
                "wikipedia answered {} for {:?}",
                status.as_u16(),
                query.search
            );
            return Err(WikibotError::upstream(Some(status.as_u16()), reason));
        }

        let body = res.text().await?;
        serde_json::from_str::<SearchResult>(&body).map_err(|e| {
            log::error!("unexpected opensearch body for {:?}: {:#}", query.search, e);
            WikibotError::upstream(None, format!("invalid response body: {e}"))
        })
    }
}
