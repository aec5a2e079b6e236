//! Retrieval of the release index document

#[cfg(test)]
use mockall::automock;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::release::error::FetchError;
use crate::release::types::ReleaseIndex;

/// Trait for fetching a release index snapshot
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches the whole index, with every release keyed by version
    async fn fetch_index(&self) -> Result<ReleaseIndex, FetchError>;
}

/// Release index served over HTTP, e.g. releases.hashicorp.com
pub struct HttpReleaseSource {
    client: Client,
    url: String,
}

impl HttpReleaseSource {
    pub fn new(url: &str, timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(&config.url, config.timeout(), &config.user_agent)
    }
}

#[async_trait::async_trait]
impl ReleaseSource for HttpReleaseSource {
    async fn fetch_index(&self) -> Result<ReleaseIndex, FetchError> {
        debug!("Fetching release index: {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(self.url.clone()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(FetchError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("Release index returned status {}: {}", status, self.url);
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let index: ReleaseIndex = response.json().await.map_err(|e| {
            warn!("Failed to parse release index: {}", e);
            FetchError::InvalidResponse(e.to_string())
        })?;

        debug!("Fetched {} releases", index.versions.len());
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Server, ServerGuard};

    fn source(server: &ServerGuard) -> HttpReleaseSource {
        HttpReleaseSource::new(
            &format!("{}/terraform/index.json", server.url()),
            Duration::from_secs(5),
            "tfrelease-test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_index_returns_versions_and_sibling_fields() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/terraform/index.json")
            .match_header("user-agent", "tfrelease-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "terraform",
                    "versions": {
                        "1.5.6": {"name": "terraform", "version": "1.5.6", "builds": []},
                        "1.5.7": {"name": "terraform", "version": "1.5.7", "builds": []}
                    }
                }"#,
            )
            .create_async()
            .await;

        let result = source(&server).fetch_index().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result.versions.keys().collect::<Vec<_>>(),
            vec!["1.5.6", "1.5.7"]
        );
        assert_eq!(result.versions["1.5.7"].version, "1.5.7");
        assert_eq!(
            result.metadata.get("name"),
            Some(&serde_json::json!("terraform"))
        );
    }

    #[tokio::test]
    async fn fetch_index_returns_not_found_for_404() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/terraform/index.json")
            .with_status(404)
            .create_async()
            .await;

        let result = source(&server).fetch_index().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_index_returns_rate_limited_for_429() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/terraform/index.json")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let result = source(&server).fetch_index().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(FetchError::RateLimited {
                retry_after_secs: Some(30)
            })
        ));
    }

    #[tokio::test]
    async fn fetch_index_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/terraform/index.json")
            .with_status(503)
            .create_async()
            .await;

        let result = source(&server).fetch_index().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_index_returns_invalid_response_for_missing_versions() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/terraform/index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "terraform"}"#)
            .create_async()
            .await;

        let result = source(&server).fetch_index().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }
}
