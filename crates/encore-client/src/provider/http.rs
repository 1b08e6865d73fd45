//! Client for the external recommendation service.
//!
//! The service exposes `POST /recommend`, which takes the wizard's request
//! body and answers with a JSON array of recommendation cards. Rejections
//! come back as a 4xx status with an `{"error": "..."}` body.

use std::time::Duration;

use encore_core::{RecommendationItem, RecommendationRequest};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{check_favorites, RecommendationProvider};
use crate::error::{ProviderError, ProviderResult};

const USER_AGENT: &str = concat!("encore/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Build the HTTP client shared by the provider and the search client.
pub(crate) fn build_client(timeout: Duration) -> ProviderResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Config(format!("failed to build HTTP client: {e}")))
}

pub(crate) fn normalize_base_url(base_url: &str) -> ProviderResult<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ProviderError::Config(format!(
            "service URL must start with http:// or https://, got '{base_url}'"
        )));
    }
    Ok(trimmed.to_string())
}

/// Turn a response into the decoded JSON body, mapping non-success statuses
/// and malformed bodies to provider errors.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ProviderResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .ok()
            .or_else(|| Some(body.trim().to_string()).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        log::debug!("service returned {}: {}", status, message);
        return Err(ProviderError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Parse {
        message: e.to_string(),
    })
}

/// Provider backed by the recommendation service.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    http: Client,
    base_url: String,
}

impl HttpProvider {
    /// Create a provider for the service at `base_url`. Requests that take
    /// longer than `timeout` fail instead of leaving the wizard loading.
    pub fn new(base_url: &str, timeout: Duration) -> ProviderResult<Self> {
        Ok(Self {
            http: build_client(timeout)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for HttpProvider {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> ProviderResult<Vec<RecommendationItem>> {
        check_favorites(request)?;

        let url = format!("{}/recommend", self.base_url);
        log::debug!(
            "POST {} ({}, {} favorites)",
            url,
            request.domain,
            request.favorites.len()
        );

        let response = self.http.post(&url).json(request).send().await?;
        let items: Vec<RecommendationItem> = read_json(response).await?;

        log::debug!("service returned {} items", items.len());
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:5000/").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(
            normalize_base_url(" https://recs.example.com ").unwrap(),
            "https://recs.example.com"
        );
        assert!(normalize_base_url("localhost:5000").is_err());
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let err = HttpProvider::new("ftp://nope", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }
}
