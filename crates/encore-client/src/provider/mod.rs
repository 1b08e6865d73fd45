//! Recommendation providers.
//!
//! Every wizard talks to its provider through the same
//! [`RecommendationProvider`] seam, so the offline stub and the HTTP
//! service are interchangeable per configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use encore_core::{Applied, RecommendationItem, RecommendationRequest, Wizard};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{ProviderError, ProviderResult};

pub(crate) mod http;
mod stub;

pub use http::HttpProvider;
pub use stub::StubProvider;

/// A source of recommendations.
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync + fmt::Debug {
    /// Produce recommendations for `request`.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> ProviderResult<Vec<RecommendationItem>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Which provider implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Stub,
    Http,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stub => "stub",
            Self::Http => "http",
        })
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "http" => Ok(Self::Http),
            other => Err(format!(
                "unknown provider '{other}' (expected 'stub' or 'http')"
            )),
        }
    }
}

/// Build the provider selected by `config`.
pub fn build_provider(config: &Config) -> ProviderResult<Arc<dyn RecommendationProvider>> {
    let provider: Arc<dyn RecommendationProvider> = match config.provider {
        ProviderKind::Stub => Arc::new(StubProvider::new(config.stub_delay())),
        ProviderKind::Http => Arc::new(HttpProvider::new(
            &config.service_url,
            config.request_timeout(),
        )?),
    };
    log::debug!("Using {} provider", provider.name());
    Ok(provider)
}

/// Run one complete submission for `wizard` against `provider`.
///
/// Begins the submission, awaits the provider and applies the outcome. A
/// provider failure leaves the wizard in its failed state rather than
/// returning an error; only an invalid transition is reported as `Err`.
pub async fn fulfil(
    provider: &dyn RecommendationProvider,
    wizard: &mut Wizard,
) -> encore_core::Result<Applied> {
    let submission = wizard.begin_submit()?;
    let outcome = provider.recommend(&submission.request).await;
    Ok(wizard.finish_submit(submission.ticket, outcome))
}

pub(crate) fn check_favorites(request: &RecommendationRequest) -> ProviderResult<()> {
    let count = request.favorites.len();
    if count == 0 {
        return Err(ProviderError::InvalidRequest(
            "Please provide at least one favorite.".to_string(),
        ));
    }
    if count > encore_core::MAX_FAVORITES {
        return Err(ProviderError::InvalidRequest(format!(
            "Maximum of {} favorites allowed.",
            encore_core::MAX_FAVORITES
        )));
    }
    Ok(())
}
