use std::time::Duration;

use encore_core::model::canned;
use encore_core::{RecommendationItem, RecommendationRequest};

use super::{check_favorites, RecommendationProvider};
use crate::error::ProviderResult;

/// Offline provider serving a fixed list per domain after a short delay.
///
/// The request's favorites and preferences do not influence the result.
#[derive(Debug, Clone)]
pub struct StubProvider {
    delay: Duration,
}

impl StubProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for StubProvider {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> ProviderResult<Vec<RecommendationItem>> {
        check_favorites(request)?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        log::debug!("stub: serving canned {} list", request.domain);
        Ok(canned(request.domain))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
