//! Title search against the recommendation service.
//!
//! `GET /search?type=<domain>&query=<text>` returns up to ten matching
//! titles. Each domain keys its hits differently (`movie_id`, `anime_id`,
//! `item_id`); [`SearchHit`] folds them into one shape.

use std::time::Duration;

use encore_core::model::{loose_id, whole_year};
use encore_core::Domain;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ProviderResult;
use crate::provider::http::{build_client, normalize_base_url, read_json};

/// One search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(
        default,
        alias = "movie_id",
        alias = "anime_id",
        alias = "item_id",
        deserialize_with = "loose_id"
    )]
    pub id: Option<String>,

    pub title: String,

    #[serde(default, deserialize_with = "whole_year")]
    pub year: Option<i32>,

    #[serde(default)]
    pub author: Option<String>,
}

impl SearchHit {
    /// Title followed by year or author when known.
    pub fn label(&self) -> String {
        match (&self.author, self.year) {
            (Some(author), _) => format!("{} ({})", self.title, author),
            (None, Some(year)) => format!("{} ({})", self.title, year),
            (None, None) => self.title.clone(),
        }
    }
}

/// Search collection holding TV shows.
pub const TV_SHOWS: &str = "tvshows";

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: &str, timeout: Duration) -> ProviderResult<Self> {
        Ok(Self {
            http: build_client(timeout)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Search titles in `domain`. A blank query returns no hits without
    /// contacting the service.
    pub async fn search(&self, domain: Domain, query: &str) -> ProviderResult<Vec<SearchHit>> {
        self.search_collection(domain.search_name(), query).await
    }

    /// Search TV shows. The service keeps them in their own collection,
    /// next to the movies one.
    pub async fn search_tv_shows(&self, query: &str) -> ProviderResult<Vec<SearchHit>> {
        self.search_collection(TV_SHOWS, query).await
    }

    async fn search_collection(
        &self,
        collection: &str,
        query: &str,
    ) -> ProviderResult<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        log::debug!("GET {} type={} query={:?}", url, collection, query);

        let response = self
            .http
            .get(&url)
            .query(&[("type", collection), ("query", query)])
            .send()
            .await?;

        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_ids_fold_into_one_field() {
        let movie: SearchHit =
            serde_json::from_str(r#"{"movie_id": 6, "title": "Heat", "year": 1995.0}"#).unwrap();
        assert_eq!(movie.id.as_deref(), Some("6"));
        assert_eq!(movie.year, Some(1995));

        let book: SearchHit = serde_json::from_str(
            r#"{"item_id": "0441013597", "title": "Dune", "author": "Frank Herbert"}"#,
        )
        .unwrap();
        assert_eq!(book.id.as_deref(), Some("0441013597"));
        assert_eq!(book.label(), "Dune (Frank Herbert)");
    }

    #[test]
    fn test_label_without_extras() {
        let hit: SearchHit = serde_json::from_str(r#"{"title": "Mushishi"}"#).unwrap();
        assert_eq!(hit.label(), "Mushishi");
        assert!(hit.id.is_none());
    }

    #[tokio::test]
    async fn test_blank_query_skips_request() {
        // Nothing listens on port 9; a request would fail.
        let client = SearchClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let hits = client.search(Domain::Movie, "   ").await.unwrap();
        assert!(hits.is_empty());
        let hits = client.search_tv_shows("").await.unwrap();
        assert!(hits.is_empty());
    }
}
