use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Domain;
use crate::model::RequestPreferences;

/// A single recommendation card as returned by the recommendation service.
///
/// The service contract is loose: only `title` is required. Which of the
/// remaining fields are present depends on the domain (books carry
/// `author`, anime carry `studio` and `episodes`). Ids arrive under the
/// domain's own key and may be numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireItem")]
pub struct RecommendationItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Inbound shape of a card. `rating` wins over `predicted_rating` when the
/// service sends both.
#[derive(Deserialize)]
struct WireItem {
    #[serde(
        default,
        alias = "movie_id",
        alias = "anime_id",
        alias = "item_id",
        deserialize_with = "loose_id"
    )]
    id: Option<String>,
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    studio: Option<String>,
    #[serde(default, deserialize_with = "whole_year")]
    year: Option<i32>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    predicted_rating: Option<f64>,
    #[serde(default, deserialize_with = "whole_count")]
    episodes: Option<u32>,
    #[serde(default)]
    image: Option<String>,
}

impl From<WireItem> for RecommendationItem {
    fn from(wire: WireItem) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            author: wire.author,
            studio: wire.studio,
            year: wire.year,
            rating: wire.rating.or(wire.predicted_rating),
            episodes: wire.episodes,
            image: wire.image,
        }
    }
}

impl RecommendationItem {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: None,
            studio: None,
            year: None,
            rating: None,
            episodes: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_studio(mut self, studio: impl Into<String>, episodes: u32) -> Self {
        self.studio = Some(studio.into());
        self.episodes = Some(episodes);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Secondary line shown under the title: author or studio, then year
    /// and episode count when known.
    pub fn byline(&self) -> String {
        let mut parts = Vec::new();
        if let Some(author) = &self.author {
            parts.push(author.clone());
        }
        if let Some(studio) = &self.studio {
            parts.push(studio.clone());
        }
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        if let Some(episodes) = self.episodes {
            parts.push(format!("{} episodes", episodes));
        }
        parts.join(" \u{2022} ")
    }
}

/// Years occasionally arrive as JSON floats (`1994.0`) when the service
/// serializes a column that contained missing values. Accept integral
/// floats, reject anything else.
pub fn whole_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.fract() != 0.0 || raw < f64::from(i32::MIN) || raw > f64::from(i32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "year must be a whole number, got {}",
            raw
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    let year = raw as i32;
    Ok(Some(year))
}

/// Same as [`whole_year`], for non-negative counts such as episodes.
fn whole_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.fract() != 0.0 || raw < 0.0 || raw > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "count must be a non-negative whole number, got {}",
            raw
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = raw as u32;
    Ok(Some(count))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

/// Ids are numeric for movies and anime but strings (ISBNs) for books.
/// Fold both into a string.
pub fn loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    }))
}

/// JSON body of `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(rename = "type")]
    pub domain: Domain,
    pub favorites: Vec<String>,
    pub preferences: RequestPreferences,
}

/// A set of results ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub items: Vec<RecommendationItem>,
    pub fetched_at: DateTime<Utc>,
}

impl Recommendations {
    #[must_use]
    pub fn new(items: Vec<RecommendationItem>) -> Self {
        Self {
            items,
            fetched_at: Utc::now(),
        }
    }

    /// When the results arrived, in the viewer's local time.
    pub fn fetched_label(&self) -> String {
        self.fetched_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

const PLACEHOLDER_IMAGE: &str = "/api/placeholder/300/450";

/// The fixed list served by the offline provider for `domain`.
pub fn canned(domain: Domain) -> Vec<RecommendationItem> {
    let item = |id: u32, title: &str, year: i32, rating: f64| {
        RecommendationItem::new(title)
            .with_id(id.to_string())
            .with_year(year)
            .with_rating(rating)
            .with_image(PLACEHOLDER_IMAGE)
    };

    match domain {
        Domain::Movie => vec![
            item(1, "Interstellar", 2014, 4.8),
            item(2, "The Shawshank Redemption", 1994, 4.9),
            item(3, "Pulp Fiction", 1994, 4.7),
            item(4, "The Dark Knight", 2008, 4.9),
            item(5, "Parasite", 2019, 4.8),
        ],
        Domain::Anime => vec![
            item(1, "Fullmetal Alchemist: Brotherhood", 2009, 4.9).with_studio("Bones", 64),
            item(2, "Steins;Gate", 2011, 4.8).with_studio("White Fox", 24),
            item(3, "Cowboy Bebop", 1998, 4.8).with_studio("Sunrise", 26),
            item(4, "Attack on Titan", 2013, 4.7).with_studio("Wit Studio", 25),
            item(5, "Your Lie in April", 2014, 4.6).with_studio("A-1 Pictures", 22),
        ],
        Domain::Book => vec![
            item(1, "To Kill a Mockingbird", 1960, 4.8).with_author("Harper Lee"),
            item(2, "1984", 1949, 4.7).with_author("George Orwell"),
            item(3, "The Great Gatsby", 1925, 4.5).with_author("F. Scott Fitzgerald"),
            item(4, "The Lord of the Rings", 1954, 4.9).with_author("J.R.R. Tolkien"),
            item(5, "Project Hail Mary", 2021, 4.8).with_author("Andy Weir"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_card() {
        let json = r#"{
            "id": 4,
            "title": "The Lord of the Rings",
            "author": "J.R.R. Tolkien",
            "year": 1954,
            "rating": 4.9,
            "image": "/api/placeholder/300/450"
        }"#;
        let item: RecommendationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_deref(), Some("4"));
        assert_eq!(item.author.as_deref(), Some("J.R.R. Tolkien"));
        assert_eq!(item.year, Some(1954));
        assert!(item.studio.is_none());
    }

    #[test]
    fn test_deserialize_service_shape() {
        // What the recommendation service actually returns.
        let json = r#"{"title": "Heat", "year": 1995.0, "predicted_rating": 4.31}"#;
        let item: RecommendationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "Heat");
        assert_eq!(item.year, Some(1995));
        assert_eq!(item.rating, Some(4.31));
        assert!(item.id.is_none());
    }

    #[test]
    fn test_deserialize_string_and_domain_ids() {
        let book: RecommendationItem =
            serde_json::from_str(r#"{"id": "0441013597", "title": "Dune"}"#).unwrap();
        assert_eq!(book.id.as_deref(), Some("0441013597"));

        let keyed: RecommendationItem =
            serde_json::from_str(r#"{"item_id": "0553293354", "title": "Foundation"}"#).unwrap();
        assert_eq!(keyed.id.as_deref(), Some("0553293354"));

        let anime: RecommendationItem =
            serde_json::from_str(r#"{"anime_id": 457, "title": "Mushishi"}"#).unwrap();
        assert_eq!(anime.id.as_deref(), Some("457"));
    }

    #[test]
    fn test_deserialize_float_episodes() {
        let json = r#"{"title": "Mushishi", "episodes": 26.0}"#;
        let item: RecommendationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.episodes, Some(26));

        let json = r#"{"title": "Mushishi", "episodes": 26.5}"#;
        assert!(serde_json::from_str::<RecommendationItem>(json).is_err());
    }

    #[test]
    fn test_deserialize_both_ratings() {
        let json = r#"{"title": "Heat", "rating": 4.1, "predicted_rating": 4.3}"#;
        let item: RecommendationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.rating, Some(4.1));
    }

    #[test]
    fn test_serialized_card_reads_back() {
        let card = canned(Domain::Book).remove(0);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(r#""id":"1""#));
        assert_eq!(serde_json::from_str::<RecommendationItem>(&json).unwrap(), card);
    }

    #[test]
    fn test_fetched_label() {
        let results = Recommendations::new(Vec::new());
        let label = results.fetched_label();
        // YYYY-MM-DD HH:MM
        assert_eq!(label.len(), 16);
        assert_eq!(&label[4..5], "-");
        assert_eq!(&label[10..11], " ");
    }

    #[test]
    fn test_deserialize_null_year() {
        let json = r#"{"title": "Heat", "year": null}"#;
        let item: RecommendationItem = serde_json::from_str(json).unwrap();
        assert!(item.year.is_none());
    }

    #[test]
    fn test_fractional_year_rejected() {
        let json = r#"{"title": "Heat", "year": 1995.5}"#;
        assert!(serde_json::from_str::<RecommendationItem>(json).is_err());
    }

    #[test]
    fn test_missing_title_rejected() {
        let json = r#"{"year": 1995}"#;
        assert!(serde_json::from_str::<RecommendationItem>(json).is_err());
    }

    #[test]
    fn test_byline() {
        let anime = RecommendationItem::new("Cowboy Bebop")
            .with_year(1998)
            .with_studio("Sunrise", 26);
        assert_eq!(anime.byline(), "Sunrise \u{2022} 1998 \u{2022} 26 episodes");
        assert_eq!(RecommendationItem::new("x").byline(), "");
    }

    #[test]
    fn test_canned_lists_have_five_items() {
        for domain in Domain::ALL {
            let items = canned(domain);
            assert_eq!(items.len(), 5, "{domain}");
            assert!(items.iter().all(|i| i.rating.is_some() && i.year.is_some()));
        }
        assert!(canned(Domain::Book).iter().all(|i| i.author.is_some()));
        assert!(canned(Domain::Anime).iter().all(|i| i.episodes.is_some()));
    }

    #[test]
    fn test_request_body_shape() {
        let request = RecommendationRequest {
            domain: Domain::Anime,
            favorites: vec!["Mushishi".to_string()],
            preferences: RequestPreferences {
                genre: "fantasy".to_string(),
                mood: "short".to_string(),
                era: String::new(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "anime",
                "favorites": ["Mushishi"],
                "preferences": {"genre": "fantasy", "mood": "short", "era": ""}
            })
        );
    }
}
