mod favorites;
mod preferences;
mod recommendation;

pub use favorites::{FavoriteList, MAX_FAVORITES};
pub use preferences::{PreferenceSet, RequestPreferences};
pub use recommendation::{
    canned, loose_id, whole_year, RecommendationItem, RecommendationRequest, Recommendations,
};
