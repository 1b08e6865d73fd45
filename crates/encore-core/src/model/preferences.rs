use serde::{Deserialize, Serialize};

use crate::domain::PreferenceKey;

/// Optional preference answers keyed by [`PreferenceKey`]. Unanswered
/// fields hold the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    pub name: String,
    pub genre: String,
    pub era: String,
    pub mood: String,
}

impl PreferenceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite one field. Any string is accepted, including the empty one.
    pub fn set(&mut self, key: PreferenceKey, value: impl Into<String>) {
        *self.slot_mut(key) = value.into();
    }

    pub fn get(&self, key: PreferenceKey) -> &str {
        match key {
            PreferenceKey::Name => &self.name,
            PreferenceKey::Genre => &self.genre,
            PreferenceKey::Era => &self.era,
            PreferenceKey::Mood => &self.mood,
        }
    }

    pub fn is_blank(&self) -> bool {
        PreferenceKey::ALL.iter().all(|key| self.get(*key).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The subset sent to the recommendation service. The user's name is
    /// only used locally.
    pub fn to_request(&self) -> RequestPreferences {
        RequestPreferences {
            genre: self.genre.clone(),
            mood: self.mood.clone(),
            era: self.era.clone(),
        }
    }

    fn slot_mut(&mut self, key: PreferenceKey) -> &mut String {
        match key {
            PreferenceKey::Name => &mut self.name,
            PreferenceKey::Genre => &mut self.genre,
            PreferenceKey::Era => &mut self.era,
            PreferenceKey::Mood => &mut self.mood,
        }
    }
}

/// Preferences as they appear in a recommendation request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPreferences {
    pub genre: String,
    pub mood: String,
    pub era: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let prefs = PreferenceSet::new();
        assert!(prefs.is_blank());
        for key in PreferenceKey::ALL {
            assert_eq!(prefs.get(key), "");
        }
    }

    #[test]
    fn test_set_overwrites() {
        let mut prefs = PreferenceSet::new();
        prefs.set(PreferenceKey::Genre, "drama");
        prefs.set(PreferenceKey::Genre, "horror");
        assert_eq!(prefs.genre, "horror");
        prefs.set(PreferenceKey::Genre, "");
        assert!(prefs.is_blank());
    }

    #[test]
    fn test_to_request_drops_name() {
        let mut prefs = PreferenceSet::new();
        prefs.set(PreferenceKey::Name, "Ada");
        prefs.set(PreferenceKey::Era, "modern");
        let json = serde_json::to_value(prefs.to_request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"genre": "", "mood": "", "era": "modern"})
        );
    }
}
