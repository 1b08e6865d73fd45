//! Recommendation domains and the vocabulary that distinguishes them.
//!
//! Every domain runs the same wizard. What changes between them is captured
//! here as static data: the landing card, the nouns used in prompts, and the
//! schema of the optional preference form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// A kind of entertainment the hub can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Movie,
    Anime,
    Book,
}

impl Domain {
    /// All domains in landing-page order.
    pub const ALL: [Domain; 3] = [Domain::Movie, Domain::Anime, Domain::Book];

    /// Value sent as `type` in a recommendation request.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Anime => "anime",
            Self::Book => "book",
        }
    }

    /// Value sent as `type` in a search query. The search endpoint uses
    /// plural collection names.
    pub const fn search_name(self) -> &'static str {
        match self {
            Self::Movie => "movies",
            Self::Anime => "anime",
            Self::Book => "books",
        }
    }

    pub fn profile(self) -> &'static DomainProfile {
        match self {
            Self::Movie => &MOVIE,
            Self::Anime => &ANIME,
            Self::Book => &BOOK,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Domain {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "anime" => Ok(Self::Anime),
            "book" | "books" => Ok(Self::Book),
            other => Err(WizardError::UnknownDomain(other.to_string())),
        }
    }
}

/// One of the fixed keys of a [`PreferenceSet`](crate::model::PreferenceSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceKey {
    Name,
    Genre,
    Era,
    /// Mood for movies and books; preferred series length for anime.
    Mood,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 4] = [Self::Name, Self::Genre, Self::Era, Self::Mood];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Genre => "genre",
            Self::Era => "era",
            Self::Mood => "mood",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WizardError::UnknownField(s.to_string()))
    }
}

/// How a preference field is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text input.
    Text { placeholder: &'static str },
    /// A pick list. `options` holds `(value, label)` pairs; the empty value
    /// (shown as `prompt`) means "no preference".
    Choice {
        prompt: &'static str,
        options: &'static [(&'static str, &'static str)],
    },
}

/// A single entry in a domain's preference form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceField {
    pub key: PreferenceKey,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl PreferenceField {
    /// Human-readable label for a stored value, falling back to the raw
    /// value for free text or values outside the option list.
    pub fn display_value<'a>(&self, value: &'a str) -> &'a str {
        match self.kind {
            FieldKind::Text { .. } => value,
            FieldKind::Choice { prompt, options } => {
                if value.is_empty() {
                    return prompt;
                }
                options
                    .iter()
                    .find(|(v, _)| *v == value)
                    .map(|(_, label)| *label)
                    .unwrap_or(value)
            }
        }
    }

    /// Step through the option list from `current`, wrapping through the
    /// empty "no preference" slot. Text fields return `current` unchanged.
    pub fn cycle(&self, current: &str, forward: bool) -> String {
        let FieldKind::Choice { options, .. } = self.kind else {
            return current.to_string();
        };
        // Slot 0 is the empty value, slots 1..=n are the options.
        let slots = options.len() + 1;
        let position = options
            .iter()
            .position(|(v, _)| *v == current)
            .map_or(0, |i| i + 1);
        let next = if forward {
            (position + 1) % slots
        } else {
            (position + slots - 1) % slots
        };
        if next == 0 {
            String::new()
        } else {
            options[next - 1].0.to_string()
        }
    }
}

/// Static vocabulary for a domain.
#[derive(Debug)]
pub struct DomainProfile {
    pub domain: Domain,
    /// Landing card title.
    pub title: &'static str,
    /// Landing card description.
    pub description: &'static str,
    pub icon: &'static str,
    pub noun: &'static str,
    pub noun_plural: &'static str,
    pub title_placeholder: &'static str,
    pub results_heading: &'static str,
    pub results_subtitle: &'static str,
    /// Label on the submit action of the preference step.
    pub submit_label: &'static str,
    pub fields: &'static [PreferenceField],
}

impl DomainProfile {
    pub fn field(&self, key: PreferenceKey) -> Option<&PreferenceField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

const NAME_FIELD: PreferenceField = PreferenceField {
    key: PreferenceKey::Name,
    label: "Your Name",
    kind: FieldKind::Text {
        placeholder: "Enter your name",
    },
};

static MOVIE: DomainProfile = DomainProfile {
    domain: Domain::Movie,
    title: "Movies & TV Shows",
    description: "Discover and get recommendations for your next favorite movie or TV show",
    icon: "🎬",
    noun: "movie",
    noun_plural: "movies",
    title_placeholder: "Enter movie title",
    results_heading: "Your Personalized Movie Recommendations",
    results_subtitle: "Based on your choices, we think you'll love these",
    submit_label: "Get Your Movies",
    fields: &[
        NAME_FIELD,
        PreferenceField {
            key: PreferenceKey::Genre,
            label: "Favorite Genre",
            kind: FieldKind::Choice {
                prompt: "Select a genre",
                options: &[
                    ("action", "Action"),
                    ("comedy", "Comedy"),
                    ("drama", "Drama"),
                    ("sci-fi", "Sci-Fi"),
                    ("horror", "Horror"),
                    ("romance", "Romance"),
                    ("thriller", "Thriller"),
                    ("animated", "Animated"),
                ],
            },
        },
        PreferenceField {
            key: PreferenceKey::Era,
            label: "Preferred Era",
            kind: FieldKind::Choice {
                prompt: "Select an era",
                options: &[
                    ("classic", "Classic (pre-1970s)"),
                    ("70s-80s", "70s-80s"),
                    ("90s-00s", "90s-00s"),
                    ("modern", "Modern (2010s+)"),
                    ("any", "Any era"),
                ],
            },
        },
        PreferenceField {
            key: PreferenceKey::Mood,
            label: "Current Mood",
            kind: FieldKind::Choice {
                prompt: "How are you feeling?",
                options: &[
                    ("happy", "Happy"),
                    ("relaxed", "Relaxed"),
                    ("thoughtful", "Thoughtful"),
                    ("excited", "Excited"),
                    ("nostalgic", "Nostalgic"),
                ],
            },
        },
    ],
};

static ANIME: DomainProfile = DomainProfile {
    domain: Domain::Anime,
    title: "Anime",
    description: "Explore anime recommendations and find your next binge-worthy series",
    icon: "🎌",
    noun: "anime",
    noun_plural: "anime",
    title_placeholder: "Enter anime title",
    results_heading: "Your Personalized Anime Recommendations",
    results_subtitle: "Based on your choices, we think you'll love these anime series",
    submit_label: "Get Your Anime",
    fields: &[
        NAME_FIELD,
        PreferenceField {
            key: PreferenceKey::Genre,
            label: "Favorite Genre",
            kind: FieldKind::Choice {
                prompt: "Select a genre",
                options: &[
                    ("action", "Action"),
                    ("adventure", "Adventure"),
                    ("comedy", "Comedy"),
                    ("drama", "Drama"),
                    ("fantasy", "Fantasy"),
                    ("horror", "Horror"),
                    ("isekai", "Isekai"),
                    ("mecha", "Mecha"),
                    ("romance", "Romance"),
                    ("scifi", "Sci-Fi"),
                    ("slice", "Slice of Life"),
                    ("sports", "Sports"),
                    ("supernatural", "Supernatural"),
                ],
            },
        },
        PreferenceField {
            key: PreferenceKey::Era,
            label: "Preferred Era",
            kind: FieldKind::Choice {
                prompt: "Select an era",
                options: &[
                    ("classic", "Classic (pre-2000s)"),
                    ("2000s", "2000s"),
                    ("2010s", "2010s"),
                    ("recent", "Recent (2020+)"),
                    ("any", "Any era"),
                ],
            },
        },
        PreferenceField {
            key: PreferenceKey::Mood,
            label: "Anime Length Preference",
            kind: FieldKind::Choice {
                prompt: "How long do you prefer?",
                options: &[
                    ("short", "Short (1-12 episodes)"),
                    ("medium", "Medium (13-24 episodes)"),
                    ("long", "Long (25-50 episodes)"),
                    ("very-long", "Very long (50+ episodes)"),
                    ("any", "Any length"),
                ],
            },
        },
    ],
};

static BOOK: DomainProfile = DomainProfile {
    domain: Domain::Book,
    title: "Books",
    description: "Find your next great read with personalized book recommendations",
    icon: "📚",
    noun: "book",
    noun_plural: "books",
    title_placeholder: "Enter book title",
    results_heading: "Your Personalized Book Recommendations",
    results_subtitle: "Based on your reading choices, we think you'll love these",
    submit_label: "Get Your Books",
    fields: &[
        NAME_FIELD,
        PreferenceField {
            key: PreferenceKey::Genre,
            label: "Favorite Genre",
            kind: FieldKind::Choice {
                prompt: "Select a genre",
                options: &[
                    ("fiction", "Fiction"),
                    ("fantasy", "Fantasy"),
                    ("scifi", "Science Fiction"),
                    ("mystery", "Mystery/Thriller"),
                    ("romance", "Romance"),
                    ("historical", "Historical Fiction"),
                    ("biography", "Biography/Memoir"),
                    ("nonfiction", "Non-Fiction"),
                ],
            },
        },
        PreferenceField {
            key: PreferenceKey::Era,
            label: "Preferred Era",
            kind: FieldKind::Choice {
                prompt: "Select an era",
                options: &[
                    ("classic", "Classics (pre-1950s)"),
                    ("mid-century", "Mid-Century (1950-1980)"),
                    ("modern", "Modern (1980-2010)"),
                    ("contemporary", "Contemporary (2010+)"),
                    ("any", "Any era"),
                ],
            },
        },
        PreferenceField {
            key: PreferenceKey::Mood,
            label: "Current Reading Mood",
            kind: FieldKind::Choice {
                prompt: "What are you in the mood for?",
                options: &[
                    ("light", "Light & Easy"),
                    ("thought-provoking", "Thought-Provoking"),
                    ("escape", "Escapism"),
                    ("learn", "Learning Something New"),
                    ("emotional", "Emotional Journey"),
                    ("adventurous", "Adventure"),
                ],
            },
        },
    ],
};
