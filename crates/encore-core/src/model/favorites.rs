use serde::{Deserialize, Serialize};

use crate::error::{Result, WizardError};

/// Most titles a user may seed a request with.
pub const MAX_FAVORITES: usize = 5;

/// Ordered, bounded list of user-entered titles.
///
/// Entries are stored trimmed and are never empty. Duplicates are allowed.
/// Deserializing goes through [`FavoriteList::add`], so a stored list obeys
/// the same rules as one built by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct FavoriteList(Vec<String>);

impl TryFrom<Vec<String>> for FavoriteList {
    type Error = WizardError;

    fn try_from(titles: Vec<String>) -> Result<Self> {
        let mut list = Self::new();
        for title in &titles {
            list.add(title)?;
        }
        Ok(list)
    }
}

impl From<FavoriteList> for Vec<String> {
    fn from(list: FavoriteList) -> Self {
        list.0
    }
}

impl FavoriteList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a title.
    ///
    /// # Errors
    ///
    /// [`WizardError::EmptyTitle`] if `title` is blank after trimming,
    /// [`WizardError::FavoritesFull`] if the list already holds
    /// [`MAX_FAVORITES`] entries. The list is unchanged on error.
    pub fn add(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WizardError::EmptyTitle);
        }
        if self.is_full() {
            return Err(WizardError::FavoritesFull { max: MAX_FAVORITES });
        }
        self.0.push(title.to_string());
        Ok(())
    }

    /// Remove the entry at `index`, returning it. Out-of-range indices are
    /// ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_FAVORITES
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
