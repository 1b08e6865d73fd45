//! The recommendation wizard.
//!
//! A single state machine drives every domain through the same three steps:
//!
//! 1. collect up to [`MAX_FAVORITES`] favorite titles,
//! 2. collect optional preferences,
//! 3. submit and show the results.
//!
//! The wizard performs no I/O. [`Wizard::begin_submit`] hands out a
//! [`Submission`] carrying the request body and a ticket; whoever runs the
//! request reports back through [`Wizard::finish_submit`] with that ticket.
//! Results for a ticket that is no longer in flight (the user reset or left
//! in the meantime) are dropped.

use std::fmt;

use crate::domain::{Domain, DomainProfile, PreferenceKey};
use crate::error::{Result, WizardError};
use crate::model::{
    FavoriteList, PreferenceSet, RecommendationItem, RecommendationRequest, Recommendations,
    MAX_FAVORITES,
};

/// Where the wizard currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    CollectingTitles,
    CollectingPreferences,
    /// A request is in flight.
    Submitting { ticket: u64 },
    ShowingResults(Recommendations),
    /// The last request failed. The user may retry or go back.
    Failed { reason: String },
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CollectingTitles => "collecting titles",
            Self::CollectingPreferences => "collecting preferences",
            Self::Submitting { .. } => "submitting",
            Self::ShowingResults(_) => "showing results",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Validation feedback shown next to the title input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Blank title submitted, or continue pressed with no favorites.
    EmptyInput,
    /// The favorites list is at capacity.
    MaxReached,
}

impl Notice {
    pub fn message(self, profile: &DomainProfile) -> String {
        match self {
            Self::EmptyInput => format!("Please enter a {} title", profile.noun),
            Self::MaxReached => format!(
                "Maximum of {} {} reached. Remove a {} to add more.",
                MAX_FAVORITES, profile.noun_plural, profile.noun
            ),
        }
    }
}

/// A request handed out by [`Wizard::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub request: RecommendationRequest,
}

/// What [`Wizard::finish_submit`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Shown,
    Failed,
    /// The ticket was not the one in flight; the outcome was discarded.
    Stale,
}

/// One wizard instance, owning all state for a single domain.
#[derive(Debug, Clone)]
pub struct Wizard {
    domain: Domain,
    favorites: FavoriteList,
    preferences: PreferenceSet,
    draft: String,
    state: WizardState,
    notice: Option<Notice>,
    next_ticket: u64,
}

impl Wizard {
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            favorites: FavoriteList::new(),
            preferences: PreferenceSet::new(),
            draft: String::new(),
            state: WizardState::CollectingTitles,
            notice: None,
            next_ticket: 1,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn profile(&self) -> &'static DomainProfile {
        self.domain.profile()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn favorites(&self) -> &FavoriteList {
        &self.favorites
    }

    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Step indicator position (1-3). Submitting and failure are shown on
    /// the results step.
    pub fn step(&self) -> u8 {
        match self.state {
            WizardState::CollectingTitles => 1,
            WizardState::CollectingPreferences => 2,
            WizardState::Submitting { .. }
            | WizardState::ShowingResults(_)
            | WizardState::Failed { .. } => 3,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WizardState::Submitting { .. })
    }

    /// Current results, empty unless the wizard is showing results.
    pub fn recommendations(&self) -> &[RecommendationItem] {
        match &self.state {
            WizardState::ShowingResults(results) => &results.items,
            _ => &[],
        }
    }

    /// Whether leaving this wizard would discard anything the user did.
    pub fn has_progress(&self) -> bool {
        !self.favorites.is_empty()
            || !self.preferences.is_blank()
            || !self.draft.trim().is_empty()
            || !matches!(
                self.state,
                WizardState::CollectingTitles | WizardState::CollectingPreferences
            )
    }

    // -- Step 1: titles ----------------------------------------------------

    /// Replace the title input buffer. Clears an empty-input notice.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        if self.notice == Some(Notice::EmptyInput) {
            self.notice = None;
        }
    }

    /// Append a favorite title.
    ///
    /// Blank titles raise [`Notice::EmptyInput`], a full list raises
    /// [`Notice::MaxReached`]; in both cases the list is untouched.
    pub fn add(&mut self, title: &str) -> Result<()> {
        self.require(
            matches!(self.state, WizardState::CollectingTitles),
            "add a title",
        )?;

        match self.favorites.add(title) {
            Ok(()) => {
                self.notice = self.favorites.is_full().then_some(Notice::MaxReached);
                log::debug!("{}: added favorite {:?}", self.domain, title.trim());
                Ok(())
            }
            Err(err) => {
                self.notice = Some(match err {
                    WizardError::FavoritesFull { .. } => Notice::MaxReached,
                    _ => Notice::EmptyInput,
                });
                Err(err)
            }
        }
    }

    /// Add the current draft and clear it on success.
    pub fn commit_draft(&mut self) -> Result<()> {
        let draft = std::mem::take(&mut self.draft);
        match self.add(&draft) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.draft = draft;
                Err(err)
            }
        }
    }

    /// Remove the favorite at `index`. Clears the max-reached notice.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if self.notice == Some(Notice::MaxReached) {
            self.notice = None;
        }
        self.favorites.remove(index)
    }

    /// Move on to the preference step. Requires at least one favorite.
    pub fn advance(&mut self) -> Result<()> {
        self.require(
            matches!(self.state, WizardState::CollectingTitles),
            "continue",
        )?;
        if self.favorites.is_empty() {
            self.notice = Some(Notice::EmptyInput);
            return Err(WizardError::NoFavorites);
        }
        self.notice = None;
        self.state = WizardState::CollectingPreferences;
        Ok(())
    }

    // -- Step 2: preferences -----------------------------------------------

    /// Overwrite one preference. No validation is applied.
    pub fn set_field(&mut self, key: PreferenceKey, value: impl Into<String>) {
        self.preferences.set(key, value);
    }

    /// Step back one screen.
    ///
    /// Preferences return to titles; results and failures return to
    /// preferences so the request can be adjusted.
    pub fn back(&mut self) -> Result<()> {
        self.state = match self.state {
            WizardState::CollectingPreferences => WizardState::CollectingTitles,
            WizardState::ShowingResults(_) | WizardState::Failed { .. } => {
                WizardState::CollectingPreferences
            }
            WizardState::CollectingTitles | WizardState::Submitting { .. } => {
                return Err(WizardError::InvalidTransition {
                    from: self.state.name(),
                    action: "go back",
                });
            }
        };
        Ok(())
    }

    // -- Step 3: submission ------------------------------------------------

    /// Enter the submitting state and return the request to run.
    ///
    /// Allowed from the preference step and as a retry after a failure.
    /// A second call while a request is in flight is rejected.
    pub fn begin_submit(&mut self) -> Result<Submission> {
        match self.state {
            WizardState::Submitting { .. } => return Err(WizardError::AlreadySubmitting),
            WizardState::CollectingPreferences | WizardState::Failed { .. } => {}
            _ => {
                return Err(WizardError::InvalidTransition {
                    from: self.state.name(),
                    action: "submit",
                })
            }
        }
        if self.favorites.is_empty() {
            return Err(WizardError::NoFavorites);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state = WizardState::Submitting { ticket };
        log::info!(
            "{}: submitting {} favorites (ticket {})",
            self.domain,
            self.favorites.len(),
            ticket
        );

        Ok(Submission {
            ticket,
            request: self.request(),
        })
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// On success the wizard shows the results; on failure it moves to
    /// [`WizardState::Failed`] and never stays loading.
    pub fn finish_submit<E: fmt::Display>(
        &mut self,
        ticket: u64,
        outcome: std::result::Result<Vec<RecommendationItem>, E>,
    ) -> Applied {
        match self.state {
            WizardState::Submitting { ticket: current } if current == ticket => {}
            _ => {
                log::debug!("{}: dropping stale result for ticket {}", self.domain, ticket);
                return Applied::Stale;
            }
        }

        match outcome {
            Ok(items) => {
                log::info!("{}: received {} recommendations", self.domain, items.len());
                self.state = WizardState::ShowingResults(Recommendations::new(items));
                Applied::Shown
            }
            Err(err) => {
                log::warn!("{}: recommendation request failed: {}", self.domain, err);
                self.state = WizardState::Failed {
                    reason: err.to_string(),
                };
                Applied::Failed
            }
        }
    }

    /// Start over: clear favorites, preferences, input, feedback and
    /// results, and return to the first step.
    pub fn reset(&mut self) {
        self.favorites.clear();
        self.preferences.clear();
        self.draft.clear();
        self.notice = None;
        self.state = WizardState::CollectingTitles;
    }

    /// The request body for the current favorites and preferences.
    pub fn request(&self) -> RecommendationRequest {
        RecommendationRequest {
            domain: self.domain,
            favorites: self.favorites.as_slice().to_vec(),
            preferences: self.preferences.to_request(),
        }
    }

    fn require(&self, ok: bool, action: &'static str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.state.name(),
                action,
            })
        }
    }
}
