//! Page navigation between the landing page and the domain wizards.
//!
//! The router owns one [`Wizard`] per domain. What happens to a wizard's
//! state when the user navigates away is governed by a [`LeavePolicy`]:
//! either the state is kept for when the user returns, or leaving a wizard
//! with progress requires an explicit confirmation and then discards it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Domain, DomainProfile};
use crate::wizard::Wizard;

/// A screen the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    Wizard(Domain),
}

/// What to do with a wizard's state when navigating away from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeavePolicy {
    /// Keep the wizard as it is; returning resumes where the user left off.
    Preserve,
    /// Ask before leaving a wizard with progress, then start it over.
    #[default]
    Confirm,
}

impl fmt::Display for LeavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Preserve => "preserve",
            Self::Confirm => "confirm",
        })
    }
}

impl FromStr for LeavePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "confirm" => Ok(Self::Confirm),
            other => Err(format!(
                "unknown leave policy '{other}' (expected 'preserve' or 'confirm')"
            )),
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The router now shows the requested page.
    Moved,
    /// The requested page is already showing.
    Unchanged,
    /// Leaving `leaving` would discard progress; call
    /// [`Router::confirm_leave`] or [`Router::cancel_leave`].
    NeedsConfirmation { leaving: Domain, target: Page },
}

#[derive(Debug)]
pub struct Router {
    page: Page,
    policy: LeavePolicy,
    wizards: [Wizard; 3],
    pending: Option<Page>,
}

impl Router {
    #[must_use]
    pub fn new(policy: LeavePolicy) -> Self {
        Self {
            page: Page::Landing,
            policy,
            wizards: Domain::ALL.map(Wizard::new),
            pending: None,
        }
    }

    pub fn current(&self) -> Page {
        self.page
    }

    pub fn policy(&self) -> LeavePolicy {
        self.policy
    }

    /// The page waiting on a leave confirmation, if any.
    pub fn pending(&self) -> Option<Page> {
        self.pending
    }

    /// Landing-page cards in display order.
    pub fn sections(&self) -> [&'static DomainProfile; 3] {
        Domain::ALL.map(Domain::profile)
    }

    pub fn wizard(&self, domain: Domain) -> &Wizard {
        &self.wizards[slot(domain)]
    }

    pub fn wizard_mut(&mut self, domain: Domain) -> &mut Wizard {
        &mut self.wizards[slot(domain)]
    }

    pub fn active_wizard(&self) -> Option<&Wizard> {
        match self.page {
            Page::Wizard(domain) => Some(self.wizard(domain)),
            Page::Landing => None,
        }
    }

    pub fn active_wizard_mut(&mut self) -> Option<&mut Wizard> {
        match self.page {
            Page::Wizard(domain) => Some(self.wizard_mut(domain)),
            Page::Landing => None,
        }
    }

    /// Open the wizard for `domain`.
    pub fn select(&mut self, domain: Domain) -> Navigation {
        self.navigate(Page::Wizard(domain))
    }

    /// Return to the landing page.
    pub fn logo_click(&mut self) -> Navigation {
        self.navigate(Page::Landing)
    }

    pub fn navigate(&mut self, target: Page) -> Navigation {
        if target == self.page {
            return Navigation::Unchanged;
        }

        if let Page::Wizard(leaving) = self.page {
            if self.policy == LeavePolicy::Confirm && self.wizard(leaving).has_progress() {
                log::debug!("leaving {} needs confirmation", leaving);
                self.pending = Some(target);
                return Navigation::NeedsConfirmation { leaving, target };
            }
        }

        self.pending = None;
        self.page = target;
        Navigation::Moved
    }

    /// Discard the current wizard's progress and complete the pending
    /// navigation. Returns the page now showing, or `None` if nothing was
    /// pending.
    pub fn confirm_leave(&mut self) -> Option<Page> {
        let target = self.pending.take()?;
        if let Page::Wizard(leaving) = self.page {
            log::info!("discarding {} wizard progress", leaving);
            self.wizard_mut(leaving).reset();
        }
        self.page = target;
        Some(target)
    }

    pub fn cancel_leave(&mut self) {
        self.pending = None;
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(LeavePolicy::default())
    }
}

const fn slot(domain: Domain) -> usize {
    match domain {
        Domain::Movie => 0,
        Domain::Anime => 1,
        Domain::Book => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_landing() {
        let router = Router::default();
        assert_eq!(router.current(), Page::Landing);
        assert!(router.active_wizard().is_none());
        assert_eq!(router.policy(), LeavePolicy::Confirm);
    }

    #[test]
    fn test_sections_order() {
        let router = Router::default();
        let titles: Vec<_> = router.sections().iter().map(|p| p.title).collect();
        assert_eq!(titles, ["Movies & TV Shows", "Anime", "Books"]);
    }

    #[test]
    fn test_wizards_are_isolated() {
        let mut router = Router::new(LeavePolicy::Preserve);
        router.select(Domain::Movie);
        router.active_wizard_mut().unwrap().add("Heat").unwrap();
        assert!(router.wizard(Domain::Anime).favorites().is_empty());
        assert!(router.wizard(Domain::Book).favorites().is_empty());
    }

    #[test]
    fn test_select_same_page_is_unchanged() {
        let mut router = Router::default();
        assert_eq!(router.select(Domain::Book), Navigation::Moved);
        assert_eq!(router.select(Domain::Book), Navigation::Unchanged);
    }

    #[test]
    fn test_preserve_keeps_state() {
        let mut router = Router::new(LeavePolicy::Preserve);
        router.select(Domain::Anime);
        router.wizard_mut(Domain::Anime).add("Mushishi").unwrap();

        assert_eq!(router.logo_click(), Navigation::Moved);
        assert_eq!(router.current(), Page::Landing);

        router.select(Domain::Anime);
        assert_eq!(router.active_wizard().unwrap().favorites().len(), 1);
    }

    #[test]
    fn test_confirm_without_progress_moves_freely() {
        let mut router = Router::new(LeavePolicy::Confirm);
        router.select(Domain::Movie);
        assert_eq!(router.logo_click(), Navigation::Moved);
    }

    #[test]
    fn test_confirm_policy_asks_then_discards() {
        let mut router = Router::new(LeavePolicy::Confirm);
        router.select(Domain::Movie);
        router.wizard_mut(Domain::Movie).add("Heat").unwrap();

        let nav = router.logo_click();
        assert_eq!(
            nav,
            Navigation::NeedsConfirmation {
                leaving: Domain::Movie,
                target: Page::Landing
            }
        );
        assert_eq!(router.current(), Page::Wizard(Domain::Movie));
        assert_eq!(router.pending(), Some(Page::Landing));

        assert_eq!(router.confirm_leave(), Some(Page::Landing));
        assert_eq!(router.current(), Page::Landing);
        assert!(router.wizard(Domain::Movie).favorites().is_empty());
        assert!(router.pending().is_none());
    }

    #[test]
    fn test_cancel_leave_keeps_state() {
        let mut router = Router::new(LeavePolicy::Confirm);
        router.select(Domain::Book);
        router.wizard_mut(Domain::Book).set_draft("Dune");

        router.select(Domain::Anime);
        router.cancel_leave();

        assert_eq!(router.current(), Page::Wizard(Domain::Book));
        assert_eq!(router.wizard(Domain::Book).draft(), "Dune");
        assert_eq!(router.confirm_leave(), None);
    }

    #[test]
    fn test_switch_between_wizards_with_confirmation() {
        let mut router = Router::new(LeavePolicy::Confirm);
        router.select(Domain::Book);
        router.wizard_mut(Domain::Book).add("Dune").unwrap();

        assert!(matches!(
            router.select(Domain::Anime),
            Navigation::NeedsConfirmation { .. }
        ));
        assert_eq!(router.confirm_leave(), Some(Page::Wizard(Domain::Anime)));
        assert!(router.wizard(Domain::Book).favorites().is_empty());
    }

    #[test]
    fn test_leave_policy_from_str() {
        assert_eq!("Preserve".parse::<LeavePolicy>(), Ok(LeavePolicy::Preserve));
        assert_eq!("confirm".parse::<LeavePolicy>(), Ok(LeavePolicy::Confirm));
        assert!("discard".parse::<LeavePolicy>().is_err());
    }
}
