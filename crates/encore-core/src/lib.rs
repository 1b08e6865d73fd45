//! Core domain model for encore.
//!
//! This crate defines the recommendation domains (movies, anime, books) and
//! their preference field schemas, the favorites and preferences a user
//! collects, the generic three-step recommendation wizard, and the page
//! router that switches between the landing page and the wizards.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod domain;
pub mod error;
pub mod model;
pub mod router;
pub mod wizard;

pub use domain::{Domain, DomainProfile, FieldKind, PreferenceField, PreferenceKey};
pub use error::{Result, WizardError};
pub use model::{
    FavoriteList, PreferenceSet, RecommendationItem, RecommendationRequest, Recommendations,
    RequestPreferences, MAX_FAVORITES,
};
pub use router::{LeavePolicy, Navigation, Page, Router};
pub use wizard::{Applied, Notice, Submission, Wizard, WizardState};
