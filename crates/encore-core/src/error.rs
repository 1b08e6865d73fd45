use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("title is empty")]
    EmptyTitle,

    #[error("favorites are full ({max} maximum)")]
    FavoritesFull { max: usize },

    #[error("add at least one favorite before continuing")]
    NoFavorites,

    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    #[error("unknown preference field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, WizardError>;
