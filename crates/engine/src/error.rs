//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`MissingField`] thrown when a required input is absent or empty.
//! - [`InvalidAmount`] thrown when an amount is not a finite number.
//! - [`InvalidInput`] thrown when an id is not an integer.
//! - [`ExistingKey`] thrown when a username is already taken.
//! - [`KeyNotFound`] thrown when an item is not found.
//!
//! The remaining variants wrap failures of the collaborators (database,
//! password hasher, blocking pool) and are never shown to clients.
//!
//!  [`MissingField`]: EngineError::MissingField
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    MissingField(String),
    #[error("{0}")]
    InvalidAmount(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    ExistingKey(String),
    #[error("{0}")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Credentials(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    Task(#[from] tokio::task::JoinError),
}

impl EngineError {
    /// Returns `true` for failures of the collaborators rather than of the
    /// caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Credentials(_) | Self::Task(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::Credentials(a), Self::Credentials(b)) => a.to_string() == b.to_string(),
            (Self::Task(a), Self::Task(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
