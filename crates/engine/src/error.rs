//! The module contains the errors the engine can return.
//!
//! Variants fall into four families:
//!
//! - validation: [`InvalidName`], [`InvalidCurrency`], [`InvalidNote`],
//!   [`InvalidFormat`], [`InvalidRange`], [`InvalidTags`]
//! - range: [`InvalidAmount`]
//! - not found: [`KeyNotFound`]
//! - conflict: [`JournalClosed`], [`JournalOpen`], [`ExistingKey`]
//!
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidCurrency`]: EngineError::InvalidCurrency
//!  [`InvalidNote`]: EngineError::InvalidNote
//!  [`InvalidFormat`]: EngineError::InvalidFormat
//!  [`InvalidRange`]: EngineError::InvalidRange
//!  [`InvalidTags`]: EngineError::InvalidTags
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`JournalClosed`]: EngineError::JournalClosed
//!  [`JournalOpen`]: EngineError::JournalOpen
//!  [`ExistingKey`]: EngineError::ExistingKey
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Invalid note: {0}")]
    InvalidNote(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid tags: {0}")]
    InvalidTags(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Journal closed: {0}")]
    JournalClosed(String),
    #[error("Journal open: {0}")]
    JournalOpen(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::InvalidNote(a), Self::InvalidNote(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidFormat(a), Self::InvalidFormat(b)) => a == b,
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::InvalidTags(a), Self::InvalidTags(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::JournalClosed(a), Self::JournalClosed(b)) => a == b,
            (Self::JournalOpen(a), Self::JournalOpen(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
