//! The module contains the errors the engine can throw.
//!
//! Every operation is terminal on failure: a rejected operation leaves no
//! stored side effects, and the caller decides how to surface the message.

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A referenced entity is absent, by id or by unique field.
    #[error("{0}")]
    NotFound(String),
    /// A normalized unique field collides with another record.
    #[error("{0}")]
    Duplicate(String),
    /// A business rule was violated, e.g. an expense exceeding the balance.
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Duplicate(a), Self::Duplicate(b)) => a == b,
            (Self::InvalidRequest(a), Self::InvalidRequest(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
