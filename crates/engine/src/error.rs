//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when user input (name, cost, keypad token) is rejected.
//! - [`PersistenceRead`] thrown when the stored collection can't be read or parsed.
//! - [`PersistenceWrite`] thrown when the storage refuses a write or a clear.
//! - [`EntryNotFound`] thrown when a removal targets an unknown entry.
//! - [`Evaluation`] thrown when the calculator input is not a valid expression.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`PersistenceRead`]: EngineError::PersistenceRead
//!  [`PersistenceWrite`]: EngineError::PersistenceWrite
//!  [`EntryNotFound`]: EngineError::EntryNotFound
//!  [`Evaluation`]: EngineError::Evaluation
use thiserror::Error;

use crate::expr::EvalError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Failed to load data: {0}")]
    PersistenceRead(String),
    #[error("Failed to save data: {0}")]
    PersistenceWrite(String),
    #[error("\"{0}\" entry not found!")]
    EntryNotFound(String),
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::PersistenceRead(a), Self::PersistenceRead(b)) => a == b,
            (Self::PersistenceWrite(a), Self::PersistenceWrite(b)) => a == b,
            (Self::EntryNotFound(a), Self::EntryNotFound(b)) => a == b,
            (Self::Evaluation(a), Self::Evaluation(b)) => a == b,
            _ => false,
        }
    }
}
