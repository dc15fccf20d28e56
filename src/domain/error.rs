//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::grammar::Rejection;

/// Domain errors represent violations of the SAN transcript grammar.
///
/// The `Display` text is the diagnostic surfaced to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("expected turn marker at '{token}'")]
    MissingTurnMarker { token: String },

    #[error("missing white move in turn {turn}")]
    MissingWhiteMove { turn: u64 },

    #[error("invalid white move: '{token}' in turn {turn}")]
    InvalidWhiteMove {
        token: String,
        turn: u64,
        reason: Rejection,
    },

    #[error("invalid black move: '{token}' in turn {turn}")]
    InvalidBlackMove {
        token: String,
        turn: u64,
        reason: Rejection,
    },

    #[error("turn out of sequence: expected {expected}, found '{token}'")]
    TurnOutOfSequence { expected: u64, token: String },
}

impl DomainError {
    /// Turn number the violation was detected in, if known.
    pub fn turn(&self) -> Option<u64> {
        match self {
            DomainError::MissingWhiteMove { turn }
            | DomainError::InvalidWhiteMove { turn, .. }
            | DomainError::InvalidBlackMove { turn, .. } => Some(*turn),
            DomainError::MissingTurnMarker { .. } | DomainError::TurnOutOfSequence { .. } => None,
        }
    }

    /// Offending token text, if the violation names one.
    pub fn token(&self) -> Option<&str> {
        match self {
            DomainError::MissingTurnMarker { token }
            | DomainError::InvalidWhiteMove { token, .. }
            | DomainError::InvalidBlackMove { token, .. }
            | DomainError::TurnOutOfSequence { token, .. } => Some(token),
            DomainError::MissingWhiteMove { .. } => None,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
