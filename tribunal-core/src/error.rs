//! Error types for the dispute court

use crate::{case::CaseStatus, CaseId};
use std::fmt;
use thiserror::Error;
use tribunal_token::TokenError;

/// The deadline-bounded window an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Commitment submission, from round start to the commit deadline
    Commit,
    /// Vote disclosure, from the commit deadline to the reveal deadline
    Reveal,
    /// Appeal filing, from resolution to the appeal deadline
    Appeal,
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Window::Commit => "commit",
            Window::Reveal => "reveal",
            Window::Appeal => "appeal",
        };
        write!(f, "{name}")
    }
}

/// Failures raised by court operations
///
/// Every failure aborts the whole call with no partial state change and is
/// scoped to that call; other cases and jurors are unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourtError {
    #[error("Token ledger error: {0}")]
    Token(#[from] TokenError),

    #[error("Already registered as a juror")]
    AlreadyRegistered,

    #[error("Not registered as a juror")]
    NotRegistered,

    #[error("Juror is serving on an active case")]
    CurrentlyServing,

    #[error("Case {id} does not exist")]
    CaseNotFound { id: CaseId },

    #[error("Defendant must differ from plaintiff")]
    InvalidDefendant,

    #[error("Case is {actual:?}, expected {expected:?}")]
    InvalidCaseStatus {
        expected: CaseStatus,
        actual: CaseStatus,
    },

    #[error("Caller is not on the case's active jury")]
    NotEligibleJuror,

    #[error("Vote already committed this round")]
    AlreadyCommitted,

    #[error("Vote already revealed this round")]
    AlreadyRevealed,

    #[error("No commitment stored for this juror")]
    NoCommitment,

    #[error("The {0} window has closed")]
    WindowClosed(Window),

    #[error("The {0} window has not opened yet")]
    WindowNotYetOpen(Window),

    #[error("Revealed vote and salt do not match the stored commitment")]
    CommitmentMismatch,

    #[error("Invalid vote byte {0}, expected 1 or 2")]
    InvalidVote(u8),

    #[error("Voting is not finished")]
    VotingNotFinished,

    #[error("Insufficient juror pool: need {needed}, have {available}")]
    InsufficientJurorPool { needed: usize, available: usize },

    #[error("Only the losing party may appeal")]
    NotLosingParty,

    #[error("Case has already been appealed")]
    AlreadyAppealed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_convert() {
        let err: CourtError = TokenError::InsufficientAllowance {
            needed: 10,
            available: 0,
        }
        .into();
        assert!(matches!(err, CourtError::Token(_)));
    }

    #[test]
    fn test_window_names() {
        assert_eq!(
            CourtError::WindowClosed(Window::Appeal).to_string(),
            "The appeal window has closed"
        );
        assert_eq!(
            CourtError::WindowNotYetOpen(Window::Reveal).to_string(),
            "The reveal window has not opened yet"
        );
    }
}
