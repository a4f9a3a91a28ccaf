//! Error types for the token ledger

use crate::TokenAmount;
use thiserror::Error;

/// Failures raised by ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("Insufficient allowance: need {needed}, approved {available}")]
    InsufficientAllowance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
