//! Token ledger for the tribunal protocol
//!
//! Holds the fungible balances and spending allowances that back juror
//! stakes, filing fees and appeal deposits. The dispute core never touches
//! balances directly; it goes through the transfer and allowance calls
//! exposed here.

pub mod address;
pub mod error;
pub mod ledger;

pub use address::Address;
pub use error::TokenError;
pub use ledger::TokenLedger;

/// Result type for token operations
pub type Result<T> = std::result::Result<T, TokenError>;

/// Token amount in base units
pub type TokenAmount = u128;

/// Base units per whole token (18 decimals)
pub const UNIT: TokenAmount = 1_000_000_000_000_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_has_18_decimals() {
        assert_eq!(UNIT, 10u128.pow(18));
    }
}
