//! Observations emitted for external watchers
//!
//! The court appends one event per externally visible state change to an
//! in-memory buffer; the embedding application drains it. Emission also
//! produces a structured tracing record at the call site.

use crate::{case::Vote, CaseId};
use serde::{Deserialize, Serialize};
use tribunal_token::{Address, TokenAmount};

/// Externally visible state changes, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtEvent {
    /// A juror staked and joined the pool
    JurorRegistered {
        juror: Address,
        stake: TokenAmount,
    },

    /// A juror left the pool and was refunded
    JurorUnregistered {
        juror: Address,
        refund: TokenAmount,
    },

    /// A plaintiff filed a case and a jury was seated
    CaseCreated {
        case_id: CaseId,
        plaintiff: Address,
        defendant: Address,
        evidence_cid: String,
        filing_fee: TokenAmount,
    },

    /// A juror committed a hidden vote
    VoteCommitted { case_id: CaseId, juror: Address },

    /// A juror disclosed their vote
    VoteRevealed {
        case_id: CaseId,
        juror: Address,
        vote: Vote,
    },

    /// A verdict was executed and the round settled
    CaseResolved {
        case_id: CaseId,
        winner: Address,
        plaintiff_reward: TokenAmount,
        defendant_reward: TokenAmount,
        juror_reward_total: TokenAmount,
    },

    /// The losing party escalated to an appeal round
    AppealInitiated {
        case_id: CaseId,
        appellant: Address,
        deposit: TokenAmount,
    },

    /// The appeal round settled, confirming or flipping the winner
    AppealResolved {
        case_id: CaseId,
        winner: Address,
        appeal_succeeded: bool,
    },

    /// A revealed voter's history was folded into their record
    ReputationUpdated {
        juror: Address,
        score: u8,
        correct_votes: u64,
        total_votes: u64,
    },

    /// A minority voter's stake was docked
    JurorPenalized {
        juror: Address,
        amount: TokenAmount,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize() {
        let event = CourtEvent::AppealResolved {
            case_id: 1,
            winner: Address::new([0xAA; 20]),
            appeal_succeeded: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: CourtEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
