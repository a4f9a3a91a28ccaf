//! Juror reputation and the dynamic-penalty pipeline

use crate::constants::{
    ESCALATION_RATE, HIGH_REPUTATION_DISCOUNT, HIGH_REPUTATION_THRESHOLD, INITIAL_REPUTATION,
    MAX_PENALTY_RATE, MAX_REPUTATION, NOVICE_VOTE_THRESHOLD, REPUTATION_GAIN, REPUTATION_LOSS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tribunal_token::{Address, TokenAmount};

/// A juror's voting history
///
/// Created lazily on first vote and never destroyed; it survives
/// unregistration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationRecord {
    /// Votes that matched the verdict
    pub correct_votes: u64,

    /// All revealed votes
    pub total_votes: u64,

    /// Bounded trust score in `[0, 100]`
    pub reputation_score: u8,

    /// Wrong votes since the last correct one
    pub consecutive_wrong: u32,
}

impl Default for ReputationRecord {
    fn default() -> Self {
        Self {
            correct_votes: 0,
            total_votes: 0,
            reputation_score: INITIAL_REPUTATION,
            consecutive_wrong: 0,
        }
    }
}

impl ReputationRecord {
    /// Share of votes that matched the verdict, in percent
    pub fn accuracy_rate(&self) -> u8 {
        if self.total_votes == 0 {
            return 0;
        }
        ((self.correct_votes * 100) / self.total_votes) as u8
    }

    /// Snapshot consumed by the penalty pipeline
    pub fn penalty_context(&self) -> PenaltyContext {
        PenaltyContext {
            total_votes: self.total_votes,
            reputation_score: self.reputation_score,
            consecutive_wrong: self.consecutive_wrong,
        }
    }
}

/// Reputation store keyed by juror address
#[derive(Debug, Clone, Default)]
pub struct ReputationBook {
    records: HashMap<Address, ReputationRecord>,
}

impl ReputationBook {
    /// Empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// A juror's record, or the fresh default for unknown addresses
    pub fn get(&self, addr: Address) -> ReputationRecord {
        self.records.get(&addr).cloned().unwrap_or_default()
    }

    /// Fold one verdict outcome into a juror's record
    ///
    /// Returns the updated record so the caller can report it.
    pub fn update(&mut self, addr: Address, correct: bool) -> ReputationRecord {
        let record = self.records.entry(addr).or_default();
        record.total_votes += 1;
        if correct {
            record.correct_votes += 1;
            record.consecutive_wrong = 0;
            record.reputation_score =
                (record.reputation_score + REPUTATION_GAIN).min(MAX_REPUTATION);
        } else {
            record.consecutive_wrong += 1;
            record.reputation_score = record.reputation_score.saturating_sub(REPUTATION_LOSS);
        }
        record.clone()
    }
}

/// Immutable juror standing, snapshotted before the round's updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyContext {
    /// Votes on record before this verdict
    pub total_votes: u64,

    /// Score before this verdict
    pub reputation_score: u8,

    /// Wrong streak before this verdict
    pub consecutive_wrong: u32,
}

type Adjustment = fn(&PenaltyContext, TokenAmount) -> TokenAmount;

/// Settlement adjustments in application order
const ADJUSTMENTS: [Adjustment; 3] = [
    novice_protection,
    high_reputation_discount,
    consecutive_escalation,
];

/// Penalty for a minority vote, in base units
///
/// Starts at `base_amount x penalty_rate`, runs the adjustment pipeline,
/// and clamps the result so it never exceeds `MAX_PENALTY_RATE` of the
/// base amount.
pub fn compute_penalty(
    ctx: &PenaltyContext,
    base_amount: TokenAmount,
    penalty_rate: u8,
) -> TokenAmount {
    let start = percent(base_amount, penalty_rate);
    let adjusted = ADJUSTMENTS
        .iter()
        .fold(start, |amount, adjust| adjust(ctx, amount));
    adjusted.min(percent(base_amount, MAX_PENALTY_RATE))
}

/// Halved penalty for a juror's earliest votes
fn novice_protection(ctx: &PenaltyContext, amount: TokenAmount) -> TokenAmount {
    if ctx.total_votes < NOVICE_VOTE_THRESHOLD {
        amount / 2
    } else {
        amount
    }
}

/// Discount for jurors above the high-reputation threshold
fn high_reputation_discount(ctx: &PenaltyContext, amount: TokenAmount) -> TokenAmount {
    if ctx.reputation_score > HIGH_REPUTATION_THRESHOLD {
        percent(amount, 100 - HIGH_REPUTATION_DISCOUNT)
    } else {
        amount
    }
}

/// Escalation proportional to the wrong streak already on record
fn consecutive_escalation(ctx: &PenaltyContext, amount: TokenAmount) -> TokenAmount {
    let rate = 100 + TokenAmount::from(ESCALATION_RATE) * TokenAmount::from(ctx.consecutive_wrong);
    amount * rate / 100
}

fn percent(amount: TokenAmount, rate: u8) -> TokenAmount {
    amount * TokenAmount::from(rate) / 100
}
