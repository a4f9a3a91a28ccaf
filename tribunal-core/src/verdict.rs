//! Verdict tallying and economic settlement
//!
//! A round's pot is its fee component (filing fee on the first round, the
//! forfeited deposit on a failed appeal, nothing on a successful one) plus
//! every penalty collected from minority voters. The winning party takes
//! the winner share of the pot; majority jurors split the remainder
//! equally, with the sub-unit remainder left in the court treasury.

use crate::{
    case::{Case, CaseStatus, Vote},
    config::CourtConfig,
    constants::WINNER_SHARE,
    jury::JurorPool,
    reputation::{compute_penalty, ReputationBook},
};
use tribunal_token::{Address, TokenAmount};

/// Computed outcome of one voting round, ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Side the revealed majority favored
    pub winner_side: Vote,

    /// Party on the winning side
    pub winner: Address,

    /// Jurors who revealed with the majority, in jury order
    pub majority: Vec<Address>,

    /// Jurors who revealed with the minority, with their stake penalties
    pub penalties: Vec<(Address, TokenAmount)>,

    /// Reward paid to the plaintiff
    pub plaintiff_reward: TokenAmount,

    /// Reward paid to the defendant
    pub defendant_reward: TokenAmount,

    /// Reward paid to each majority juror
    pub juror_share: TokenAmount,

    /// Total paid across all majority jurors
    pub juror_reward_total: TokenAmount,

    /// Deposit returned to the appellant on a successful appeal
    pub deposit_refund: TokenAmount,

    /// Appeal outcome; `None` on a first-round verdict
    pub appeal_succeeded: Option<bool>,
}

/// Compute a round's settlement without mutating anything
///
/// Penalties are computed from reputation state as it stood before this
/// verdict and are clamped to each juror's remaining stake.
pub fn build_settlement(
    case: &Case,
    jurors: &JurorPool,
    reputations: &ReputationBook,
    config: &CourtConfig,
) -> Settlement {
    let winner_side = case.majority_side();
    let winner = case.party(winner_side);
    let (majority, minority) = split_revealed(case, winner_side);

    let mut penalties = Vec::with_capacity(minority.len());
    let mut penalty_total: TokenAmount = 0;
    for addr in minority {
        let record = reputations.get(addr);
        let computed = compute_penalty(
            &record.penalty_context(),
            config.juror_stake,
            config.penalty_rate,
        );
        let staked = jurors.get(addr).map_or(0, |j| j.staked_amount);
        let amount = computed.min(staked);
        penalty_total += amount;
        penalties.push((addr, amount));
    }

    let appeal_round = case.status == CaseStatus::Appealing;
    let appeal_succeeded = appeal_round.then(|| case.winner != Some(winner));

    let fee_component = match appeal_succeeded {
        None => case.filing_fee,
        Some(true) => 0,
        Some(false) => case.appeal_deposit,
    };
    let pot = fee_component + penalty_total;

    let winner_reward = pot * TokenAmount::from(WINNER_SHARE) / 100;
    let juror_pool = pot - winner_reward;
    let (juror_share, juror_reward_total) = if majority.is_empty() {
        (0, 0)
    } else {
        let share = juror_pool / majority.len() as TokenAmount;
        (share, share * majority.len() as TokenAmount)
    };

    let deposit_refund = if appeal_succeeded == Some(true) {
        case.appeal_deposit
    } else {
        0
    };

    let (plaintiff_reward, defendant_reward) = match winner_side {
        Vote::ForPlaintiff => (winner_reward, 0),
        Vote::ForDefendant => (0, winner_reward),
    };

    Settlement {
        winner_side,
        winner,
        majority,
        penalties,
        plaintiff_reward,
        defendant_reward,
        juror_share,
        juror_reward_total,
        deposit_refund,
        appeal_succeeded,
    }
}

/// Revealed voters split into majority and minority, in jury order
///
/// Jurors who committed but never revealed land in neither list.
fn split_revealed(case: &Case, winner_side: Vote) -> (Vec<Address>, Vec<Address>) {
    let mut majority = Vec::new();
    let mut minority = Vec::new();
    for addr in &case.jury {
        let revealed = case.votes.get(addr).and_then(|record| record.revealed);
        match revealed {
            Some(vote) if vote == winner_side => majority.push(*addr),
            Some(_) => minority.push(*addr),
            None => {}
        }
    }
    (majority, minority)
}
