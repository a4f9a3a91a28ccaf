//! Appeal escalation for resolved cases
//!
//! The losing party may force one re-trial before a larger jury by paying
//! a deposit. The appeal replaces the voting record and deadlines; the
//! verdict engine settles the second round and decides the deposit's fate.

use crate::{
    case::{Case, CaseStatus},
    config::CourtConfig,
    error::Window,
    CourtError, Result,
};
use tribunal_token::{Address, TokenAmount};

/// Check that the caller may appeal this case right now
///
/// Returns the deposit to debit. The caller must be the losing party of a
/// resolved, never-appealed case inside the appeal window.
pub fn validate_appeal(
    case: &Case,
    caller: Address,
    now: u64,
    config: &CourtConfig,
) -> Result<TokenAmount> {
    match case.status {
        CaseStatus::Resolved => {}
        CaseStatus::Appealing | CaseStatus::AppealResolved => {
            return Err(CourtError::AlreadyAppealed);
        }
        other => {
            return Err(CourtError::InvalidCaseStatus {
                expected: CaseStatus::Resolved,
                actual: other,
            });
        }
    }

    if case.loser() != Some(caller) {
        return Err(CourtError::NotLosingParty);
    }
    if now >= case.appeal_deadline {
        return Err(CourtError::WindowClosed(Window::Appeal));
    }
    Ok(config.appeal_deposit())
}

/// Re-open the case as an appeal round with a fresh jury
///
/// Runs after the deposit debit succeeded; nothing here can fail.
pub fn open_appeal_round(
    case: &mut Case,
    jury: Vec<Address>,
    appellant: Address,
    deposit: TokenAmount,
    now: u64,
    config: &CourtConfig,
) {
    case.open_voting_round(jury, now, config.commit_duration, config.reveal_duration);
    case.is_appealed = true;
    case.appellant = Some(appellant);
    case.appeal_deposit = deposit;
    case.status = CaseStatus::Appealing;
}
