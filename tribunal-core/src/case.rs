//! Case records and the lifecycle state machine

use crate::{voting::Commitment, CaseId, CourtError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tribunal_token::{Address, TokenAmount};

/// Lifecycle states of a case
///
/// Strictly forward-moving: a case never skips a state or moves backward.
/// Resolving is an internal step of verdict execution; callers observe
/// Voting going straight to Resolved (or Appealing to AppealResolved)
/// within one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Filed, jury not yet seated
    Created,
    /// First voting round open
    Voting,
    /// Verdict execution in progress
    Resolving,
    /// First verdict executed, appeal window open
    Resolved,
    /// Appeal round open
    Appealing,
    /// Appeal verdict executed, case closed
    AppealResolved,
}

impl CaseStatus {
    /// Whether commits and reveals are accepted in this state
    pub fn is_voting_round(self) -> bool {
        matches!(self, CaseStatus::Voting | CaseStatus::Appealing)
    }
}

/// A juror's side in a dispute
///
/// Wire encoding is 1 for the plaintiff and 2 for the defendant; 0 is the
/// reserved "none" byte and never decodes to a valid vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    /// Find for the plaintiff
    ForPlaintiff,
    /// Find for the defendant
    ForDefendant,
}

impl Vote {
    /// Fixed-width wire byte of this vote
    pub const fn as_byte(self) -> u8 {
        match self {
            Vote::ForPlaintiff => 1,
            Vote::ForDefendant => 2,
        }
    }

    /// The opposing side
    pub const fn opponent(self) -> Self {
        match self {
            Vote::ForPlaintiff => Vote::ForDefendant,
            Vote::ForDefendant => Vote::ForPlaintiff,
        }
    }
}

impl TryFrom<u8> for Vote {
    type Error = CourtError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            1 => Ok(Vote::ForPlaintiff),
            2 => Ok(Vote::ForDefendant),
            other => Err(CourtError::InvalidVote(other)),
        }
    }
}

/// One juror's commitment and (once disclosed) vote for a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Hash committed during the commit window
    pub commitment: Commitment,

    /// Vote disclosed during the reveal window, if any
    pub revealed: Option<Vote>,
}

impl VoteRecord {
    /// Record a fresh commitment with no reveal
    pub fn new(commitment: Commitment) -> Self {
        Self {
            commitment,
            revealed: None,
        }
    }

    /// Whether the juror disclosed their vote
    pub fn has_revealed(&self) -> bool {
        self.revealed.is_some()
    }
}

/// Full record of a dispute
///
/// Never destroyed; resolved cases remain queryable. Exactly one active
/// jury exists at a time: an appeal replaces the original jury's voting
/// record rather than appending to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// Sequential identifier
    pub id: CaseId,

    /// Party who filed the case
    pub plaintiff: Address,

    /// Party the case is filed against
    pub defendant: Address,

    /// Content identifier of the filed evidence
    pub evidence_cid: String,

    /// Current lifecycle state
    pub status: CaseStatus,

    /// Fee debited from the plaintiff at filing
    pub filing_fee: TokenAmount,

    /// Jurors seated for the active round, in selection order
    pub jury: Vec<Address>,

    /// Commitments and reveals of the active round
    pub votes: HashMap<Address, VoteRecord>,

    /// Revealed votes for the plaintiff this round
    pub plaintiff_vote_count: u32,

    /// Revealed votes for the defendant this round
    pub defendant_vote_count: u32,

    /// Clock reading when the case was filed
    pub creation_time: u64,

    /// End of the active round's commit window
    pub commit_deadline: u64,

    /// End of the active round's reveal window
    pub reveal_deadline: u64,

    /// Winning party once a verdict has been executed
    pub winner: Option<Address>,

    /// Whether an appeal round was opened
    pub is_appealed: bool,

    /// Losing party who filed the appeal
    pub appellant: Option<Address>,

    /// Deposit debited from the appellant
    pub appeal_deposit: TokenAmount,

    /// End of the appeal window after the first resolution
    pub appeal_deadline: u64,
}

impl Case {
    /// Open a freshly filed case with no jury seated
    pub fn new(
        id: CaseId,
        plaintiff: Address,
        defendant: Address,
        evidence_cid: String,
        filing_fee: TokenAmount,
        now: u64,
    ) -> Self {
        Self {
            id,
            plaintiff,
            defendant,
            evidence_cid,
            status: CaseStatus::Created,
            filing_fee,
            jury: Vec::new(),
            votes: HashMap::new(),
            plaintiff_vote_count: 0,
            defendant_vote_count: 0,
            creation_time: now,
            commit_deadline: 0,
            reveal_deadline: 0,
            winner: None,
            is_appealed: false,
            appellant: None,
            appeal_deposit: 0,
            appeal_deadline: 0,
        }
    }

    /// Seat a jury and start a voting round
    ///
    /// Replaces any prior jury and voting record; used both at filing and
    /// when an appeal re-tries the case.
    pub fn open_voting_round(
        &mut self,
        jury: Vec<Address>,
        now: u64,
        commit_duration: u64,
        reveal_duration: u64,
    ) {
        self.jury = jury;
        self.votes = HashMap::new();
        self.plaintiff_vote_count = 0;
        self.defendant_vote_count = 0;
        self.commit_deadline = now + commit_duration;
        self.reveal_deadline = self.commit_deadline + reveal_duration;
    }

    /// Whether the address sits on the active jury
    pub fn is_juror(&self, addr: Address) -> bool {
        self.jury.contains(&addr)
    }

    /// Whether the commit window is open (half-open, `[start, deadline)`)
    pub fn commit_window_open(&self, now: u64) -> bool {
        now < self.commit_deadline
    }

    /// Whether the reveal window is open (`[commit_deadline, reveal_deadline)`)
    pub fn reveal_window_open(&self, now: u64) -> bool {
        now >= self.commit_deadline && now < self.reveal_deadline
    }

    /// Count a revealed vote for one side
    pub fn count_reveal(&mut self, vote: Vote) {
        match vote {
            Vote::ForPlaintiff => self.plaintiff_vote_count += 1,
            Vote::ForDefendant => self.defendant_vote_count += 1,
        }
    }

    /// Side with the revealed majority; the defendant keeps the status quo
    /// on a tie, including the zero-reveal round
    pub fn majority_side(&self) -> Vote {
        if self.plaintiff_vote_count > self.defendant_vote_count {
            Vote::ForPlaintiff
        } else {
            Vote::ForDefendant
        }
    }

    /// Address of the party on the given side
    pub fn party(&self, side: Vote) -> Address {
        match side {
            Vote::ForPlaintiff => self.plaintiff,
            Vote::ForDefendant => self.defendant,
        }
    }

    /// Side the given party argues, if they are a party at all
    pub fn side_of(&self, addr: Address) -> Option<Vote> {
        if addr == self.plaintiff {
            Some(Vote::ForPlaintiff)
        } else if addr == self.defendant {
            Some(Vote::ForDefendant)
        } else {
            None
        }
    }

    /// Losing party of the executed verdict, if one exists
    pub fn loser(&self) -> Option<Address> {
        let winner = self.winner?;
        let side = self.side_of(winner)?;
        Some(self.party(side.opponent()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 20])
    }

    fn sample_case() -> Case {
        Case::new(1, addr(0xA1), addr(0xB2), "QmEvidence".to_string(), 100, 1_000)
    }

    #[test]
    fn test_status_order_is_forward() {
        assert!(CaseStatus::Created < CaseStatus::Voting);
        assert!(CaseStatus::Voting < CaseStatus::Resolving);
        assert!(CaseStatus::Resolving < CaseStatus::Resolved);
        assert!(CaseStatus::Resolved < CaseStatus::Appealing);
        assert!(CaseStatus::Appealing < CaseStatus::AppealResolved);
    }

    #[test]
    fn test_vote_bytes() {
        assert_eq!(Vote::ForPlaintiff.as_byte(), 1);
        assert_eq!(Vote::ForDefendant.as_byte(), 2);
        assert_eq!(Vote::try_from(1).unwrap(), Vote::ForPlaintiff);
        assert_eq!(Vote::try_from(2).unwrap(), Vote::ForDefendant);
        assert!(matches!(
            Vote::try_from(0),
            Err(CourtError::InvalidVote(0))
        ));
        assert!(Vote::try_from(3).is_err());
    }

    #[test]
    fn test_voting_round_windows_are_half_open() {
        let mut case = sample_case();
        case.open_voting_round(vec![addr(1)], 1_000, 300, 300);

        assert_eq!(case.commit_deadline, 1_300);
        assert_eq!(case.reveal_deadline, 1_600);

        assert!(case.commit_window_open(1_299));
        assert!(!case.commit_window_open(1_300));

        assert!(!case.reveal_window_open(1_299));
        assert!(case.reveal_window_open(1_300));
        assert!(case.reveal_window_open(1_599));
        assert!(!case.reveal_window_open(1_600));
    }

    #[test]
    fn test_majority_tie_goes_to_defendant() {
        let mut case = sample_case();
        assert_eq!(case.majority_side(), Vote::ForDefendant);

        case.count_reveal(Vote::ForPlaintiff);
        case.count_reveal(Vote::ForDefendant);
        assert_eq!(case.majority_side(), Vote::ForDefendant);

        case.count_reveal(Vote::ForPlaintiff);
        assert_eq!(case.majority_side(), Vote::ForPlaintiff);
    }

    #[test]
    fn test_loser_is_the_other_party() {
        let mut case = sample_case();
        assert_eq!(case.loser(), None);

        case.winner = Some(case.defendant);
        assert_eq!(case.loser(), Some(case.plaintiff));

        case.winner = Some(case.plaintiff);
        assert_eq!(case.loser(), Some(case.defendant));
    }

    #[test]
    fn test_appeal_round_replaces_voting_record() {
        let mut case = sample_case();
        case.open_voting_round(vec![addr(1), addr(2), addr(3)], 1_000, 300, 300);
        case.votes
            .insert(addr(1), VoteRecord::new(Commitment::new([0u8; 32])));
        case.count_reveal(Vote::ForPlaintiff);

        case.open_voting_round(vec![addr(4), addr(5)], 2_000, 300, 300);
        assert!(case.votes.is_empty());
        assert_eq!(case.plaintiff_vote_count, 0);
        assert_eq!(case.jury, vec![addr(4), addr(5)]);
        assert_eq!(case.commit_deadline, 2_300);
    }
}
