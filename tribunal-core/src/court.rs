//! The dispute court
//!
//! Composition root owning the configuration, the clock, the token ledger
//! handle and the three keyed stores (jurors, cases, reputations). Every
//! entry point runs to completion atomically: validation first, then the
//! single fallible token debit, then store mutations that can no longer
//! fail. The court's own account escrows stakes, fees and deposits
//! between debit and payout.

use crate::{
    appeal,
    case::{Case, CaseStatus, Vote, VoteRecord},
    clock::Clock,
    config::CourtConfig,
    error::Window,
    events::CourtEvent,
    jury::JurorPool,
    reputation::ReputationBook,
    verdict,
    voting::{commitment_hash, Commitment, Salt},
    CaseId, CourtError, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};
use tribunal_token::{Address, TokenAmount, TokenLedger};

/// Registration standing of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurorInfo {
    /// Whether the address is in the juror pool
    pub is_registered: bool,

    /// Stake currently locked for this juror
    pub staked_amount: TokenAmount,

    /// Whether the juror is seated on an active round
    pub is_serving: bool,
}

/// Compact view of a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
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

    /// Fee debited at filing
    pub filing_fee: TokenAmount,
}

/// A juror's reputation with the derived accuracy rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationView {
    /// Votes that matched the verdict
    pub correct_votes: u64,

    /// All revealed votes
    pub total_votes: u64,

    /// Bounded trust score in `[0, 100]`
    pub reputation_score: u8,

    /// Wrong votes since the last correct one
    pub consecutive_wrong: u32,

    /// Share of votes that matched the verdict, in percent
    pub accuracy_rate: u8,
}

/// The dispute-resolution protocol state and entry points
///
/// There is no ambient message sender: every mutating call names the
/// acting address explicitly.
#[derive(Debug, Clone)]
pub struct DisputeCourt {
    config: CourtConfig,
    clock: Clock,
    token: TokenLedger,
    court_account: Address,
    jurors: JurorPool,
    reputations: ReputationBook,
    cases: HashMap<CaseId, Case>,
    next_case_id: CaseId,
    events: Vec<CourtEvent>,
}

impl DisputeCourt {
    /// Create a court over a token ledger, using the system clock
    pub fn new(config: CourtConfig, token: TokenLedger, court_account: Address) -> Result<Self> {
        Self::with_clock(config, token, court_account, Clock::system())
    }

    /// Create a court with an explicit clock
    pub fn with_clock(
        config: CourtConfig,
        token: TokenLedger,
        court_account: Address,
        clock: Clock,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            token,
            court_account,
            jurors: JurorPool::new(),
            reputations: ReputationBook::new(),
            cases: HashMap::new(),
            next_case_id: 1,
            events: Vec::new(),
        })
    }

    // ---- entry points -------------------------------------------------

    /// Stake and join the juror pool
    ///
    /// The stake is debited through the caller's allowance toward the
    /// court account, so it must be approved beforehand.
    pub fn register_as_juror(&mut self, caller: Address) -> Result<()> {
        if self.jurors.is_registered(caller) {
            return Err(CourtError::AlreadyRegistered);
        }

        let stake = self.config.juror_stake;
        self.token
            .transfer_from(self.court_account, caller, self.court_account, stake)?;
        self.jurors.insert(caller, stake);

        info!(juror = %caller, stake, "juror registered");
        self.emit(CourtEvent::JurorRegistered {
            juror: caller,
            stake,
        });
        Ok(())
    }

    /// Leave the juror pool and reclaim the remaining stake
    pub fn unregister_as_juror(&mut self, caller: Address) -> Result<()> {
        let (is_serving, refund) = match self.jurors.get(caller) {
            Some(record) => (record.is_serving, record.staked_amount),
            None => return Err(CourtError::NotRegistered),
        };
        if is_serving {
            return Err(CourtError::CurrentlyServing);
        }

        self.token.transfer(self.court_account, caller, refund)?;
        self.jurors.remove(caller);

        info!(juror = %caller, refund, "juror unregistered");
        self.emit(CourtEvent::JurorUnregistered {
            juror: caller,
            refund,
        });
        Ok(())
    }

    /// File a case against a defendant; the caller becomes the plaintiff
    ///
    /// Seats the jury and opens the commit window in the same call. The
    /// jury is drawn before the fee debit so a thin pool leaves token
    /// state untouched.
    pub fn create_case(
        &mut self,
        caller: Address,
        defendant: Address,
        evidence_cid: &str,
    ) -> Result<CaseId> {
        if defendant == caller {
            return Err(CourtError::InvalidDefendant);
        }

        let now = self.clock.now();
        let case_id = self.next_case_id;
        let exclude: HashSet<Address> = [caller, defendant].into_iter().collect();
        let jury = self
            .jurors
            .select_jury(case_id, now, &exclude, self.config.jury_size)?;

        self.token.transfer_from(
            self.court_account,
            caller,
            self.court_account,
            self.config.filing_fee,
        )?;

        let mut case = Case::new(
            case_id,
            caller,
            defendant,
            evidence_cid.to_string(),
            self.config.filing_fee,
            now,
        );
        case.open_voting_round(
            jury.clone(),
            now,
            self.config.commit_duration,
            self.config.reveal_duration,
        );
        case.status = CaseStatus::Voting;

        self.jurors.mark_serving(&jury);
        self.cases.insert(case_id, case);
        self.next_case_id += 1;

        info!(
            case_id,
            plaintiff = %caller,
            defendant = %defendant,
            jurors = jury.len(),
            "case created"
        );
        self.emit(CourtEvent::CaseCreated {
            case_id,
            plaintiff: caller,
            defendant,
            evidence_cid: evidence_cid.to_string(),
            filing_fee: self.config.filing_fee,
        });
        Ok(case_id)
    }

    /// Submit a hidden vote commitment for a case
    pub fn commit_vote(
        &mut self,
        caller: Address,
        case_id: CaseId,
        commitment: Commitment,
    ) -> Result<()> {
        let now = self.clock.now();
        let case = self.case_mut(case_id)?;

        if !case.status.is_voting_round() {
            return Err(CourtError::InvalidCaseStatus {
                expected: CaseStatus::Voting,
                actual: case.status,
            });
        }
        if !case.is_juror(caller) {
            return Err(CourtError::NotEligibleJuror);
        }
        if !case.commit_window_open(now) {
            return Err(CourtError::WindowClosed(Window::Commit));
        }
        if case.votes.contains_key(&caller) {
            return Err(CourtError::AlreadyCommitted);
        }

        case.votes.insert(caller, VoteRecord::new(commitment));

        debug!(case_id, juror = %caller, "vote committed");
        self.emit(CourtEvent::VoteCommitted {
            case_id,
            juror: caller,
        });
        Ok(())
    }

    /// Disclose a vote and salt against the stored commitment
    pub fn reveal_vote(
        &mut self,
        caller: Address,
        case_id: CaseId,
        vote: Vote,
        salt: Salt,
    ) -> Result<()> {
        let now = self.clock.now();
        let case = self.case_mut(case_id)?;

        if !case.status.is_voting_round() {
            return Err(CourtError::InvalidCaseStatus {
                expected: CaseStatus::Voting,
                actual: case.status,
            });
        }
        if !case.is_juror(caller) {
            return Err(CourtError::NotEligibleJuror);
        }
        if now < case.commit_deadline {
            return Err(CourtError::WindowNotYetOpen(Window::Reveal));
        }
        if now >= case.reveal_deadline {
            return Err(CourtError::WindowClosed(Window::Reveal));
        }

        let record = case
            .votes
            .get_mut(&caller)
            .ok_or(CourtError::NoCommitment)?;
        if record.has_revealed() {
            return Err(CourtError::AlreadyRevealed);
        }
        if commitment_hash(vote, &salt) != record.commitment {
            return Err(CourtError::CommitmentMismatch);
        }

        record.revealed = Some(vote);
        case.count_reveal(vote);

        debug!(case_id, juror = %caller, ?vote, "vote revealed");
        self.emit(CourtEvent::VoteRevealed {
            case_id,
            juror: caller,
            vote,
        });
        Ok(())
    }

    /// Execute the verdict for a round whose reveal window has passed
    ///
    /// Callable by anyone. Settles the round's pot, penalizes revealed
    /// minority voters, updates every revealed voter's reputation,
    /// releases the jury and, on an appeal round, decides the deposit.
    pub fn execute_verdict(&mut self, case_id: CaseId) -> Result<()> {
        let now = self.clock.now();

        let case = self.case(case_id)?;
        if !case.status.is_voting_round() {
            return Err(CourtError::InvalidCaseStatus {
                expected: CaseStatus::Voting,
                actual: case.status,
            });
        }
        if now < case.reveal_deadline {
            return Err(CourtError::VotingNotFinished);
        }

        let settlement =
            verdict::build_settlement(case, &self.jurors, &self.reputations, &self.config);
        let jury = case.jury.clone();
        let appellant = case.appellant;
        let reveals: Vec<(Address, Vote)> = jury
            .iter()
            .filter_map(|addr| {
                case.votes
                    .get(addr)
                    .and_then(|record| record.revealed)
                    .map(|vote| (*addr, vote))
            })
            .collect();

        self.case_mut(case_id)?.status = CaseStatus::Resolving;

        // Dock minority stakes; the amounts were clamped to what remains
        for (addr, amount) in &settlement.penalties {
            let taken = self.jurors.deduct_stake(*addr, *amount);
            warn!(case_id, juror = %addr, amount = taken, "juror penalized");
            self.emit(CourtEvent::JurorPenalized {
                juror: *addr,
                amount: taken,
                reason: "voted against the verdict".to_string(),
            });
        }

        // Pay the round's pot out of the court account
        let winner_reward = settlement.plaintiff_reward + settlement.defendant_reward;
        if winner_reward > 0 {
            self.token
                .transfer(self.court_account, settlement.winner, winner_reward)?;
        }
        if settlement.juror_share > 0 {
            for addr in &settlement.majority {
                self.token
                    .transfer(self.court_account, *addr, settlement.juror_share)?;
            }
        }
        if settlement.deposit_refund > 0 {
            if let Some(appellant) = appellant {
                self.token
                    .transfer(self.court_account, appellant, settlement.deposit_refund)?;
            }
        }

        // Fold the outcome into every revealed voter's history
        for (addr, vote) in &reveals {
            let record = self
                .reputations
                .update(*addr, *vote == settlement.winner_side);
            self.emit(CourtEvent::ReputationUpdated {
                juror: *addr,
                score: record.reputation_score,
                correct_votes: record.correct_votes,
                total_votes: record.total_votes,
            });
        }

        self.jurors.clear_serving(&jury);

        let appeal_deadline = now + self.config.appeal_duration;
        let case = self.case_mut(case_id)?;
        case.winner = Some(settlement.winner);
        match settlement.appeal_succeeded {
            None => {
                case.status = CaseStatus::Resolved;
                case.appeal_deadline = appeal_deadline;
            }
            Some(_) => case.status = CaseStatus::AppealResolved,
        }

        info!(case_id, winner = %settlement.winner, "verdict executed");
        self.emit(CourtEvent::CaseResolved {
            case_id,
            winner: settlement.winner,
            plaintiff_reward: settlement.plaintiff_reward,
            defendant_reward: settlement.defendant_reward,
            juror_reward_total: settlement.juror_reward_total,
        });
        if let Some(appeal_succeeded) = settlement.appeal_succeeded {
            info!(case_id, appeal_succeeded, "appeal resolved");
            self.emit(CourtEvent::AppealResolved {
                case_id,
                winner: settlement.winner,
                appeal_succeeded,
            });
        }
        Ok(())
    }

    /// Escalate a resolved case to a single appeal round
    pub fn appeal(&mut self, caller: Address, case_id: CaseId) -> Result<()> {
        let now = self.clock.now();

        let case = self.case(case_id)?;
        let deposit = appeal::validate_appeal(case, caller, now, &self.config)?;
        let exclude: HashSet<Address> = [case.plaintiff, case.defendant].into_iter().collect();
        let jury = self
            .jurors
            .select_jury(case_id, now, &exclude, self.config.appeal_jury_size)?;

        self.token
            .transfer_from(self.court_account, caller, self.court_account, deposit)?;

        let case = self
            .cases
            .get_mut(&case_id)
            .ok_or(CourtError::CaseNotFound { id: case_id })?;
        appeal::open_appeal_round(case, jury.clone(), caller, deposit, now, &self.config);
        self.jurors.mark_serving(&jury);

        info!(case_id, appellant = %caller, deposit, "appeal initiated");
        self.emit(CourtEvent::AppealInitiated {
            case_id,
            appellant: caller,
            deposit,
        });
        Ok(())
    }

    // ---- queries ------------------------------------------------------

    /// Registration standing of an address
    pub fn juror_info(&self, addr: Address) -> JurorInfo {
        match self.jurors.get(addr) {
            Some(record) => JurorInfo {
                is_registered: true,
                staked_amount: record.staked_amount,
                is_serving: record.is_serving,
            },
            None => JurorInfo {
                is_registered: false,
                staked_amount: 0,
                is_serving: false,
            },
        }
    }

    /// Compact view of a case
    pub fn case_summary(&self, case_id: CaseId) -> Result<CaseSummary> {
        let case = self.case(case_id)?;
        Ok(CaseSummary {
            id: case.id,
            plaintiff: case.plaintiff,
            defendant: case.defendant,
            evidence_cid: case.evidence_cid.clone(),
            status: case.status,
            filing_fee: case.filing_fee,
        })
    }

    /// Full record of a case
    pub fn case_details(&self, case_id: CaseId) -> Result<&Case> {
        self.case(case_id)
    }

    /// Jurors seated on a case's active round, in selection order
    pub fn case_jurors(&self, case_id: CaseId) -> Result<&[Address]> {
        Ok(&self.case(case_id)?.jury)
    }

    /// A juror's reputation, fresh for unknown addresses
    pub fn juror_reputation(&self, addr: Address) -> ReputationView {
        let record = self.reputations.get(addr);
        ReputationView {
            correct_votes: record.correct_votes,
            total_votes: record.total_votes,
            reputation_score: record.reputation_score,
            consecutive_wrong: record.consecutive_wrong,
            accuracy_rate: record.accuracy_rate(),
        }
    }

    /// Fee a plaintiff pays to open a case
    pub fn filing_fee_amount(&self) -> TokenAmount {
        self.config.filing_fee
    }

    /// Stake locked while registered as a juror
    pub fn juror_stake_amount(&self) -> TokenAmount {
        self.config.juror_stake
    }

    /// Identifier the next filed case will receive
    pub fn next_case_id(&self) -> CaseId {
        self.next_case_id
    }

    /// Deployment parameters
    pub fn config(&self) -> &CourtConfig {
        &self.config
    }

    /// The protocol's escrow account
    pub fn court_account(&self) -> Address {
        self.court_account
    }

    /// Read access to the token ledger
    pub fn token(&self) -> &TokenLedger {
        &self.token
    }

    /// Mutable access to the token ledger for the embedding application
    pub fn token_mut(&mut self) -> &mut TokenLedger {
        &mut self.token
    }

    /// The court's clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable clock access, mainly for harnesses that advance time
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Take all buffered observations, oldest first
    pub fn drain_events(&mut self) -> Vec<CourtEvent> {
        std::mem::take(&mut self.events)
    }

    /// Buffered observations since the last drain
    pub fn events(&self) -> &[CourtEvent] {
        &self.events
    }

    // ---- internals ----------------------------------------------------

    fn case(&self, case_id: CaseId) -> Result<&Case> {
        self.cases
            .get(&case_id)
            .ok_or(CourtError::CaseNotFound { id: case_id })
    }

    fn case_mut(&mut self, case_id: CaseId) -> Result<&mut Case> {
        self.cases
            .get_mut(&case_id)
            .ok_or(CourtError::CaseNotFound { id: case_id })
    }

    fn emit(&mut self, event: CourtEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::VoteSecret;
    use tribunal_token::{TokenError, UNIT};

    const COURT: Address = Address::new([0xC0; 20]);
    const TREASURY: Address = Address::new([0xFF; 20]);

    fn addr(tag: u8) -> Address {
        Address::new([tag; 20])
    }

    fn plaintiff() -> Address {
        addr(0xA1)
    }

    fn defendant() -> Address {
        addr(0xB2)
    }

    /// Court with a funded cast: every account holds 2000 tokens and has
    /// approved the court, and `juror_count` jurors are registered.
    fn court_with_jurors(juror_count: u8) -> DisputeCourt {
        let mut token = TokenLedger::new(TREASURY, 1_000_000 * UNIT);
        let mut cast = vec![plaintiff(), defendant()];
        cast.extend((1..=juror_count).map(addr));
        for account in cast {
            token.transfer(TREASURY, account, 2_000 * UNIT).unwrap();
            token.approve(account, COURT, TokenAmount::MAX);
        }

        let mut court =
            DisputeCourt::with_clock(CourtConfig::default(), token, COURT, Clock::fixed(1_000))
                .unwrap();
        for tag in 1..=juror_count {
            court.register_as_juror(addr(tag)).unwrap();
        }
        court.drain_events();
        court
    }

    #[test]
    fn test_registration_locks_stake() {
        let court = court_with_jurors(1);

        let info = court.juror_info(addr(1));
        assert!(info.is_registered);
        assert!(!info.is_serving);
        assert_eq!(info.staked_amount, 500 * UNIT);
        assert_eq!(court.token().balance_of(addr(1)), 1_500 * UNIT);
        assert_eq!(court.token().balance_of(COURT), 500 * UNIT);
    }

    #[test]
    fn test_double_registration_is_rejected() {
        let mut court = court_with_jurors(1);
        assert_eq!(
            court.register_as_juror(addr(1)).unwrap_err(),
            CourtError::AlreadyRegistered
        );
    }

    #[test]
    fn test_registration_requires_allowance_and_funds() {
        let mut court = court_with_jurors(0);

        // No allowance
        let broke = addr(0x51);
        court.token_mut().transfer(TREASURY, broke, 600 * UNIT).unwrap();
        assert!(matches!(
            court.register_as_juror(broke).unwrap_err(),
            CourtError::Token(TokenError::InsufficientAllowance { .. })
        ));

        // Allowance but not enough balance
        let poor = addr(0x52);
        court.token_mut().transfer(TREASURY, poor, 100 * UNIT).unwrap();
        court.token_mut().approve(poor, COURT, TokenAmount::MAX);
        assert!(matches!(
            court.register_as_juror(poor).unwrap_err(),
            CourtError::Token(TokenError::InsufficientFunds { .. })
        ));
        assert!(!court.juror_info(poor).is_registered);
    }

    #[test]
    fn test_unregistration_refunds_stake() {
        let mut court = court_with_jurors(1);
        court.unregister_as_juror(addr(1)).unwrap();

        assert!(!court.juror_info(addr(1)).is_registered);
        assert_eq!(court.token().balance_of(addr(1)), 2_000 * UNIT);
        assert_eq!(
            court.unregister_as_juror(addr(1)).unwrap_err(),
            CourtError::NotRegistered
        );
    }

    #[test]
    fn test_serving_juror_cannot_unregister() {
        let mut court = court_with_jurors(3);
        court.create_case(plaintiff(), defendant(), "QmCid").unwrap();

        for tag in 1..=3 {
            assert_eq!(
                court.unregister_as_juror(addr(tag)).unwrap_err(),
                CourtError::CurrentlyServing
            );
        }
    }

    #[test]
    fn test_create_case_seats_jury_and_debits_fee() {
        let mut court = court_with_jurors(3);
        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();

        assert_eq!(case_id, 1);
        assert_eq!(court.next_case_id(), 2);
        assert_eq!(court.token().balance_of(plaintiff()), 1_900 * UNIT);

        let summary = court.case_summary(case_id).unwrap();
        assert_eq!(summary.status, CaseStatus::Voting);
        assert_eq!(summary.plaintiff, plaintiff());
        assert_eq!(summary.defendant, defendant());
        assert_eq!(summary.evidence_cid, "QmCid");
        assert_eq!(summary.filing_fee, 100 * UNIT);

        let jury = court.case_jurors(case_id).unwrap();
        assert_eq!(jury.len(), 3);
        for member in jury {
            assert!(court.juror_info(*member).is_serving);
        }
    }

    #[test]
    fn test_self_dispute_is_rejected() {
        let mut court = court_with_jurors(3);
        assert_eq!(
            court.create_case(plaintiff(), plaintiff(), "QmCid").unwrap_err(),
            CourtError::InvalidDefendant
        );
    }

    #[test]
    fn test_thin_pool_fails_without_debiting() {
        let mut court = court_with_jurors(2);
        let err = court.create_case(plaintiff(), defendant(), "QmCid").unwrap_err();
        assert_eq!(
            err,
            CourtError::InsufficientJurorPool {
                needed: 3,
                available: 2
            }
        );
        // Fee untouched
        assert_eq!(court.token().balance_of(plaintiff()), 2_000 * UNIT);
    }

    #[test]
    fn test_registered_parties_are_never_seated() {
        let mut court = court_with_jurors(3);
        court.register_as_juror(plaintiff()).unwrap();
        court.register_as_juror(defendant()).unwrap();

        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();
        let jury = court.case_jurors(case_id).unwrap();
        assert!(!jury.contains(&plaintiff()));
        assert!(!jury.contains(&defendant()));
    }

    #[test]
    fn test_commit_rejects_outsiders_and_parties() {
        let mut court = court_with_jurors(4);
        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();

        let jury: Vec<Address> = court.case_jurors(case_id).unwrap().to_vec();
        let outsider = (1..=4).map(addr).find(|a| !jury.contains(a)).unwrap();
        let secret = VoteSecret::new(Vote::ForPlaintiff, [1; 32]);

        assert_eq!(
            court
                .commit_vote(outsider, case_id, secret.commitment())
                .unwrap_err(),
            CourtError::NotEligibleJuror
        );
        assert_eq!(
            court
                .commit_vote(plaintiff(), case_id, secret.commitment())
                .unwrap_err(),
            CourtError::NotEligibleJuror
        );
    }

    #[test]
    fn test_commit_window_and_double_commit() {
        let mut court = court_with_jurors(3);
        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();
        let juror = court.case_jurors(case_id).unwrap()[0];
        let secret = VoteSecret::new(Vote::ForPlaintiff, [1; 32]);

        court.commit_vote(juror, case_id, secret.commitment()).unwrap();
        assert_eq!(
            court
                .commit_vote(juror, case_id, secret.commitment())
                .unwrap_err(),
            CourtError::AlreadyCommitted
        );

        let other = court.case_jurors(case_id).unwrap()[1];
        court.clock_mut().advance(301);
        assert_eq!(
            court
                .commit_vote(other, case_id, secret.commitment())
                .unwrap_err(),
            CourtError::WindowClosed(Window::Commit)
        );
    }

    #[test]
    fn test_reveal_window_and_mismatches() {
        let mut court = court_with_jurors(3);
        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();
        let jury: Vec<Address> = court.case_jurors(case_id).unwrap().to_vec();

        let secret = VoteSecret::new(Vote::ForPlaintiff, [7; 32]);
        court.commit_vote(jury[0], case_id, secret.commitment()).unwrap();
        court.commit_vote(jury[1], case_id, secret.commitment()).unwrap();

        // Too early
        assert_eq!(
            court
                .reveal_vote(jury[0], case_id, Vote::ForPlaintiff, [7; 32])
                .unwrap_err(),
            CourtError::WindowNotYetOpen(Window::Reveal)
        );

        court.clock_mut().advance(301);

        // Never committed
        assert_eq!(
            court
                .reveal_vote(jury[2], case_id, Vote::ForPlaintiff, [7; 32])
                .unwrap_err(),
            CourtError::NoCommitment
        );
        // Wrong salt
        assert_eq!(
            court
                .reveal_vote(jury[0], case_id, Vote::ForPlaintiff, [8; 32])
                .unwrap_err(),
            CourtError::CommitmentMismatch
        );
        // Wrong vote under the right salt
        assert_eq!(
            court
                .reveal_vote(jury[0], case_id, Vote::ForDefendant, [7; 32])
                .unwrap_err(),
            CourtError::CommitmentMismatch
        );

        court
            .reveal_vote(jury[0], case_id, Vote::ForPlaintiff, [7; 32])
            .unwrap();
        assert_eq!(
            court
                .reveal_vote(jury[0], case_id, Vote::ForPlaintiff, [7; 32])
                .unwrap_err(),
            CourtError::AlreadyRevealed
        );

        // Window closes for the remaining committer
        court.clock_mut().advance(301);
        assert_eq!(
            court
                .reveal_vote(jury[1], case_id, Vote::ForPlaintiff, [7; 32])
                .unwrap_err(),
            CourtError::WindowClosed(Window::Reveal)
        );
    }

    #[test]
    fn test_verdict_waits_for_reveal_deadline() {
        let mut court = court_with_jurors(3);
        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();

        assert_eq!(
            court.execute_verdict(case_id).unwrap_err(),
            CourtError::VotingNotFinished
        );
        court.clock_mut().advance(301);
        assert_eq!(
            court.execute_verdict(case_id).unwrap_err(),
            CourtError::VotingNotFinished
        );

        court.clock_mut().advance(301);
        court.execute_verdict(case_id).unwrap();
        assert!(matches!(
            court.execute_verdict(case_id).unwrap_err(),
            CourtError::InvalidCaseStatus { .. }
        ));
    }

    #[test]
    fn test_verdict_releases_jury() {
        let mut court = court_with_jurors(3);
        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();
        court.clock_mut().advance(602);
        court.execute_verdict(case_id).unwrap();

        for tag in 1..=3 {
            assert!(!court.juror_info(addr(tag)).is_serving);
        }
        // Free to leave again
        court.unregister_as_juror(addr(1)).unwrap();
    }

    #[test]
    fn test_unknown_case_is_reported() {
        let mut court = court_with_jurors(3);
        assert_eq!(
            court.execute_verdict(99).unwrap_err(),
            CourtError::CaseNotFound { id: 99 }
        );
        assert!(court.case_summary(99).is_err());
        assert!(court.case_jurors(99).is_err());
    }

    #[test]
    fn test_unknown_juror_queries_return_defaults() {
        let court = court_with_jurors(0);
        let info = court.juror_info(addr(9));
        assert!(!info.is_registered);
        assert_eq!(info.staked_amount, 0);

        let reputation = court.juror_reputation(addr(9));
        assert_eq!(reputation.total_votes, 0);
        assert_eq!(reputation.reputation_score, crate::constants::INITIAL_REPUTATION);
        assert_eq!(reputation.accuracy_rate, 0);
    }

    #[test]
    fn test_constants_are_exposed() {
        let court = court_with_jurors(0);
        assert_eq!(court.filing_fee_amount(), 100 * UNIT);
        assert_eq!(court.juror_stake_amount(), 500 * UNIT);
        assert_eq!(court.next_case_id(), 1);
    }

    #[test]
    fn test_events_are_buffered_in_order() {
        let mut court = court_with_jurors(3);
        let case_id = court.create_case(plaintiff(), defendant(), "QmCid").unwrap();
        let juror = court.case_jurors(case_id).unwrap()[0];
        let secret = VoteSecret::new(Vote::ForDefendant, [3; 32]);
        court.commit_vote(juror, case_id, secret.commitment()).unwrap();

        let events = court.drain_events();
        assert!(matches!(events[0], CourtEvent::CaseCreated { .. }));
        assert!(matches!(events[1], CourtEvent::VoteCommitted { .. }));
        assert!(court.events().is_empty());
    }
}
