//! Tribunal - decentralized dispute resolution
//!
//! Plaintiffs file cases against defendants, a staked jury selected from
//! the registered pool votes through a two-phase commit-reveal scheme, and
//! the protocol settles fees and stakes, updates juror reputations and
//! optionally re-tries the case once before a larger appeal jury.

pub mod appeal;
pub mod case;
pub mod clock;
pub mod config;
pub mod court;
pub mod error;
pub mod events;
pub mod jury;
pub mod reputation;
pub mod verdict;
pub mod voting;

pub use case::{Case, CaseStatus, Vote, VoteRecord};
pub use clock::Clock;
pub use config::CourtConfig;
pub use court::{CaseSummary, DisputeCourt, JurorInfo, ReputationView};
pub use error::{CourtError, Window};
pub use events::CourtEvent;
pub use jury::{JurorPool, JurorRecord};
pub use reputation::{PenaltyContext, ReputationBook, ReputationRecord};
pub use verdict::Settlement;
pub use voting::{commitment_hash, Commitment, Salt, VoteSecret};

pub use tribunal_token::{Address, TokenAmount, TokenLedger, UNIT};

/// Result type for court operations
pub type Result<T> = std::result::Result<T, CourtError>;

/// Case identifier, allocated sequentially starting at 1
pub type CaseId = u64;

/// Protocol version
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Protocol parameter defaults and reputation tuning
pub mod constants {
    use tribunal_token::{TokenAmount, UNIT};

    /// Fee a plaintiff pays to open a case
    pub const FILING_FEE: TokenAmount = 100 * UNIT;

    /// Stake locked while registered as a juror
    pub const JUROR_STAKE: TokenAmount = 500 * UNIT;

    /// Jurors seated on a first-round case
    pub const JURY_SIZE: usize = 3;

    /// Commit window length (in seconds)
    pub const COMMIT_DURATION: u64 = 300;

    /// Reveal window length (in seconds)
    pub const REVEAL_DURATION: u64 = 300;

    /// Starting penalty as a share of the base amount (percent)
    pub const PENALTY_RATE: u8 = 50;

    /// Appeal deposit as a multiple of the filing fee
    pub const APPEAL_DEPOSIT_MULTIPLIER: u32 = 5;

    /// Appeal window length (in seconds)
    pub const APPEAL_DURATION: u64 = 600;

    /// Jurors seated on an appeal round
    pub const APPEAL_JURY_SIZE: usize = 5;

    /// Share of a round's pot paid to the winning party (percent)
    pub const WINNER_SHARE: u8 = 50;

    /// Reputation score assigned before any vote
    pub const INITIAL_REPUTATION: u8 = 50;

    /// Reputation gained per correct vote
    pub const REPUTATION_GAIN: u8 = 5;

    /// Reputation lost per wrong vote
    pub const REPUTATION_LOSS: u8 = 10;

    /// Reputation ceiling
    pub const MAX_REPUTATION: u8 = 100;

    /// Number of votes covered by novice protection
    pub const NOVICE_VOTE_THRESHOLD: u64 = 3;

    /// Score above which the high-reputation penalty discount applies
    pub const HIGH_REPUTATION_THRESHOLD: u8 = 70;

    /// Penalty discount for high-reputation jurors (percent)
    pub const HIGH_REPUTATION_DISCOUNT: u8 = 20;

    /// Penalty escalation per consecutive wrong vote already on record (percent)
    pub const ESCALATION_RATE: u8 = 10;

    /// Ceiling on any penalty as a share of the base amount (percent)
    pub const MAX_PENALTY_RATE: u8 = 80;
}
