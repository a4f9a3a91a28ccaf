//! Protocol configuration

use crate::{constants, CourtError, Result};
use serde::{Deserialize, Serialize};
use tribunal_token::TokenAmount;

/// Parameters of a court deployment
///
/// Defaults match the reference deployment; any subset may be overridden
/// from a TOML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    /// Fee a plaintiff pays to open a case
    pub filing_fee: TokenAmount,

    /// Stake locked while registered as a juror
    pub juror_stake: TokenAmount,

    /// Jurors seated on a first-round case
    pub jury_size: usize,

    /// Commit window length in seconds
    pub commit_duration: u64,

    /// Reveal window length in seconds
    pub reveal_duration: u64,

    /// Starting penalty as a share of the base amount (percent)
    pub penalty_rate: u8,

    /// Appeal deposit as a multiple of the filing fee
    pub appeal_deposit_multiplier: u32,

    /// Appeal window length in seconds
    pub appeal_duration: u64,

    /// Jurors seated on an appeal round
    pub appeal_jury_size: usize,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            filing_fee: constants::FILING_FEE,
            juror_stake: constants::JUROR_STAKE,
            jury_size: constants::JURY_SIZE,
            commit_duration: constants::COMMIT_DURATION,
            reveal_duration: constants::REVEAL_DURATION,
            penalty_rate: constants::PENALTY_RATE,
            appeal_deposit_multiplier: constants::APPEAL_DEPOSIT_MULTIPLIER,
            appeal_duration: constants::APPEAL_DURATION,
            appeal_jury_size: constants::APPEAL_JURY_SIZE,
        }
    }
}

impl CourtConfig {
    /// Parse a configuration from a TOML document and validate it
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| CourtError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the parameters for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.jury_size == 0 {
            return Err(CourtError::InvalidConfig("jury_size must be > 0".into()));
        }
        if self.appeal_jury_size < self.jury_size {
            return Err(CourtError::InvalidConfig(
                "appeal_jury_size must be >= jury_size".into(),
            ));
        }
        if self.commit_duration == 0 || self.reveal_duration == 0 || self.appeal_duration == 0 {
            return Err(CourtError::InvalidConfig(
                "window durations must be > 0".into(),
            ));
        }
        if self.penalty_rate > 100 {
            return Err(CourtError::InvalidConfig(
                "penalty_rate must be <= 100".into(),
            ));
        }
        if self.juror_stake == 0 {
            return Err(CourtError::InvalidConfig("juror_stake must be > 0".into()));
        }
        Ok(())
    }

    /// Deposit the losing party pays to force a re-trial
    pub fn appeal_deposit(&self) -> TokenAmount {
        self.filing_fee * TokenAmount::from(self.appeal_deposit_multiplier)
    }
}
