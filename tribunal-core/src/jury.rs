//! Juror registry and jury selection

use crate::{CaseId, CourtError, Result};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::collections::{BTreeMap, HashSet};
use tribunal_token::{Address, TokenAmount};

/// A registered juror's standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurorRecord {
    /// Tokens locked while registered; penalties reduce it in place
    pub staked_amount: TokenAmount,

    /// Whether the juror is seated on an active voting round
    pub is_serving: bool,
}

/// Registered juror pool keyed by address
///
/// The store is ordered so the candidate walk during selection is
/// deterministic; a hash map walk would reorder between runs.
#[derive(Debug, Clone, Default)]
pub struct JurorPool {
    jurors: BTreeMap<Address, JurorRecord>,
}

impl JurorPool {
    /// Empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the address is currently registered
    pub fn is_registered(&self, addr: Address) -> bool {
        self.jurors.contains_key(&addr)
    }

    /// Look up a juror's record
    pub fn get(&self, addr: Address) -> Option<&JurorRecord> {
        self.jurors.get(&addr)
    }

    /// Number of registered jurors
    pub fn len(&self) -> usize {
        self.jurors.len()
    }

    /// Whether no juror is registered
    pub fn is_empty(&self) -> bool {
        self.jurors.is_empty()
    }

    /// Create a record for a newly staked juror
    ///
    /// The caller validates registration state and performs the stake
    /// debit first; this only records the outcome.
    pub fn insert(&mut self, addr: Address, staked_amount: TokenAmount) {
        self.jurors.insert(
            addr,
            JurorRecord {
                staked_amount,
                is_serving: false,
            },
        );
    }

    /// Destroy a juror's record, returning the stake to refund
    pub fn remove(&mut self, addr: Address) -> Option<TokenAmount> {
        self.jurors.remove(&addr).map(|record| record.staked_amount)
    }

    /// Addresses eligible for selection: registered, not serving, not excluded
    pub fn eligible(&self, exclude: &HashSet<Address>) -> Vec<Address> {
        self.jurors
            .iter()
            .filter(|(addr, record)| !record.is_serving && !exclude.contains(addr))
            .map(|(addr, _)| *addr)
            .collect()
    }

    /// Draw a jury of `size` distinct members for a case
    ///
    /// The draw is pseudo-random keyed on the case id and the clock
    /// reading, so it is reproducible from the same state and inputs. It
    /// does not mutate the pool: the caller marks the returned jurors as
    /// serving once the surrounding operation cannot fail anymore.
    pub fn select_jury(
        &self,
        case_id: CaseId,
        now: u64,
        exclude: &HashSet<Address>,
        size: usize,
    ) -> Result<Vec<Address>> {
        let mut candidates = self.eligible(exclude);
        if candidates.len() < size {
            return Err(CourtError::InsufficientJurorPool {
                needed: size,
                available: candidates.len(),
            });
        }

        let mut selected = Vec::with_capacity(size);
        for draw in 0..size {
            let index = Self::draw_index(case_id, now, draw as u32, candidates.len());
            selected.push(candidates.swap_remove(index));
        }
        Ok(selected)
    }

    /// Seat the given jurors on a voting round
    pub fn mark_serving(&mut self, jurors: &[Address]) {
        for addr in jurors {
            if let Some(record) = self.jurors.get_mut(addr) {
                record.is_serving = true;
            }
        }
    }

    /// Release the given jurors after their round's verdict
    pub fn clear_serving(&mut self, jurors: &[Address]) {
        for addr in jurors {
            if let Some(record) = self.jurors.get_mut(addr) {
                record.is_serving = false;
            }
        }
    }

    /// Deduct a penalty from a juror's stake, returning what was taken
    ///
    /// Never takes more than the remaining stake.
    pub fn deduct_stake(&mut self, addr: Address, amount: TokenAmount) -> TokenAmount {
        match self.jurors.get_mut(&addr) {
            Some(record) => {
                let taken = amount.min(record.staked_amount);
                record.staked_amount -= taken;
                taken
            }
            None => 0,
        }
    }

    /// Deterministic draw index for one selection step
    fn draw_index(case_id: CaseId, now: u64, draw: u32, bound: usize) -> usize {
        let mut hasher = Sha3_256::new();
        hasher.update(b"tribunal-jury-selection");
        hasher.update(case_id.to_le_bytes());
        hasher.update(now.to_le_bytes());
        hasher.update(draw.to_le_bytes());
        let hash = hasher.finalize();

        let mut raw = [0u8; 8];
        raw.copy_from_slice(&hash[..8]);
        (u64::from_le_bytes(raw) % bound as u64) as usize
    }
}
