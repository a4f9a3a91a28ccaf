//! Call-time clock for deadline enforcement
//!
//! Deadlines are enforced by comparing the clock reading at call time
//! against the values stored on the case. Nothing runs on a timer; a case
//! sits in its current state until someone calls the next operation after
//! a deadline has passed.

use std::time::{SystemTime, UNIX_EPOCH};

/// Time source in Unix seconds
///
/// The offset lets a harness move time forward past commit, reveal and
/// appeal deadlines without waiting.
#[derive(Debug, Clone)]
pub struct Clock {
    source: ClockSource,
    offset: u64,
}

#[derive(Debug, Clone)]
enum ClockSource {
    System,
    Fixed(u64),
}

impl Clock {
    /// Clock backed by the system time
    pub fn system() -> Self {
        Self {
            source: ClockSource::System,
            offset: 0,
        }
    }

    /// Clock pinned to a fixed starting point
    pub fn fixed(start: u64) -> Self {
        Self {
            source: ClockSource::Fixed(start),
            offset: 0,
        }
    }

    /// Current reading in Unix seconds
    pub fn now(&self) -> u64 {
        let base = match self.source {
            ClockSource::System => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            ClockSource::Fixed(start) => start,
        };
        base + self.offset
    }

    /// Move the clock forward by the given number of seconds
    pub fn advance(&mut self, secs: u64) {
        self.offset += secs;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
