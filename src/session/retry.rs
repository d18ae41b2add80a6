//! Oracle retry policy.
//!
//! Oracle queries go over an unreliable transport, so each turn's query
//! is retried with bounded exponential backoff. Every failed attempt is
//! reported as a warning; exhausting the budget is fatal to the turn but
//! leaves the board state untouched.

use std::thread;
use std::time::Duration;

use crate::protocol::oracle::OracleVerdict;

use super::{MoveOracle, SessionError};

/// Bounded exponential backoff for oracle queries.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 4,
            initial_delay: Duration::from_millis(500),
            backoff_factor: 2,
        }
    }
}

impl RetryPolicy {
    /// Queries the oracle, retrying transport failures until the budget
    /// runs out. Non-oracle errors (interruption, I/O) abort immediately.
    pub fn query<O: MoveOracle>(
        &self,
        oracle: &mut O,
        fen: &str,
    ) -> Result<OracleVerdict, SessionError> {
        let attempts = self.max_attempts.max(1);
        let mut delay = self.initial_delay;

        let mut last = match oracle.best_move(fen) {
            Ok(verdict) => return Ok(verdict),
            Err(SessionError::Oracle(e)) => {
                eprintln!("warning: oracle attempt 1/{attempts} failed: {e}");
                e
            }
            Err(other) => return Err(other),
        };

        for attempt in 2..=attempts {
            thread::sleep(delay);
            delay *= self.backoff_factor;
            match oracle.best_move(fen) {
                Ok(verdict) => return Ok(verdict),
                Err(SessionError::Oracle(e)) => {
                    eprintln!("warning: oracle attempt {attempt}/{attempts} failed: {e}");
                    last = e;
                }
                Err(other) => return Err(other),
            }
        }

        Err(SessionError::OracleExhausted {
            attempts,
            last,
        })
    }
}
