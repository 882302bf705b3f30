//! Ticket number generation.
//!
//! Shape: `{prefix}{YYYYMMDD}-{NNNN}`, e.g. `JP20261019-0427`. The date is
//! the UTC calendar date and `NNNN` is a zero-padded random number in
//! `0..10000`.
//!
//! Tickets are meant to be read over the phone, so they stay short. Two
//! submissions on the same day collide with probability 1/10000; nothing
//! here coordinates across processes.

use rand::Rng;

use crate::types::Timestamp;

/// Default ticket prefix ("JualPutus").
pub const DEFAULT_TICKET_PREFIX: &str = "JP";

/// Exclusive upper bound of the random suffix.
const SUFFIX_RANGE: u32 = 10_000;

/// Produces human-readable ticket numbers from the clock and a random source.
#[derive(Debug, Clone)]
pub struct TicketGenerator {
    prefix: String,
}

impl TicketGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generate a ticket for the current time using the thread-local RNG.
    pub fn generate(&self) -> String {
        self.generate_with(chrono::Utc::now(), &mut rand::rng())
    }

    /// Generate a ticket for `now` drawing the suffix from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(&self, now: Timestamp, rng: &mut R) -> String {
        let suffix = rng.random_range(0..SUFFIX_RANGE);
        format!("{}{}-{suffix:04}", self.prefix, now.format("%Y%m%d"))
    }
}

impl Default for TicketGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TICKET_PREFIX)
    }
}
