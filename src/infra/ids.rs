use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::RoundId;

/// Монотонный счётчик ID раундов внутри одной сессии.
#[derive(Debug)]
pub struct RoundIdGenerator {
    round_counter: AtomicU64,
}

impl RoundIdGenerator {
    /// Первый выданный ID равен 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: RoundId) -> Self {
        Self {
            round_counter: AtomicU64::new(first),
        }
    }

    #[inline]
    pub fn next_round_id(&self) -> RoundId {
        self.round_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for RoundIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
