//! Call budget for the paid leaderboard and odds providers.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuotaStatus {
    pub used: u32,
    pub limit: u32,
}

impl QuotaStatus {
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}

pub trait QuotaService: Send + Sync {
    /// Takes one unit of quota. Returns `false` once the limit is reached.
    fn try_acquire(&self) -> bool;

    fn status(&self) -> QuotaStatus;
}

/// Fixed-size counter, reset by whoever owns the billing period.
#[derive(Debug)]
pub struct CounterQuota {
    used: AtomicU32,
    limit: u32,
}

impl CounterQuota {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            used: AtomicU32::new(0),
            limit,
        }
    }

    pub fn reset(&self) {
        self.used.store(0, Ordering::SeqCst);
    }
}

impl QuotaService for CounterQuota {
    fn try_acquire(&self) -> bool {
        let acquired = self
            .used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                (used < self.limit).then_some(used + 1)
            })
            .is_ok();
        if !acquired {
            tracing::warn!(limit = self.limit, "provider call quota exhausted");
        }
        acquired
    }

    fn status(&self) -> QuotaStatus {
        QuotaStatus {
            used: self.used.load(Ordering::SeqCst),
            limit: self.limit,
        }
    }
}
