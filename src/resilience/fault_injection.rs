//! Synthetic failure injection.
//!
//! # Responsibilities
//! - Decide, per request, whether to fail it on purpose
//! - Keep the decision sequence reproducible for a given seed
//!
//! # Design Decisions
//! - One generator per process, seeded once, guarded by a mutex
//! - Every decision consumes exactly one draw; the lock is held for that draw only
//! - The request id is for logging; it never influences the outcome
//! - A denominator of zero turns injection off without touching the generator

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FaultConfig;
use crate::observability::metrics;

/// Decides whether a request should fail before any real work happens.
pub trait FaultGate: Send + Sync {
    fn should_fail(&self, id: i64) -> bool;
}

/// Seeded gate failing one request in `denominator`.
#[derive(Debug)]
pub struct FaultInjector {
    denominator: u32,
    rng: Mutex<StdRng>,
}

impl FaultInjector {
    pub fn new(denominator: u32, seed: u64) -> Self {
        Self {
            denominator,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_config(config: &FaultConfig) -> Self {
        Self::new(config.denominator, config.seed)
    }

    /// A gate that never fires.
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    fn draw(&self) -> u32 {
        // A panic elsewhere cannot leave the generator half-updated.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..self.denominator)
    }
}

impl FaultGate for FaultInjector {
    fn should_fail(&self, id: i64) -> bool {
        if self.denominator == 0 {
            return false;
        }

        let inject = self.draw() == 0;
        if inject {
            tracing::debug!(user_id = id, denominator = self.denominator, "Injecting synthetic failure");
            metrics::record_fault_injected();
        }
        inject
    }
}
