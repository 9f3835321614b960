//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound lookup:
//!     → fault_injection.rs (fail a configured fraction up front)
//! ```
//!
//! # Design Decisions
//! - No retries: a failed enrichment degrades the response instead
//! - Injected failures never touch persisted state

pub mod fault_injection;

pub use fault_injection::{FaultGate, FaultInjector};
