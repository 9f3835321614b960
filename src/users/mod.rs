//! Users subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → service.rs (absence → NotFound)
//!     → store.rs (UserStore port; in-memory adapter)
//! ```

pub mod model;
pub mod service;
pub mod store;

pub use model::{NewUser, User};
pub use service::{UserError, UserService};
pub use store::{InMemoryUserStore, StoreError, StoreResult, UserStore};
