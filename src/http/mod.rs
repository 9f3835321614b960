//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, request span)
//!     → handlers.rs (users API)
//!     → composite lookup / user service
//!     → error.rs (typed failures → status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
