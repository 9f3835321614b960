//! User lookup service with best-effort points enrichment and
//! synthetic fault injection.

pub mod composite;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod points;
pub mod resilience;
pub mod users;

pub use composite::{FetchError, UserFetcher, UserView};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
