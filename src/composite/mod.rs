//! Composite lookups: a user plus best-effort data from the points service.

pub mod fetcher;
pub mod response;

pub use fetcher::{FetchError, UserFetcher};
pub use response::{CompositeResponse, Points, UserView, POINTS_UNAVAILABLE};
