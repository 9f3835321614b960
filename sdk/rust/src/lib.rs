//! Client for the user service HTTP API.

mod client;

pub use client::{ApiError, Reply, User, UsersClient};
