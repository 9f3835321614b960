//! Points service integration.
//!
//! The points service owns point balances; this crate only reads a user's
//! total to enrich lookups and never interprets the payload.

pub mod client;

pub use client::{DownstreamError, HttpPointsClient, PointsClient, PointsSummary};
