//! Response shapes for user lookups.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::points::PointsSummary;
use crate::users::User;

/// Marker sent in place of the points payload when the points call failed.
pub const POINTS_UNAVAILABLE: &str = "Points service unavailable";

/// The `points` half of a composite response.
#[derive(Debug, Clone, PartialEq)]
pub enum Points {
    /// Payload from the points service, verbatim.
    Summary(PointsSummary),
    /// Serializes as `{"error": "Points service unavailable"}`.
    Unavailable,
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Points::Summary(summary) => summary.serialize(serializer),
            Points::Unavailable => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", POINTS_UNAVAILABLE)?;
                map.end()
            }
        }
    }
}

/// A user plus best-effort points data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResponse {
    pub user: User,
    pub points: Points,
}

/// What a successful lookup returns: the bare user when enrichment is off,
/// the composite otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserView {
    Plain(User),
    Composite(CompositeResponse),
}

impl UserView {
    pub fn user(&self) -> &User {
        match self {
            UserView::Plain(user) => user,
            UserView::Composite(composite) => &composite.user,
        }
    }

    pub fn points(&self) -> Option<&Points> {
        match self {
            UserView::Plain(_) => None,
            UserView::Composite(composite) => Some(&composite.points),
        }
    }
}
