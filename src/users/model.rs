//! User records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored user.
///
/// Only `id` is interpreted; every other member of the JSON object is kept
/// in `profile` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Payload for creating a user. The store assigns `id` when it is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl NewUser {
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            profile: Map::new(),
        }
    }

    /// Add a profile field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile.insert(key.into(), value.into());
        self
    }

    /// Materialize the record under its final id.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            profile: self.profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_fields_pass_through() {
        let user: User = serde_json::from_value(json!({
            "id": 42,
            "name": "Ada",
            "email": "ada@example.com",
            "tags": ["admin"]
        }))
        .unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.profile.len(), 3);
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"id": 42, "name": "Ada", "email": "ada@example.com", "tags": ["admin"]})
        );
    }

    #[test]
    fn test_new_user_without_id() {
        let new: NewUser = serde_json::from_value(json!({"name": "Grace"})).unwrap();
        assert_eq!(new.id, None);

        let user = new.into_user(7);
        assert_eq!(user.id, 7);
        assert_eq!(user.profile["name"], "Grace");
    }

    #[test]
    fn test_missing_id_rejected_for_user() {
        assert!(serde_json::from_value::<User>(json!({"name": "nobody"})).is_err());
    }
}
