use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pairing context between two participants working toward a shared pick.
///
/// The two participant slots are fixed at creation. Their order carries no
/// meaning for match detection; votes from either side are treated
/// symmetrically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PairSession {
    pub session_id: Uuid,
    pub user_a: String,
    pub user_b: String,
    pub created_at: DateTime<Utc>,
}

impl PairSession {
    /// Creates a new session with a fresh identifier
    pub fn new(user_a: String, user_b: String) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_a,
            user_b,
            created_at: Utc::now(),
        }
    }
}

/// Result of casting a vote: whether both participants now like a common title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOutcome {
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(rename = "titleId", default, skip_serializing_if = "Option::is_none")]
    pub title_id: Option<i64>,
}

impl MatchOutcome {
    pub fn matched(title_id: i64) -> Self {
        Self {
            matched: true,
            title_id: Some(title_id),
        }
    }

    pub fn no_match() -> Self {
        Self {
            matched: false,
            title_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_generates_unique_ids() {
        let a = PairSession::new("alice".to_string(), "bob".to_string());
        let b = PairSession::new("alice".to_string(), "bob".to_string());
        assert_ne!(a.session_id, b.session_id);
        assert_eq!(a.user_a, "alice");
        assert_eq!(a.user_b, "bob");
    }

    #[test]
    fn test_match_outcome_serialization() {
        let hit = serde_json::to_value(MatchOutcome::matched(55)).unwrap();
        assert_eq!(hit["match"], true);
        assert_eq!(hit["titleId"], 55);

        let miss = serde_json::to_value(MatchOutcome::no_match()).unwrap();
        assert_eq!(miss["match"], false);
        assert!(miss.get("titleId").is_none());
    }
}
