use crate::{ActorId, IntentId, ResourceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Intent lifecycle state.
///
/// `Open` is the only state an intent can leave; `Closed` and `Cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    /// Standing and eligible for matching
    Open,
    /// Consumed by a settlement
    Closed,
    /// Withdrawn by its actor
    Cancelled,
}

impl IntentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, IntentStatus::Open)
    }

    /// Whether the lifecycle permits moving from `self` to `next`
    pub fn can_transition_to(self, next: IntentStatus) -> bool {
        matches!(
            (self, next),
            (IntentStatus::Open, IntentStatus::Closed) | (IntentStatus::Open, IntentStatus::Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntentStatus::Open => "open",
            IntentStatus::Closed => "closed",
            IntentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation request for an intent, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIntent {
    pub actor: ActorId,
    pub offer: ResourceType,
    pub want: ResourceType,
    pub deadline: Option<DateTime<Utc>>,
}

impl NewIntent {
    pub fn new(
        actor: impl Into<ActorId>,
        offer: impl Into<ResourceType>,
        want: impl Into<ResourceType>,
    ) -> Self {
        NewIntent {
            actor: actor.into(),
            offer: offer.into(),
            want: want.into(),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A standing offer to trade: an edge `offer -> want` in the barter graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    pub actor: ActorId,
    pub offer: ResourceType,
    pub want: ResourceType,
    pub deadline: Option<DateTime<Utc>>,
    pub status: IntentStatus,
    /// Bumped on every status transition
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl Intent {
    pub fn is_open(&self) -> bool {
        self.status == IntentStatus::Open
    }

    /// Deadline strictly in the past relative to `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.deadline.map_or(false, |deadline| deadline < now)
    }

    /// Open and not expired: may appear as an edge in a solve
    pub fn is_matchable(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && !self.is_expired(now)
    }

    /// Whether this intent's want is satisfied by `next`'s offer
    pub fn feeds(&self, next: &Intent) -> bool {
        self.want == next.offer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn intent(deadline: Option<DateTime<Utc>>) -> Intent {
        Intent {
            id: IntentId::new(1),
            actor: ActorId::new("alice"),
            offer: ResourceType::new("apples"),
            want: ResourceType::new("bread"),
            deadline,
            status: IntentStatus::Open,
            version: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_transitions() {
        assert!(IntentStatus::Open.can_transition_to(IntentStatus::Closed));
        assert!(IntentStatus::Open.can_transition_to(IntentStatus::Cancelled));
        assert!(!IntentStatus::Open.can_transition_to(IntentStatus::Open));
        assert!(!IntentStatus::Closed.can_transition_to(IntentStatus::Cancelled));
        assert!(!IntentStatus::Cancelled.can_transition_to(IntentStatus::Closed));
        assert!(IntentStatus::Closed.is_terminal());
        assert!(!IntentStatus::Open.is_terminal());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        assert!(!intent(None).is_expired(now));
        assert!(intent(Some(now - Duration::seconds(1))).is_expired(now));
        assert!(!intent(Some(now + Duration::seconds(60))).is_expired(now));
        assert!(!intent(Some(now - Duration::seconds(1))).is_matchable(now));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&IntentStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
