//! Core invocation types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Invocation identifier, as assigned by the agent runtime (the tool call id).
pub type InvocationId = String;

/// Generate an invocation id for runtimes that don't assign one.
pub fn new_invocation_id() -> InvocationId {
    format!("call_{}", uuid::Uuid::new_v4().simple())
}

/// Invocation lifecycle status.
///
/// Ordered: an invocation only ever moves forward through these states.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvocationStatus {
    /// Created, no fragment applied yet.
    Pending,
    /// At least one fragment applied, more may follow.
    Partial,
    /// Final fragment applied (or rendering failed).
    Complete,
    /// The rendered component reported a user decision.
    Responded,
}

impl InvocationStatus {
    /// Whether further fragments must be discarded.
    pub fn is_settled(self) -> bool {
        self >= Self::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn statuses_are_ordered() {
        assert!(InvocationStatus::Pending < InvocationStatus::Partial);
        assert!(InvocationStatus::Partial < InvocationStatus::Complete);
        assert!(InvocationStatus::Complete < InvocationStatus::Responded);
        assert!(!InvocationStatus::Partial.is_settled());
        assert!(InvocationStatus::Responded.is_settled());
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(InvocationStatus::Complete.to_string(), "complete");
        assert_eq!(
            InvocationStatus::from_str("responded").unwrap(),
            InvocationStatus::Responded
        );
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(new_invocation_id(), new_invocation_id());
        assert!(new_invocation_id().starts_with("call_"));
    }
}
