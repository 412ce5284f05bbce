//! Moderation state machine for project status
//!
//! States: pending, approved, rejected, hidden. Transitions are
//! unconditional overwrites: a review may move any current status to
//! approved or rejected, and hide lands on hidden from every state.
//! Hidden is a soft delete — the row stays, public listings skip it.

use crate::domain::entities::ProjectStatus;

/// Admin actions that move a project's status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationEvent {
    Approve,
    Reject,
    Hide,
}

impl ModerationEvent {
    /// Parse a review request body's status into an event.
    ///
    /// Only approved/rejected are valid review targets; hidden is reached
    /// through the dedicated hide endpoint, and everything else is
    /// rejected without touching the stored status.
    pub fn review(target: &str) -> Option<Self> {
        match target {
            "approved" => Some(ModerationEvent::Approve),
            "rejected" => Some(ModerationEvent::Reject),
            _ => None,
        }
    }

    /// The status this event writes, regardless of the current one
    pub fn target(&self) -> ProjectStatus {
        match self {
            ModerationEvent::Approve => ProjectStatus::Approved,
            ModerationEvent::Reject => ProjectStatus::Rejected,
            ModerationEvent::Hide => ProjectStatus::Hidden,
        }
    }
}

impl std::fmt::Display for ModerationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationEvent::Approve => write!(f, "approve"),
            ModerationEvent::Reject => write!(f, "reject"),
            ModerationEvent::Hide => write!(f, "hide"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_accepts_only_decision_targets() {
        assert_eq!(ModerationEvent::review("approved"), Some(ModerationEvent::Approve));
        assert_eq!(ModerationEvent::review("rejected"), Some(ModerationEvent::Reject));
        assert_eq!(ModerationEvent::review("hidden"), None);
        assert_eq!(ModerationEvent::review("pending"), None);
        assert_eq!(ModerationEvent::review("cancelled"), None);
        assert_eq!(ModerationEvent::review(""), None);
    }

    #[test]
    fn test_event_targets() {
        assert_eq!(ModerationEvent::Approve.target(), ProjectStatus::Approved);
        assert_eq!(ModerationEvent::Reject.target(), ProjectStatus::Rejected);
        assert_eq!(ModerationEvent::Hide.target(), ProjectStatus::Hidden);
    }

    #[test]
    fn test_hide_target_is_hidden_from_any_state() {
        // The event carries no guard on the current state: the target is
        // hidden whether the project was pending, approved or rejected.
        for _current in [
            ProjectStatus::Pending,
            ProjectStatus::Approved,
            ProjectStatus::Rejected,
            ProjectStatus::Hidden,
        ] {
            assert_eq!(ModerationEvent::Hide.target(), ProjectStatus::Hidden);
        }
    }
}
