//! Bounty domain constants and validation.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future worker tooling.
//!
//! A bounty is a paid analytics task: a creator stakes an amount, analysts
//! join up to a participant cap before the deadline, and one submission is
//! eventually picked as the winner. Settlement itself happens elsewhere;
//! this module only defines the states and the create/join rules.

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Difficulty tiers
// ---------------------------------------------------------------------------

/// Difficulty tiers a bounty can be posted at.
pub mod difficulty {
    pub const BEGINNER: &str = "beginner";
    pub const INTERMEDIATE: &str = "intermediate";
    pub const ADVANCED: &str = "advanced";
    pub const EXPERT: &str = "expert";

    /// All recognised difficulty tiers.
    pub const ALL: &[&str] = &[BEGINNER, INTERMEDIATE, ADVANCED, EXPERT];
}

// ---------------------------------------------------------------------------
// Participant statuses
// ---------------------------------------------------------------------------

/// States a bounty participation moves through.
pub mod participant_status {
    pub const JOINED: &str = "joined";
    pub const SUBMITTED: &str = "submitted";
    pub const WINNER: &str = "winner";
    pub const REJECTED: &str = "rejected";

    /// All recognised participant statuses.
    pub const ALL: &[&str] = &[JOINED, SUBMITTED, WINNER, REJECTED];
}

// ---------------------------------------------------------------------------
// Transaction kinds
// ---------------------------------------------------------------------------

/// Kinds of ledger entries recorded against bounties.
pub mod transaction_type {
    pub const DEPOSIT: &str = "deposit";
    pub const REWARD: &str = "reward";
    pub const WITHDRAWAL: &str = "withdrawal";

    /// All recognised transaction types.
    pub const ALL: &[&str] = &[DEPOSIT, REWARD, WITHDRAWAL];
}

/// States a transaction moves through.
pub mod transaction_status {
    pub const PENDING: &str = "pending";
    pub const CONFIRMED: &str = "confirmed";
    pub const FAILED: &str = "failed";
}

/// Token bounty amounts are denominated in by default.
pub const DEFAULT_TOKEN: &str = "STRK";

/// Default participant cap for new bounties.
pub const DEFAULT_MAX_PARTICIPANTS: i32 = 10;

/// Upper bound on the participant cap.
pub const MAX_PARTICIPANT_LIMIT: i32 = 1_000;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check whether a difficulty string is recognised.
pub fn is_valid_difficulty(value: &str) -> bool {
    difficulty::ALL.contains(&value)
}

/// Check whether a participant status string is recognised.
pub fn is_valid_participant_status(value: &str) -> bool {
    participant_status::ALL.contains(&value)
}

/// Validate a bounty's staked amount.
pub fn validate_amount(amount: f64) -> Result<(), String> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(format!("Bounty amount must be positive, got {amount}"));
    }
    Ok(())
}

/// Validate a bounty's participant cap.
pub fn validate_participant_limit(max_participants: i32) -> Result<(), String> {
    if max_participants < 1 || max_participants > MAX_PARTICIPANT_LIMIT {
        return Err(format!(
            "Participant limit must be between 1 and {MAX_PARTICIPANT_LIMIT}, got {max_participants}"
        ));
    }
    Ok(())
}

/// Validate that a bounty deadline lies in the future at creation time.
pub fn validate_deadline(deadline: Timestamp, now: Timestamp) -> Result<(), String> {
    if deadline <= now {
        return Err("Bounty deadline must be in the future".to_string());
    }
    Ok(())
}

/// Check whether a bounty can accept another participant.
///
/// A bounty is joinable while it has free capacity and the deadline has not
/// passed. Duplicate participation is enforced by the store's unique
/// constraint, not here.
pub fn can_join(
    current_participants: i32,
    max_participants: i32,
    deadline: Timestamp,
    now: Timestamp,
) -> Result<(), String> {
    if now >= deadline {
        return Err("Bounty deadline has passed".to_string());
    }
    if current_participants >= max_participants {
        return Err(format!(
            "Bounty is full ({current_participants}/{max_participants} participants)"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    // -- Difficulty and status validation -----------------------------------

    #[test]
    fn known_difficulties_accepted() {
        assert!(is_valid_difficulty("beginner"));
        assert!(is_valid_difficulty("expert"));
    }

    #[test]
    fn unknown_difficulty_rejected() {
        assert!(!is_valid_difficulty("impossible"));
        assert!(!is_valid_difficulty(""));
    }

    #[test]
    fn known_participant_statuses_accepted() {
        assert!(is_valid_participant_status("joined"));
        assert!(is_valid_participant_status("winner"));
        assert!(!is_valid_participant_status("ghosted"));
    }

    // -- Amount -------------------------------------------------------------

    #[test]
    fn positive_amounts_accepted() {
        assert!(validate_amount(0.5).is_ok());
        assert!(validate_amount(1_000.0).is_ok());
    }

    #[test]
    fn non_positive_or_non_finite_amounts_rejected() {
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    // -- Participant limit ---------------------------------------------------

    #[test]
    fn limit_bounds_enforced() {
        assert!(validate_participant_limit(1).is_ok());
        assert!(validate_participant_limit(MAX_PARTICIPANT_LIMIT).is_ok());
        assert!(validate_participant_limit(0).is_err());
        assert!(validate_participant_limit(MAX_PARTICIPANT_LIMIT + 1).is_err());
    }

    // -- Deadline and joining -------------------------------------------------

    #[test]
    fn future_deadline_accepted() {
        let now = Utc::now();
        assert!(validate_deadline(now + Duration::hours(1), now).is_ok());
        assert!(validate_deadline(now - Duration::hours(1), now).is_err());
        assert!(validate_deadline(now, now).is_err());
    }

    #[test]
    fn join_respects_capacity() {
        let now = Utc::now();
        let deadline = now + Duration::days(7);
        assert!(can_join(0, 10, deadline, now).is_ok());
        assert!(can_join(9, 10, deadline, now).is_ok());

        let err = can_join(10, 10, deadline, now).unwrap_err();
        assert!(err.contains("full"));
    }

    #[test]
    fn join_rejected_after_deadline() {
        let now = Utc::now();
        let err = can_join(0, 10, now - Duration::minutes(1), now).unwrap_err();
        assert!(err.contains("deadline"));
    }
}
