//! Error types for plan generation
//!
//! All variants are terminal for a single generation call: they stem from
//! invalid input, never from transient conditions, so nothing is retried
//! and no partial plan is ever returned.

use serde::{Serialize, Serializer};

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Malformed pace or distance input: bad goal time, unrecognized race,
    /// out-of-range profile field, race date not after start date.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few weeks between start date and race date for any meaningful
    /// periodization.
    #[error("Only {0} week(s) between start date and race date, at least 2 are needed")]
    InsufficientTime(u32),

    /// Training frequency outside the supported range.
    #[error("Training days per week must be between 3 and 7, got {0}")]
    InvalidScheduleConstraint(u8),
}

/// Boundary layers report errors as plain message strings
impl Serialize for PlanError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
