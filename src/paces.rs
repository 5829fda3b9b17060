//! Training pace derivation
//!
//! Converts a goal finish time over a race distance into the set of named
//! training paces. Race pace is the base; every other zone is a fixed
//! multiplicative offset from it, with the offset table keyed by fitness
//! level so the same goal time produces different intensity spreads for a
//! beginner and an advanced runner.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::plan::Pace;
use crate::models::profile::{FitnessLevel, GoalTime};

// ---------------------------------------------------------------------------
/// Configuration Constants
// ---------------------------------------------------------------------------

/// Multiplicative offsets from race pace per zone. Values > 1 are slower
/// than race pace, values < 1 faster.
struct PaceOffsets {
    easy: f64,
    tempo: f64,
    threshold: f64,
    interval: f64,
}

// Beginners get the widest easy/race gap to keep easy volume genuinely
// easy and reduce overuse injury risk.
const BEGINNER_OFFSETS: PaceOffsets = PaceOffsets {
    easy: 1.35,
    tempo: 1.04,
    threshold: 0.98,
    interval: 0.90,
};

const INTERMEDIATE_OFFSETS: PaceOffsets = PaceOffsets {
    easy: 1.28,
    tempo: 1.02,
    threshold: 0.97,
    interval: 0.88,
};

const ADVANCED_OFFSETS: PaceOffsets = PaceOffsets {
    easy: 1.22,
    tempo: 1.00,
    threshold: 0.96,
    interval: 0.86,
};

fn offsets_for(level: FitnessLevel) -> &'static PaceOffsets {
    match level {
        FitnessLevel::Beginner => &BEGINNER_OFFSETS,
        FitnessLevel::Intermediate => &INTERMEDIATE_OFFSETS,
        FitnessLevel::Advanced => &ADVANCED_OFFSETS,
    }
}

// ---------------------------------------------------------------------------
/// Pace Set
// ---------------------------------------------------------------------------

/// The named training paces for one runner. Read-only after construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaceSet {
    pub easy: Pace,
    pub tempo: Pace,
    pub threshold: Pace,
    pub interval: Pace,
    pub race: Pace,
}

impl PaceSet {
    /// Derive all zone paces from a goal time over a race distance.
    pub fn derive(
        target_time: GoalTime,
        distance_km: f64,
        level: FitnessLevel,
    ) -> Result<Self, PlanError> {
        if distance_km <= 0.0 {
            return Err(PlanError::InvalidInput(format!(
                "Race distance must be positive, got {} km",
                distance_km
            )));
        }

        let race_secs_per_km = target_time.total_seconds() as f64 / distance_km;
        let offsets = offsets_for(level);

        Ok(Self {
            easy: scaled_pace(race_secs_per_km, offsets.easy),
            tempo: scaled_pace(race_secs_per_km, offsets.tempo),
            threshold: scaled_pace(race_secs_per_km, offsets.threshold),
            interval: scaled_pace(race_secs_per_km, offsets.interval),
            race: scaled_pace(race_secs_per_km, 1.0),
        })
    }
}

fn scaled_pace(race_secs_per_km: f64, offset: f64) -> Pace {
    Pace::from_seconds_per_km((race_secs_per_km * offset).round() as u32)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
