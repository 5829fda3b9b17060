//! Periodized weekly volume planning
//!
//! Splits the training window into base, build, peak and taper phases and
//! computes the weekly target-distance curve: a ramp from a per-level
//! starting volume to a per-level peak volume, a step-back recovery week
//! every 4th week to shed accumulated fatigue, and a taper that arrives at
//! race day rested.

use chrono::{Duration, NaiveDate};

use crate::error::PlanError;
use crate::models::plan::{Pace, Phase, WeekPlan};
use crate::models::profile::FitnessLevel;

// ---------------------------------------------------------------------------
/// Configuration Constants
// ---------------------------------------------------------------------------

// Phase split as fractions of the total window. Build is the remainder,
// so it absorbs rounding. Taper rounds up: arriving rested beats one more
// loading week.
const BASE_FRACTION: f64 = 0.40;
const PEAK_FRACTION: f64 = 0.15;
const TAPER_FRACTION: f64 = 0.10;

/// Plans shorter than this cannot be periodized at all
const MIN_PLAN_WEEKS: u32 = 2;

/// Below this width the step-back rule is skipped; the window is too
/// compressed to give a week away.
const MIN_WEEKS_FOR_RECOVERY: u32 = 4;

/// Every Nth week of base/build/peak is a recovery week
const RECOVERY_WEEK_INTERVAL: u32 = 4;

/// Recovery week volume relative to the prior week
const RECOVERY_VOLUME_FACTOR: f64 = 0.75;

// Taper volume relative to peak: linear from the first factor down to the
// floor. A single taper week splits the difference.
const TAPER_START_FACTOR: f64 = 0.70;
const TAPER_FLOOR_FACTOR: f64 = 0.45;
const SINGLE_TAPER_WEEK_FACTOR: f64 = 0.50;

/// Starting and peak weekly volume in km, per fitness level
struct VolumeAnchors {
    start_km: f64,
    peak_km: f64,
}

const BEGINNER_VOLUME: VolumeAnchors = VolumeAnchors {
    start_km: 20.0,
    peak_km: 38.0,
};

const INTERMEDIATE_VOLUME: VolumeAnchors = VolumeAnchors {
    start_km: 30.0,
    peak_km: 52.0,
};

const ADVANCED_VOLUME: VolumeAnchors = VolumeAnchors {
    start_km: 42.0,
    peak_km: 70.0,
};

fn anchors_for(level: FitnessLevel) -> &'static VolumeAnchors {
    match level {
        FitnessLevel::Beginner => &BEGINNER_VOLUME,
        FitnessLevel::Intermediate => &INTERMEDIATE_VOLUME,
        FitnessLevel::Advanced => &ADVANCED_VOLUME,
    }
}

// Race pace cutoffs separating the goal-time speed categories
const FAST_RACE_PACE_CUTOFF_SECS: u32 = 360; // 6:00/km
const SLOW_RACE_PACE_CUTOFF_SECS: u32 = 420; // 7:00/km

// ---------------------------------------------------------------------------
/// Speed Category: goal-time bucket scaling the volume anchors
// ---------------------------------------------------------------------------

/// Runners chasing a faster goal over the same distance carry slightly
/// more volume; conservative goals carry slightly less.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedCategory {
    Fast,
    Medium,
    Slow,
}

impl SpeedCategory {
    pub fn from_race_pace(race_pace: Pace) -> Self {
        let secs = race_pace.seconds_per_km();
        if secs < FAST_RACE_PACE_CUTOFF_SECS {
            SpeedCategory::Fast
        } else if secs < SLOW_RACE_PACE_CUTOFF_SECS {
            SpeedCategory::Medium
        } else {
            SpeedCategory::Slow
        }
    }

    fn volume_factor(&self) -> f64 {
        match self {
            SpeedCategory::Fast => 1.08,
            SpeedCategory::Medium => 1.0,
            SpeedCategory::Slow => 0.92,
        }
    }
}

// ---------------------------------------------------------------------------
/// Phase Allocation
// ---------------------------------------------------------------------------

/// Week counts per phase as (base, build, peak, taper). Every phase gets
/// at least one week once the window is 4 weeks or wider; the two narrower
/// layouts that still fit are hand-picked.
fn phase_lengths(total_weeks: u32) -> (u32, u32, u32, u32) {
    match total_weeks {
        0 | 1 => (total_weeks, 0, 0, 0),
        2 => (1, 0, 0, 1),
        3 => (1, 1, 0, 1),
        _ => {
            let weeks = total_weeks as f64;
            let taper = (weeks * TAPER_FRACTION).ceil() as u32;
            let peak = ((weeks * PEAK_FRACTION).round() as u32).max(1);
            let mut base = ((weeks * BASE_FRACTION).round() as u32).max(1);
            let mut build = total_weeks.saturating_sub(base + peak + taper);
            // Rounding can eat the build phase entirely in narrow windows
            while build < 1 && base > 1 {
                base -= 1;
                build += 1;
            }
            (base, build, peak, taper)
        }
    }
}

/// One phase tag per week, in week order
fn allocate_phases(total_weeks: u32) -> Vec<Phase> {
    let (base, build, peak, taper) = phase_lengths(total_weeks);
    let mut phases = Vec::with_capacity(total_weeks as usize);
    phases.extend(std::iter::repeat(Phase::Base).take(base as usize));
    phases.extend(std::iter::repeat(Phase::Build).take(build as usize));
    phases.extend(std::iter::repeat(Phase::Peak).take(peak as usize));
    phases.extend(std::iter::repeat(Phase::Taper).take(taper as usize));
    phases
}

// ---------------------------------------------------------------------------
/// Weekly Volume Curve
// ---------------------------------------------------------------------------

/// Build the full week-by-week plan for a training window.
///
/// Weekly targets ramp linearly from the level's starting volume to its
/// peak volume (reached in the last loading week), except that every 4th
/// week steps back to 75% of the prior week. Taper weeks descend from 70%
/// toward 45% of peak. Targets round to whole kilometers.
pub fn plan_weeks(
    total_weeks: u32,
    level: FitnessLevel,
    category: SpeedCategory,
    start_date: NaiveDate,
) -> Result<Vec<WeekPlan>, PlanError> {
    if total_weeks < MIN_PLAN_WEEKS {
        return Err(PlanError::InsufficientTime(total_weeks));
    }

    let phases = allocate_phases(total_weeks);
    let anchors = anchors_for(level);
    let scale = category.volume_factor();
    let start_volume = anchors.start_km * scale;
    let peak_volume = anchors.peak_km * scale;

    // Index of the week where the ramp tops out
    let last_loading_index = phases
        .iter()
        .rposition(|p| *p != Phase::Taper)
        .unwrap_or(0);
    let taper_len = phases.iter().filter(|p| **p == Phase::Taper).count() as u32;

    let mut weeks = Vec::with_capacity(total_weeks as usize);
    let mut prev_target = start_volume;
    let mut taper_week = 0u32;

    for (index, phase) in phases.iter().enumerate() {
        let week_number = index as u32 + 1;
        let mut is_recovery_week = false;

        let raw_target = if *phase == Phase::Taper {
            taper_week += 1;
            peak_volume * taper_factor(taper_week, taper_len)
        } else if total_weeks >= MIN_WEEKS_FOR_RECOVERY
            && week_number % RECOVERY_WEEK_INTERVAL == 0
        {
            is_recovery_week = true;
            prev_target * RECOVERY_VOLUME_FACTOR
        } else {
            ramp_target(start_volume, peak_volume, index, last_loading_index)
        };

        let target_distance_km = raw_target.round();
        let week_start = start_date + Duration::weeks(index as i64);

        weeks.push(WeekPlan {
            week_number,
            phase: *phase,
            start_date: week_start,
            end_date: week_start + Duration::days(6),
            target_distance_km,
            is_recovery_week,
        });

        prev_target = target_distance_km;
    }

    Ok(weeks)
}

/// Linear ramp between the volume anchors, by loading-week index
fn ramp_target(start_volume: f64, peak_volume: f64, index: usize, last_index: usize) -> f64 {
    if last_index == 0 {
        return start_volume;
    }
    let progress = index as f64 / last_index as f64;
    start_volume + (peak_volume - start_volume) * progress
}

/// Fraction of peak volume for the k-th taper week (1-based)
fn taper_factor(taper_week: u32, taper_len: u32) -> f64 {
    if taper_len <= 1 {
        return SINGLE_TAPER_WEEK_FACTOR;
    }
    let progress = (taper_week - 1) as f64 / (taper_len - 1) as f64;
    TAPER_START_FACTOR - (TAPER_START_FACTOR - TAPER_FLOOR_FACTOR) * progress
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
