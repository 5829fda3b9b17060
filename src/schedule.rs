//! Weekly session scheduling
//!
//! Turns one planned week into seven dated sessions: a session-type mix
//! looked up by (phase, training days), the week's target distance split
//! across the non-rest slots by fixed share weights, a pace per type from
//! the runner's pace set, and rest days on every unselected weekday.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::PlanError;
use crate::models::plan::{Pace, Phase, Session, SessionType, WeekPlan};
use crate::models::profile::{MAX_TRAINING_DAYS, MIN_TRAINING_DAYS};
use crate::paces::PaceSet;

// ---------------------------------------------------------------------------
/// Configuration Constants
// ---------------------------------------------------------------------------

/// Day-offset preference order for placing training days within a week
/// (0 = the week's first day; Mon, Wed, Fri, Sat, Tue, Thu, Sun when the
/// plan starts on a Monday).
const TRAINING_DAY_PREFERENCE: [usize; 7] = [0, 2, 4, 5, 1, 3, 6];

/// Share of the weekly target distance per session type. Normalized over
/// the week's actual slots, so repeated types are fine.
fn distance_share(session_type: SessionType) -> f64 {
    match session_type {
        SessionType::LongRun => 0.34,
        SessionType::Tempo => 0.20,
        SessionType::Interval => 0.15,
        SessionType::EasyRun => 0.15,
        SessionType::CrossTrain => 0.10,
        SessionType::Rest => 0.0,
    }
}

// ---------------------------------------------------------------------------
/// Weekly Templates
// ---------------------------------------------------------------------------

/// One row of the template table: the session-type mix for a
/// (phase, training days) combination. Adding a layout means adding a row,
/// not touching the scheduling logic.
struct WeekTemplate {
    phase: Phase,
    days: u8,
    slots: &'static [SessionType],
}

use SessionType::{CrossTrain, EasyRun, Interval, LongRun, Rest, Tempo};

const WEEK_TEMPLATES: &[WeekTemplate] = &[
    // Base: aerobic emphasis, one tempo touch from four days up
    WeekTemplate { phase: Phase::Base, days: 3, slots: &[EasyRun, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Base, days: 4, slots: &[EasyRun, Tempo, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Base, days: 5, slots: &[EasyRun, Tempo, EasyRun, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Base, days: 6, slots: &[EasyRun, Tempo, EasyRun, CrossTrain, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Base, days: 7, slots: &[EasyRun, Tempo, EasyRun, CrossTrain, EasyRun, EasyRun, LongRun] },
    // Build: intervals join from five days up
    WeekTemplate { phase: Phase::Build, days: 3, slots: &[EasyRun, Tempo, LongRun] },
    WeekTemplate { phase: Phase::Build, days: 4, slots: &[EasyRun, Tempo, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Build, days: 5, slots: &[EasyRun, Tempo, Interval, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Build, days: 6, slots: &[EasyRun, Tempo, Interval, EasyRun, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Build, days: 7, slots: &[EasyRun, Tempo, Interval, CrossTrain, EasyRun, EasyRun, LongRun] },
    // Peak: the sharpest mix of the plan
    WeekTemplate { phase: Phase::Peak, days: 3, slots: &[Tempo, Interval, LongRun] },
    WeekTemplate { phase: Phase::Peak, days: 4, slots: &[EasyRun, Tempo, Interval, LongRun] },
    WeekTemplate { phase: Phase::Peak, days: 5, slots: &[EasyRun, Tempo, Interval, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Peak, days: 6, slots: &[EasyRun, Tempo, Interval, CrossTrain, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Peak, days: 7, slots: &[EasyRun, Tempo, Interval, CrossTrain, EasyRun, Tempo, LongRun] },
    // Taper: volume down, light sharpening only
    WeekTemplate { phase: Phase::Taper, days: 3, slots: &[EasyRun, Tempo, LongRun] },
    WeekTemplate { phase: Phase::Taper, days: 4, slots: &[EasyRun, Tempo, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Taper, days: 5, slots: &[EasyRun, Tempo, EasyRun, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Taper, days: 6, slots: &[EasyRun, Tempo, EasyRun, CrossTrain, EasyRun, LongRun] },
    WeekTemplate { phase: Phase::Taper, days: 7, slots: &[EasyRun, Tempo, EasyRun, CrossTrain, EasyRun, EasyRun, LongRun] },
];

fn template_for(phase: Phase, days: u8) -> Result<&'static [SessionType], PlanError> {
    if !(MIN_TRAINING_DAYS..=MAX_TRAINING_DAYS).contains(&days) {
        return Err(PlanError::InvalidScheduleConstraint(days));
    }
    WEEK_TEMPLATES
        .iter()
        .find(|t| t.phase == phase && t.days == days)
        .map(|t| t.slots)
        .ok_or(PlanError::InvalidScheduleConstraint(days))
}

// ---------------------------------------------------------------------------
/// Schedule Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleOptions {
    /// Weekday to pin the long run to. Falls back to the last training day
    /// of the week when unset or when the day is not a training day.
    pub long_run_day: Option<Weekday>,
}

// ---------------------------------------------------------------------------
/// Week Scheduling
// ---------------------------------------------------------------------------

/// Schedule one week: seven sessions, one per calendar day, in date order.
pub fn schedule_week(
    week: &WeekPlan,
    paces: &PaceSet,
    training_days: u8,
    options: &ScheduleOptions,
) -> Result<Vec<Session>, PlanError> {
    let slots = template_for(week.phase, training_days)?;

    // Training-day offsets, in fill-preference order
    let selected = &TRAINING_DAY_PREFERENCE[..training_days as usize];
    let last_training_offset = match selected.iter().max() {
        Some(offset) => *offset,
        None => return Err(PlanError::InvalidScheduleConstraint(training_days)),
    };

    // Pin the long run: the preferred weekday if it is a training day,
    // otherwise the last training day of the week
    let long_offset = options
        .long_run_day
        .and_then(|day| {
            selected
                .iter()
                .copied()
                .find(|offset| date_at(week, *offset).weekday() == day)
        })
        .unwrap_or(last_training_offset);

    let distances = slot_distances(slots, week.target_distance_km);

    // Place the long run first, then fill the remaining training days in
    // preference order with the remaining template slots
    let mut by_offset: [Option<(SessionType, f64)>; 7] = [None; 7];
    let mut fill_offsets = selected.iter().filter(|offset| **offset != long_offset);
    for (slot, distance) in slots.iter().zip(&distances) {
        if *slot == LongRun {
            by_offset[long_offset] = Some((LongRun, *distance));
            continue;
        }
        if let Some(offset) = fill_offsets.next() {
            by_offset[*offset] = Some((*slot, *distance));
        }
    }

    let mut sessions = Vec::with_capacity(7);
    for offset in 0..7 {
        let day_date = date_at(week, offset);
        let (session_type, distance_km) = by_offset[offset].unwrap_or((Rest, 0.0));
        let pace = pace_for(session_type, paces);
        sessions.push(Session {
            week_number: week.week_number,
            day_date,
            day_name: day_name(day_date).to_string(),
            session_type,
            distance_km,
            pace,
            description: describe_session(session_type, distance_km, pace),
            week_focus: week.phase.focus().to_string(),
        });
    }

    Ok(sessions)
}

/// Split the week's target across the slots by normalized share weights.
/// Each distance rounds to 0.1 km; the rounding remainder goes to the long
/// run so the week total stays exact.
fn slot_distances(slots: &[SessionType], target_distance_km: f64) -> Vec<f64> {
    let weight_sum: f64 = slots.iter().map(|s| distance_share(*s)).sum();
    if weight_sum <= 0.0 {
        return vec![0.0; slots.len()];
    }

    let mut distances: Vec<f64> = slots
        .iter()
        .map(|s| round_tenth(target_distance_km * distance_share(*s) / weight_sum))
        .collect();

    let assigned: f64 = distances.iter().sum();
    let remainder = target_distance_km - assigned;
    if let Some(long_index) = slots.iter().position(|s| *s == LongRun) {
        distances[long_index] = round_tenth(distances[long_index] + remainder);
    }

    distances
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn date_at(week: &WeekPlan, offset: usize) -> NaiveDate {
    week.start_date + Duration::days(offset as i64)
}

fn pace_for(session_type: SessionType, paces: &PaceSet) -> Option<Pace> {
    match session_type {
        EasyRun | LongRun => Some(paces.easy),
        Tempo => Some(paces.tempo),
        Interval => Some(paces.interval),
        Rest | CrossTrain => None,
    }
}

fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn describe_session(session_type: SessionType, distance_km: f64, pace: Option<Pace>) -> String {
    let pace_note = pace.map(|p| format!(" @ {}", p)).unwrap_or_default();
    match session_type {
        EasyRun => format!(
            "Run {:.1} km at a comfortable, conversational effort{}. Focus on form and breathing.",
            distance_km, pace_note
        ),
        LongRun => format!(
            "Long run of {:.1} km{} to build endurance at a steady effort.",
            distance_km, pace_note
        ),
        Tempo => format!(
            "Tempo run of {:.1} km{}, a controlled hard effort close to race rhythm.",
            distance_km, pace_note
        ),
        Interval => format!(
            "Interval session totalling {:.1} km{}. Alternate hard efforts with full recoveries.",
            distance_km, pace_note
        ),
        CrossTrain => format!(
            "{:.1} km equivalent of low-impact cross training (cycling, swimming or elliptical).",
            distance_km
        ),
        Rest => "Rest day.".to_string(),
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
