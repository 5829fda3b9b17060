//! Plan assembly
//!
//! Composes pace derivation, periodization and weekly scheduling into the
//! final training plan. Pure aggregation: every failure comes from one of
//! the composed parts, and no partial plan is ever returned.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::PlanError;
use crate::models::plan::{PlanSummary, Session, TrainingPlan};
use crate::models::profile::RacePlanRequest;
use crate::paces::PaceSet;
use crate::periodization::{self, SpeedCategory};
use crate::races;
use crate::schedule::{schedule_week, ScheduleOptions};

/// Whole training weeks between the start date and race day, never less
/// than one. Callers must ensure start < race (request validation does).
pub fn weeks_between(start_date: NaiveDate, race_date: NaiveDate) -> u32 {
    let days = (race_date - start_date).num_days().max(0);
    (days / 7).max(1) as u32
}

/// Generate the complete training plan for one request.
///
/// Deterministic: the same request always yields a structurally identical
/// plan. Fails with a specific [`PlanError`] on semantically invalid input
/// and never returns a partial plan.
pub fn generate_plan(request: &RacePlanRequest) -> Result<TrainingPlan, PlanError> {
    request.validate()?;
    let race = races::get(&request.race)?;

    let total_weeks = weeks_between(request.start_date, request.race_date);
    let level = request.profile.fitness_level;

    let paces = PaceSet::derive(request.target_time, race.distance_km, level)?;
    let category = SpeedCategory::from_race_pace(paces.race);
    let weeks = periodization::plan_weeks(total_weeks, level, category, request.start_date)?;

    info!(
        race = race.race_id,
        total_weeks,
        level = %level,
        "generating training plan"
    );

    let options = ScheduleOptions::default();
    let mut sessions: Vec<Session> = Vec::with_capacity(weeks.len() * 7);
    for week in &weeks {
        let weekly = schedule_week(
            week,
            &paces,
            request.profile.training_days_per_week,
            &options,
        )?;
        debug!(
            week = week.week_number,
            phase = %week.phase,
            target_km = week.target_distance_km,
            recovery = week.is_recovery_week,
            "scheduled week"
        );
        sessions.extend(weekly);
    }

    let total_distance_km = round_tenth(sessions.iter().map(|s| s.distance_km).sum());

    let summary = PlanSummary {
        race_id: race.race_id.to_string(),
        race_name: race.name.to_string(),
        race_date: request.race_date,
        race_distance_km: race.distance_km,
        target_time: request.target_time,
        fitness_level: level,
        training_days_per_week: request.profile.training_days_per_week,
        total_weeks,
        total_distance_km,
    };

    Ok(TrainingPlan {
        summary,
        weeks,
        sessions,
    })
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{Phase, SessionType};
    use crate::models::profile::{FitnessLevel, Gender, Profile};

    /// The worked example: intermediate runner, 4 days/week, 3:00:00 goal
    /// over the 30 km course, twelve whole weeks before race day.
    fn make_request() -> RacePlanRequest {
        RacePlanRequest {
            profile: Profile {
                gender: Gender::Male,
                height_cm: 181.0,
                weight_kg: 76.0,
                age: 41,
                fitness_level: FitnessLevel::Intermediate,
                training_days_per_week: 4,
                previous_race_times: vec!["3:12:45".parse().unwrap()],
                injury_notes: vec![],
            },
            race: "lidingo".to_string(),
            target_time: "3:00:00".parse().unwrap(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            race_date: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
        }
    }

    #[test]
    fn test_weeks_between_rounds_down_with_floor_of_one() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            weeks_between(start, NaiveDate::from_ymd_opt(2024, 3, 25).unwrap()),
            12
        );
        assert_eq!(
            weeks_between(start, NaiveDate::from_ymd_opt(2024, 1, 13).unwrap()),
            1
        );
        assert_eq!(
            weeks_between(start, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()),
            1
        );
    }

    #[test]
    fn test_example_request_produces_twelve_weeks() {
        let plan = generate_plan(&make_request()).unwrap();
        assert_eq!(plan.summary.total_weeks, 12);
        assert_eq!(plan.weeks.len(), 12);
        assert_eq!(plan.sessions.len(), 12 * 7);

        // Week 1 starts at the configured intermediate base volume
        assert_eq!(plan.weeks[0].target_distance_km, 30.0);

        // Weeks 4 and 8 are recovery weeks, 11-12 are taper
        assert!(plan.weeks[3].is_recovery_week);
        assert!(plan.weeks[7].is_recovery_week);
        assert_eq!(plan.weeks[10].phase, Phase::Taper);
        assert_eq!(plan.weeks[11].phase, Phase::Taper);
        assert!(plan.weeks[11].target_distance_km < plan.weeks[10].target_distance_km);
    }

    #[test]
    fn test_each_week_has_the_requested_training_days() {
        let plan = generate_plan(&make_request()).unwrap();
        for week in &plan.weeks {
            let sessions: Vec<&Session> = plan.sessions_for_week(week.week_number).collect();
            assert_eq!(sessions.len(), 7);
            let active = sessions
                .iter()
                .filter(|s| !s.session_type.is_rest())
                .count();
            assert_eq!(active, 4, "week {}", week.week_number);
        }
    }

    #[test]
    fn test_weekly_session_distances_match_targets() {
        let plan = generate_plan(&make_request()).unwrap();
        for week in &plan.weeks {
            let total: f64 = plan
                .sessions_for_week(week.week_number)
                .map(|s| s.distance_km)
                .sum();
            assert!(
                (total - week.target_distance_km).abs() <= 0.5,
                "week {}: {} vs target {}",
                week.week_number,
                total,
                week.target_distance_km
            );
        }
    }

    #[test]
    fn test_sessions_are_ordered_and_dated_contiguously() {
        let plan = generate_plan(&make_request()).unwrap();
        for pair in plan.sessions.windows(2) {
            assert!(pair[0].day_date < pair[1].day_date);
            assert!(pair[0].week_number <= pair[1].week_number);
        }
        // The schedule tiles the whole window: first day is the start date,
        // last session lands the day before race day
        assert_eq!(plan.sessions[0].day_date, make_request().start_date);
        let last = plan.sessions.last().unwrap();
        assert_eq!(
            last.day_date,
            make_request().race_date - chrono::Duration::days(1)
        );
    }

    #[test]
    fn test_summary_totals_match_sessions() {
        let plan = generate_plan(&make_request()).unwrap();
        let sum: f64 = plan.sessions.iter().map(|s| s.distance_km).sum();
        assert!((plan.summary.total_distance_km - sum).abs() < 0.1);
        assert_eq!(plan.summary.race_distance_km, 30.0);
        assert_eq!(plan.summary.training_days_per_week, 4);
    }

    #[test]
    fn test_plan_generation_is_deterministic() {
        let request = make_request();
        let first = generate_plan(&request).unwrap();
        let second = generate_plan(&request).unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_unknown_race_rejected() {
        let mut request = make_request();
        request.race = "vasaloppet".to_string();
        assert!(matches!(
            generate_plan(&request),
            Err(PlanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_window_under_two_weeks_rejected() {
        let mut request = make_request();
        request.race_date = request.start_date + chrono::Duration::days(10);
        assert!(matches!(
            generate_plan(&request),
            Err(PlanError::InsufficientTime(1))
        ));
    }

    #[test]
    fn test_invalid_training_days_rejected_before_scheduling() {
        let mut request = make_request();
        request.profile.training_days_per_week = 9;
        assert!(matches!(
            generate_plan(&request),
            Err(PlanError::InvalidScheduleConstraint(9))
        ));
    }

    #[test]
    fn test_shorter_race_uses_its_own_distance() {
        let mut request = make_request();
        request.race = "lidingo_15".to_string();
        request.target_time = "1:30:00".parse().unwrap();
        let plan = generate_plan(&request).unwrap();
        assert_eq!(plan.summary.race_distance_km, 15.0);
        // 1:30:00 over 15 km is 6:00/km race pace; easy sessions are slower
        let easy = plan
            .sessions
            .iter()
            .find(|s| s.session_type == SessionType::EasyRun)
            .unwrap();
        assert!(easy.pace.unwrap().seconds_per_km() > 360);
    }
}
