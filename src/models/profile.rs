//! Runner profile and plan request types
//!
//! Everything the generator needs to know about the runner and the goal.
//! A request is immutable once submitted; validation happens at the intake
//! boundary before any scheduling runs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PlanError;

// ---------------------------------------------------------------------------
/// Validation Bounds
// ---------------------------------------------------------------------------

pub const MIN_HEIGHT_CM: f64 = 100.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;
pub const MIN_WEIGHT_KG: f64 = 30.0;
pub const MAX_WEIGHT_KG: f64 = 200.0;
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;
pub const MIN_TRAINING_DAYS: u8 = 3;
pub const MAX_TRAINING_DAYS: u8 = 7;

// ---------------------------------------------------------------------------
/// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

// ---------------------------------------------------------------------------
/// Fitness Level
// ---------------------------------------------------------------------------

/// Self-reported fitness level. Shifts the pace offset and volume tables,
/// not the underlying formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FitnessLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!("Unknown fitness level: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
/// Goal Time
// ---------------------------------------------------------------------------

/// A goal finish time, stored as total seconds. Parses from and renders to
/// the "HH:MM:SS" form used at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GoalTime {
    total_seconds: u32,
}

impl GoalTime {
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Result<Self, PlanError> {
        if minutes > 59 || seconds > 59 {
            return Err(PlanError::InvalidInput(format!(
                "Goal time has out-of-range components: {}:{:02}:{:02}",
                hours, minutes, seconds
            )));
        }
        let total_seconds = hours * 3600 + minutes * 60 + seconds;
        if total_seconds == 0 {
            return Err(PlanError::InvalidInput(
                "Goal time must be greater than zero".to_string(),
            ));
        }
        Ok(Self { total_seconds })
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }
}

impl fmt::Display for GoalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.total_seconds / 3600;
        let minutes = (self.total_seconds % 3600) / 60;
        let seconds = self.total_seconds % 60;
        write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl FromStr for GoalTime {
    type Err = PlanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(PlanError::InvalidInput(format!(
                "Goal time must be in HH:MM:SS format, got '{}'",
                s
            )));
        }
        let mut fields = [0u32; 3];
        for (i, part) in parts.iter().enumerate() {
            fields[i] = part.parse().map_err(|_| {
                PlanError::InvalidInput(format!("Goal time must be in HH:MM:SS format, got '{}'", s))
            })?;
        }
        Self::from_hms(fields[0], fields[1], fields[2])
    }
}

/// Wire format is the "HH:MM:SS" string, matching what calendar and
/// presentation layers expect to print.
impl Serialize for GoalTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GoalTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
/// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub fitness_level: FitnessLevel,
    pub training_days_per_week: u8,
    /// Finish times from earlier races, most recent first
    #[serde(default)]
    pub previous_race_times: Vec<GoalTime>,
    /// Current or recent injuries, free text
    #[serde(default)]
    pub injury_notes: Vec<String>,
}

// ---------------------------------------------------------------------------
/// Race Plan Request
// ---------------------------------------------------------------------------

/// One plan generation request: a profile plus the race goal. Owned by the
/// generation call and never persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacePlanRequest {
    pub profile: Profile,
    /// Race identifier, resolved against the race catalog
    pub race: String,
    pub target_time: GoalTime,
    pub start_date: NaiveDate,
    pub race_date: NaiveDate,
}

impl RacePlanRequest {
    /// Field-range and date-order checks run at the intake boundary.
    pub fn validate(&self) -> Result<(), PlanError> {
        let profile = &self.profile;

        if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&profile.height_cm) {
            return Err(PlanError::InvalidInput(format!(
                "Height must be between {} and {} cm, got {}",
                MIN_HEIGHT_CM, MAX_HEIGHT_CM, profile.height_cm
            )));
        }
        if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&profile.weight_kg) {
            return Err(PlanError::InvalidInput(format!(
                "Weight must be between {} and {} kg, got {}",
                MIN_WEIGHT_KG, MAX_WEIGHT_KG, profile.weight_kg
            )));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&profile.age) {
            return Err(PlanError::InvalidInput(format!(
                "Age must be between {} and {}, got {}",
                MIN_AGE, MAX_AGE, profile.age
            )));
        }
        if !(MIN_TRAINING_DAYS..=MAX_TRAINING_DAYS).contains(&profile.training_days_per_week) {
            return Err(PlanError::InvalidScheduleConstraint(
                profile.training_days_per_week,
            ));
        }
        if self.race_date <= self.start_date {
            return Err(PlanError::InvalidInput(format!(
                "Race date {} must be after start date {}",
                self.race_date, self.start_date
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request() -> RacePlanRequest {
        RacePlanRequest {
            profile: Profile {
                gender: Gender::Female,
                height_cm: 172.0,
                weight_kg: 64.0,
                age: 34,
                fitness_level: FitnessLevel::Intermediate,
                training_days_per_week: 4,
                previous_race_times: vec![],
                injury_notes: vec![],
            },
            race: "lidingo".to_string(),
            target_time: "3:00:00".parse().unwrap(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            race_date: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
        }
    }

    #[test]
    fn test_goal_time_parses_hms() {
        let time: GoalTime = "2:45:30".parse().unwrap();
        assert_eq!(time.total_seconds(), 2 * 3600 + 45 * 60 + 30);
        assert_eq!(time.to_string(), "2:45:30");
    }

    #[test]
    fn test_goal_time_rejects_malformed_input() {
        assert!("2:45".parse::<GoalTime>().is_err());
        assert!("abc".parse::<GoalTime>().is_err());
        assert!("2:75:00".parse::<GoalTime>().is_err());
        assert!("0:00:00".parse::<GoalTime>().is_err());
    }

    #[test]
    fn test_goal_time_serializes_as_string() {
        let time: GoalTime = "3:00:00".parse().unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"3:00:00\"");

        let back: GoalTime = serde_json::from_str("\"3:00:00\"").unwrap();
        assert_eq!(back, time);
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(make_request().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_age_rejected() {
        let mut request = make_request();
        request.profile.age = 17;
        assert!(matches!(
            request.validate(),
            Err(PlanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_range_training_days_rejected() {
        let mut request = make_request();
        request.profile.training_days_per_week = 8;
        assert!(matches!(
            request.validate(),
            Err(PlanError::InvalidScheduleConstraint(8))
        ));

        request.profile.training_days_per_week = 2;
        assert!(matches!(
            request.validate(),
            Err(PlanError::InvalidScheduleConstraint(2))
        ));
    }

    #[test]
    fn test_race_date_must_follow_start_date() {
        let mut request = make_request();
        request.race_date = request.start_date;
        assert!(request.validate().is_err());

        request.race_date = request.start_date - chrono::Duration::days(1);
        assert!(request.validate().is_err());
    }
}
