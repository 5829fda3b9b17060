//! Training plan output types
//!
//! The data handed to downstream formatting collaborators (calendar export,
//! presentation). Generated once per request and immutable afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::profile::{FitnessLevel, GoalTime};

// ---------------------------------------------------------------------------
/// Phase: a contiguous block of weeks with a shared emphasis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Base,
    Build,
    Peak,
    Taper,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Base => "base",
            Phase::Build => "build",
            Phase::Peak => "peak",
            Phase::Taper => "taper",
        }
    }

    /// Week focus label copied onto every session of the phase
    pub fn focus(&self) -> &'static str {
        match self {
            Phase::Base => "Base building",
            Phase::Build => "Strength and speed",
            Phase::Peak => "Race preparation",
            Phase::Taper => "Taper",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Base => "Build aerobic fitness and running volume",
            Phase::Build => "Develop running strength and speed",
            Phase::Peak => "Train at race effort and sharpen form",
            Phase::Taper => "Reduce volume and rest up for the race",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "build" => Ok(Self::Build),
            "peak" => Ok(Self::Peak),
            "taper" => Ok(Self::Taper),
            _ => Err(format!("Unknown phase: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
/// Session Type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    EasyRun,
    LongRun,
    Tempo,
    Interval,
    Rest,
    CrossTrain,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::EasyRun => "easy_run",
            SessionType::LongRun => "long_run",
            SessionType::Tempo => "tempo",
            SessionType::Interval => "interval",
            SessionType::Rest => "rest",
            SessionType::CrossTrain => "cross_train",
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, SessionType::Rest)
    }

    /// Running sessions carry a target pace; rest and cross training do not
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            SessionType::EasyRun | SessionType::LongRun | SessionType::Tempo | SessionType::Interval
        )
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
/// Pace: time per kilometer
// ---------------------------------------------------------------------------

/// A training pace in seconds per kilometer. Serialized as the "M:SS/km"
/// string the calendar and presentation layers print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pace {
    seconds_per_km: u32,
}

impl Pace {
    pub fn from_seconds_per_km(seconds_per_km: u32) -> Self {
        Self { seconds_per_km }
    }

    pub fn seconds_per_km(&self) -> u32 {
        self.seconds_per_km
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}/km",
            self.seconds_per_km / 60,
            self.seconds_per_km % 60
        )
    }
}

impl FromStr for Pace {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.strip_suffix("/km").unwrap_or(s);
        let (minutes, seconds) = value
            .split_once(':')
            .ok_or_else(|| format!("Pace must be in M:SS form, got '{}'", s))?;
        let minutes: u32 = minutes
            .parse()
            .map_err(|_| format!("Pace must be in M:SS form, got '{}'", s))?;
        let seconds: u32 = seconds
            .parse()
            .map_err(|_| format!("Pace must be in M:SS form, got '{}'", s))?;
        if seconds > 59 {
            return Err(format!("Pace seconds out of range in '{}'", s));
        }
        Ok(Self::from_seconds_per_km(minutes * 60 + seconds))
    }
}

impl Serialize for Pace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pace {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
/// Week Plan
// ---------------------------------------------------------------------------

/// One week of the periodized volume curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-based, contiguous across the plan
    pub week_number: u32,
    pub phase: Phase,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target_distance_km: f64,
    /// Step-back week with reduced volume
    pub is_recovery_week: bool,
}

// ---------------------------------------------------------------------------
/// Session
// ---------------------------------------------------------------------------

/// One scheduled calendar-day activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub week_number: u32,
    pub day_date: NaiveDate,
    pub day_name: String,
    pub session_type: SessionType,
    /// Zero for rest days
    pub distance_km: f64,
    /// None for rest days and cross training
    pub pace: Option<Pace>,
    pub description: String,
    /// Focus label of the owning week's phase
    pub week_focus: String,
}

// ---------------------------------------------------------------------------
/// Training Plan
// ---------------------------------------------------------------------------

/// Plan-level totals plus the profile fields downstream formatting needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub race_id: String,
    pub race_name: String,
    pub race_date: NaiveDate,
    pub race_distance_km: f64,
    pub target_time: GoalTime,
    pub fitness_level: FitnessLevel,
    pub training_days_per_week: u8,
    pub total_weeks: u32,
    pub total_distance_km: f64,
}

/// The complete generated plan: summary, weekly volume curve, and every
/// session ordered by (week_number, day_date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub summary: PlanSummary,
    pub weeks: Vec<WeekPlan>,
    pub sessions: Vec<Session>,
}

impl TrainingPlan {
    pub fn sessions_for_week(&self, week_number: u32) -> impl Iterator<Item = &Session> {
        self.sessions
            .iter()
            .filter(move |s| s.week_number == week_number)
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
