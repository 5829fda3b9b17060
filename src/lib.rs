//! Periodized training plan generation
//!
//! Turns a runner's profile and race goal into a dated, week-by-week
//! training schedule: weekly volume builds toward the race through base,
//! build and peak phases with periodic step-back weeks, then tapers so the
//! runner arrives rested. Every session carries a type, a distance and a
//! target pace derived from the goal time.
//!
//! Generation is a pure, synchronous computation: no I/O, no shared
//! mutable state, safe to run concurrently one invocation per request.

pub mod error;
pub mod generator;
pub mod models;
pub mod paces;
pub mod periodization;
pub mod races;
pub mod schedule;

pub use error::PlanError;
pub use generator::generate_plan;
pub use models::plan::{Pace, Phase, PlanSummary, Session, SessionType, TrainingPlan, WeekPlan};
pub use models::profile::{FitnessLevel, Gender, GoalTime, Profile, RacePlanRequest};
pub use paces::PaceSet;
pub use races::RaceInfo;
pub use schedule::ScheduleOptions;
