pub mod plan;
pub mod profile;

pub use plan::{Session, TrainingPlan, WeekPlan};
pub use profile::{Profile, RacePlanRequest};
