mod planner;

pub use planner::{MigrationPlan, MigrationPlanner, SkipReason, SkippedEntity};
