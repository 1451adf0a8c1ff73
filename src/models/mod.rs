pub mod challenge;
pub mod day;
pub mod goal;
pub mod stack;
pub mod stats;

pub use challenge::{ChallengeKind, ChallengeRun, Difficulty, CHALLENGE_CATALOG};
pub use day::TrackedDay;
pub use goal::{default_goals, DailyGoal};
pub use stack::{HabitStack, StackStep, StepPhase, STACK_PRESETS};
pub use stats::{Aggregate, Streak, TimeBucket, Window, MONTHS, STREAK_BUCKETS, WEEKDAYS};
