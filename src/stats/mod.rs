pub mod aggregate;
pub mod streak;

pub use aggregate::compute_aggregate;
pub use streak::compute_streaks;
