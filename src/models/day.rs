use serde::{Deserialize, Serialize};

/// One tracked calendar date. At most one record exists per date; the
/// repository merges writes field-by-field, so a row may hold a mood or
/// duration without the shower itself being confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedDay {
    /// ISO `YYYY-MM-DD`, unique within the collection.
    pub date: String,
    pub completed: bool,
    #[serde(default)]
    pub extra_cold: bool,
    #[serde(default)]
    pub felt_great: bool,
    pub duration_seconds: Option<i64>,
    /// 1-5 ordinal scale.
    pub mood_before: Option<i32>,
    pub mood_after: Option<i32>,
    pub note: Option<String>,
    /// Local datetime `YYYY-MM-DD HH:MM:SS`; set when a day is logged as
    /// today. Only consumed by the time-of-day aggregation.
    pub completed_at: Option<String>,
}

impl TrackedDay {
    pub fn new(date: impl Into<String>) -> Self {
        TrackedDay {
            date: date.into(),
            completed: false,
            extra_cold: false,
            felt_great: false,
            duration_seconds: None,
            mood_before: None,
            mood_after: None,
            note: None,
            completed_at: None,
        }
    }

    pub fn completed_on(date: impl Into<String>) -> Self {
        TrackedDay {
            completed: true,
            ..Self::new(date)
        }
    }
}
