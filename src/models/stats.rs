use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Time window for aggregate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Last 7 calendar days, inclusive of today.
    Week,
    /// Last 30 calendar days, inclusive of today.
    Month,
    /// The entire collection.
    All,
}

impl Window {
    pub fn label(&self) -> &'static str {
        match self {
            Window::Week => "Last 7 Days",
            Window::Month => "Last 30 Days",
            Window::All => "All Time",
        }
    }
}

impl FromStr for Window {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "7d" => Ok(Window::Week),
            "month" | "30d" => Ok(Window::Month),
            "all" => Ok(Window::All),
            _ => Err(anyhow::anyhow!("Unknown window '{}'. Use: week, month, all", s)),
        }
    }
}

/// Fixed 3-hour completion buckets spanning 05:00-23:00. Variant order
/// matters: ties in `best_time_of_day` resolve to the earliest bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBucket {
    EarlyMorning,
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 6] = [
        TimeBucket::EarlyMorning,
        TimeBucket::Morning,
        TimeBucket::Midday,
        TimeBucket::Afternoon,
        TimeBucket::Evening,
        TimeBucket::Night,
    ];

    /// Bucket for an hour-of-day; hours outside 05:00-23:00 belong to none.
    pub fn from_hour(hour: u32) -> Option<TimeBucket> {
        match hour {
            5..=7 => Some(TimeBucket::EarlyMorning),
            8..=10 => Some(TimeBucket::Morning),
            11..=13 => Some(TimeBucket::Midday),
            14..=16 => Some(TimeBucket::Afternoon),
            17..=19 => Some(TimeBucket::Evening),
            20..=22 => Some(TimeBucket::Night),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeBucket::EarlyMorning => "Early Morning (5-8 AM)",
            TimeBucket::Morning => "Morning (8-11 AM)",
            TimeBucket::Midday => "Midday (11 AM-2 PM)",
            TimeBucket::Afternoon => "Afternoon (2-5 PM)",
            TimeBucket::Evening => "Evening (5-8 PM)",
            TimeBucket::Night => "Night (8-11 PM)",
        }
    }
}

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const STREAK_BUCKETS: [&str; 5] = ["1-3", "4-7", "8-14", "15-30", "30+"];

/// Everything the analytics views derive from one window of day records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aggregate {
    pub window: Window,
    /// Window denominator: 7, 30, or the distinct-date count for `All`.
    pub total_days: u32,
    pub total_completions: u32,
    pub completion_rate: f64,
    /// Percent completed per weekday, indexed Sun..Sat.
    pub weekday_completion: [f64; 7],
    /// Percent completed per calendar month, indexed Jan..Dec.
    pub month_completion: [f64; 12],
    pub average_duration_seconds: f64,
    pub average_mood_before: f64,
    pub average_mood_after: f64,
    pub best_time_of_day: Option<TimeBucket>,
    /// Maximal completed runs bucketed per `STREAK_BUCKETS`.
    pub streak_distribution: [u32; 5],
    /// Completion flag per day for the last 7 days, oldest first.
    pub weekly_trend: Vec<bool>,
    /// Completions per week for the last 12 weeks, oldest first.
    pub twelve_week_trend: Vec<u32>,
}

impl Aggregate {
    /// Weekday with the highest completion rate, if any weekday scored.
    pub fn best_weekday(&self) -> Option<(&'static str, f64)> {
        self.weekday_completion
            .iter()
            .enumerate()
            .filter(|(_, rate)| **rate > 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, rate)| (WEEKDAYS[i], *rate))
    }
}
