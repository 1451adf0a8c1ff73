use serde::{Deserialize, Serialize};

/// One checklist item for a date. `slot` orders goals within the day and
/// is the stable handle for toggling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGoal {
    pub slot: i32,
    pub title: String,
    pub completed: bool,
}

/// The checklist every date starts with. A date with no stored goals is
/// treated as carrying exactly these, all unticked; the first write for a
/// date materializes them as rows.
pub fn default_goals() -> Vec<DailyGoal> {
    vec![
        DailyGoal {
            slot: 1,
            title: "Take cold shower".to_string(),
            completed: false,
        },
        DailyGoal {
            slot: 2,
            title: "Stay for 2+ minutes".to_string(),
            completed: false,
        },
        DailyGoal {
            slot: 3,
            title: "Focus on breathing".to_string(),
            completed: false,
        },
    ]
}
