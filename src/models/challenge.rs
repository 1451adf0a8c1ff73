use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

/// A preset challenge from the fixed catalog.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeKind {
    pub id: &'static str,
    pub name: &'static str,
    pub duration_days: u32,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub milestones: &'static [u32],
    pub recommended: bool,
}

pub const CHALLENGE_CATALOG: [ChallengeKind; 6] = [
    ChallengeKind {
        id: "week-warrior",
        name: "7-Day Warrior",
        duration_days: 7,
        description: "Perfect for beginners - build the habit foundation",
        difficulty: Difficulty::Beginner,
        milestones: &[3, 5, 7],
        recommended: true,
    },
    ChallengeKind {
        id: "fortitude-builder",
        name: "14-Day Fortitude",
        duration_days: 14,
        description: "Strengthen your discipline and see real changes",
        difficulty: Difficulty::Beginner,
        milestones: &[7, 10, 14],
        recommended: false,
    },
    ChallengeKind {
        id: "commitment-master",
        name: "21-Day Commitment",
        duration_days: 21,
        description: "The classic habit formation challenge",
        difficulty: Difficulty::Intermediate,
        milestones: &[7, 14, 21],
        recommended: false,
    },
    ChallengeKind {
        id: "transformation-month",
        name: "30-Day Transformation",
        duration_days: 30,
        description: "Complete lifestyle transformation",
        difficulty: Difficulty::Intermediate,
        milestones: &[7, 14, 21, 30],
        recommended: true,
    },
    ChallengeKind {
        id: "elite-performer",
        name: "60-Day Elite",
        duration_days: 60,
        description: "For serious practitioners seeking mastery",
        difficulty: Difficulty::Advanced,
        milestones: &[14, 30, 45, 60],
        recommended: false,
    },
    ChallengeKind {
        id: "legend-status",
        name: "90-Day Legend",
        duration_days: 90,
        description: "The ultimate cold shower mastery challenge",
        difficulty: Difficulty::Expert,
        milestones: &[21, 45, 60, 75, 90],
        recommended: false,
    },
];

pub fn find_kind(id: &str) -> Option<&'static ChallengeKind> {
    CHALLENGE_CATALOG.iter().find(|k| k.id == id)
}

/// One started challenge run, persisted in `challenge_runs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRun {
    pub id: i64,
    pub kind_id: String,
    /// ISO start date, inclusive.
    pub started: String,
    /// ISO date the run ends, inclusive.
    pub target_date: String,
    pub completed: bool,
    pub completed_at: Option<String>,
}

impl ChallengeRun {
    pub fn kind(&self) -> Option<&'static ChallengeKind> {
        find_kind(&self.kind_id)
    }
}
