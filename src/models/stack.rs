use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a step sits relative to the shower itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPhase {
    Before,
    During,
    After,
}

impl StepPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepPhase::Before => "before",
            StepPhase::During => "during",
            StepPhase::After => "after",
        }
    }
}

impl FromStr for StepPhase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(StepPhase::Before),
            "during" => Ok(StepPhase::During),
            "after" => Ok(StepPhase::After),
            _ => Err(anyhow::anyhow!("Unknown step phase: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackStep {
    pub id: i64,
    pub stack_id: i64,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub position: i32,
    pub phase: StepPhase,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStack {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub active: bool,
}

/// A preset routine seeded into the database on first run.
pub struct StackPreset {
    pub name: &'static str,
    pub description: &'static str,
    /// (name, description, duration minutes, phase, required)
    pub steps: &'static [(&'static str, &'static str, i32, StepPhase, bool)],
}

pub const STACK_PRESETS: [StackPreset; 3] = [
    StackPreset {
        name: "Morning Warrior",
        description: "Complete morning routine for peak performance",
        steps: &[
            ("Gratitude Practice", "Write 3 things you're grateful for", 5, StepPhase::Before, true),
            ("Deep Breathing", "10 deep breaths to prepare mentally", 3, StepPhase::Before, true),
            ("Cold Shower", "The main event - cold water therapy", 3, StepPhase::During, true),
            ("Intention Setting", "Set your intention for the day", 5, StepPhase::After, true),
            ("Protein Smoothie", "Fuel your body with nutrition", 5, StepPhase::After, false),
        ],
    },
    StackPreset {
        name: "Athletic Performance",
        description: "Optimize recovery and performance",
        steps: &[
            ("Light Stretching", "Prepare your body with gentle movement", 10, StepPhase::Before, true),
            ("Contrast Shower", "Alternate hot and cold water", 5, StepPhase::During, true),
            ("Meditation", "5-minute mindfulness practice", 5, StepPhase::After, true),
            ("Recovery Drink", "Hydrate with electrolytes", 2, StepPhase::After, false),
        ],
    },
    StackPreset {
        name: "Stress Resilience",
        description: "Build mental toughness and stress immunity",
        steps: &[
            ("Box Breathing", "4-4-4-4 breathing technique", 5, StepPhase::Before, true),
            ("Wim Hof Method", "Breathing technique + cold exposure", 10, StepPhase::During, true),
            ("Journaling", "Write about your experience and feelings", 10, StepPhase::After, true),
            ("Power Pose", "2-minute confidence boost", 2, StepPhase::After, false),
        ],
    },
];
