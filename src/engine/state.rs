//! Per-user conversation state — which flow is in progress and what it
//! has collected so far.

use serde::{Deserialize, Serialize};

/// The active flow for one user, at most one at a time.
///
/// Each variant carries exactly the data needed to finish its flow.
/// Completion clears back to `Idle`; a failed parse leaves the state
/// untouched so the user can retry in place; starting a new flow command
/// replaces whatever was in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    // Profile setup, one answer per step.
    AwaitingWeight,
    AwaitingHeight {
        weight_kg: f64,
    },
    AwaitingAge {
        weight_kg: f64,
        height_cm: f64,
    },
    AwaitingActivity {
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
    },
    AwaitingCity {
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        activity_minutes: u32,
    },
    // Water logging.
    AwaitingWaterAmount,
    // Food logging.
    AwaitingFoodName,
    AwaitingFoodWeight {
        food_name: String,
        calories_per_100: f64,
    },
    // Workout logging.
    AwaitingWorkoutType,
    AwaitingWorkoutDuration {
        workout_kind: String,
    },
    CommitWorkout {
        workout_kind: String,
        duration_minutes: u32,
    },
}

impl ConversationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a profile-setup flow is in progress. The access guard lets
    /// these replies through even though no profile exists yet.
    pub fn in_profile_setup(&self) -> bool {
        matches!(
            self,
            Self::AwaitingWeight
                | Self::AwaitingHeight { .. }
                | Self::AwaitingAge { .. }
                | Self::AwaitingActivity { .. }
                | Self::AwaitingCity { .. }
        )
    }
}
