//! State - Champion action state machine and crowd control flags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutually exclusive action states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionState {
    #[default]
    Idle,
    AttackStartingUp,
    AttackRecovering,
    AttackCoolingDown,
    Casting,
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionState::Idle => "Idle",
            ActionState::AttackStartingUp => "AttackStartingUp",
            ActionState::AttackRecovering => "AttackRecovering",
            ActionState::AttackCoolingDown => "AttackCoolingDown",
            ActionState::Casting => "Casting",
        };
        f.write_str(label)
    }
}

/// Action state plus crowd-control bookkeeping.
///
/// Stun is orthogonal to the action state: a stunned champion keeps its
/// current action but takes no new decisions until the stun ends.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct State {
    pub previous_action: ActionState,
    pub current_action: ActionState,

    // === Crowd control ===
    pub is_stunned: bool,
    pub cc_start_time: f64,
    pub cc_duration: f64,

    // === Current action timing ===
    pub action_start_time: f64,
    pub action_duration: f64,

    /// Time at which the pending attack cooldown finishes
    pub attack_ready_at: f64,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new action state
    pub fn transition(&mut self, next: ActionState, now: f64, duration: f64) {
        self.previous_action = self.current_action;
        self.current_action = next;
        self.action_start_time = now;
        self.action_duration = duration;
    }

    pub fn is(&self, action: ActionState) -> bool {
        self.current_action == action
    }

    /// Casting or winding up an attack
    pub fn is_busy(&self) -> bool {
        matches!(
            self.current_action,
            ActionState::Casting | ActionState::AttackStartingUp
        )
    }

    pub fn start_stun(&mut self, now: f64, duration: f64) {
        self.is_stunned = true;
        self.cc_start_time = now;
        self.cc_duration = duration;
    }

    /// When the current crowd control ends
    pub fn cc_end_time(&self) -> f64 {
        self.cc_start_time + self.cc_duration
    }

    pub fn clear_stun(&mut self) {
        self.is_stunned = false;
        self.cc_duration = 0.0;
    }
}
