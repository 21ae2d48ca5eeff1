//! Engine configuration.
//!
//! Scoring constants and the two timer delays live here so embedders and
//! tests can tune them. The deck catalog itself is not configuration; it is
//! fixed at build time (see [`crate::catalog`]).

use serde::{Deserialize, Serialize};

/// How auto-play steps interact with a pending mismatch revert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPolicy {
    /// Auto-play waits while the session is locked. A step that finds the
    /// lock held is deferred and the card is kept for the next step.
    #[default]
    Serialized,
    /// Auto-play ignores the lock. Selections keep landing while a revert is
    /// pending, so a single revert window can produce several mismatches.
    Interleaved,
}

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Points awarded for completing a set (default: 20).
    pub match_points: u32,

    /// Points lost when a mismatch is reverted (default: 1).
    /// The score never drops below zero.
    pub mismatch_penalty: u32,

    /// Delay before mismatched cards turn face-down again (default: 1000ms).
    pub revert_delay_ms: u64,

    /// Delay between auto-play selections (default: 200ms).
    pub auto_play_step_ms: u64,

    /// Auto-play/revert interaction.
    pub timer_policy: TimerPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_points: 20,
            mismatch_penalty: 1,
            revert_delay_ms: 1000,
            auto_play_step_ms: 200,
            timer_policy: TimerPolicy::Serialized,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match_points(mut self, points: u32) -> Self {
        self.match_points = points;
        self
    }

    pub fn with_mismatch_penalty(mut self, penalty: u32) -> Self {
        self.mismatch_penalty = penalty;
        self
    }

    pub fn with_revert_delay_ms(mut self, ms: u64) -> Self {
        self.revert_delay_ms = ms;
        self
    }

    pub fn with_auto_play_step_ms(mut self, ms: u64) -> Self {
        self.auto_play_step_ms = ms;
        self
    }

    pub fn with_timer_policy(mut self, policy: TimerPolicy) -> Self {
        self.timer_policy = policy;
        self
    }
}
