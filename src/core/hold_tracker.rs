// Hold-to-capture state machine
//
// A pose must stay at or above the qualifying score for the configured
// duration before a capture fires. The capture latches until the score
// drops, so one hold episode produces at most one capture.

use crate::models::hold::{HoldConfig, HoldEvent, HoldState};
use crate::models::pose::PoseIdentifier;
use std::time::Instant;
use tracing::debug;

/// Outcome of feeding one frame's score to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: HoldState,
    pub event: Option<HoldEvent>,
}

/// Pure transition function. `now` must come from a monotonic clock.
pub fn advance(state: HoldState, score: u8, now: Instant, config: &HoldConfig) -> Transition {
    if score < config.qualifying_score {
        // Only a hold that never captured coaches; a zero score stays silent
        let event = match state {
            HoldState::Holding { .. } if score > 0 => Some(HoldEvent::PoseLost { score }),
            _ => None,
        };
        return Transition {
            state: HoldState::Idle,
            event,
        };
    }

    match state {
        HoldState::Idle => Transition {
            state: HoldState::Holding { started_at: now },
            event: Some(HoldEvent::HoldStarted),
        },
        HoldState::Holding { started_at } => {
            let held = now.saturating_duration_since(started_at);
            let held_ms = held.as_millis() as u64;
            if held >= config.hold_duration() {
                Transition {
                    state: HoldState::Captured { started_at },
                    event: Some(HoldEvent::CaptureFired { held_ms }),
                }
            } else {
                Transition {
                    state,
                    event: config
                        .emit_progress
                        .then_some(HoldEvent::HoldProgress { elapsed_ms: held_ms }),
                }
            }
        }
        HoldState::Captured { .. } => Transition { state, event: None },
    }
}

/// Owns the hold state of one active pose
#[derive(Debug, Clone)]
pub struct HoldTracker {
    config: HoldConfig,
    pose: PoseIdentifier,
    state: HoldState,
}

impl HoldTracker {
    pub fn new(pose: PoseIdentifier, config: HoldConfig) -> Self {
        Self {
            config,
            pose,
            state: HoldState::Idle,
        }
    }

    /// Feed the latest score; returns the event this frame produced, if any
    pub fn update(&mut self, score: u8, now: Instant) -> Option<HoldEvent> {
        let transition = advance(self.state, score, now, &self.config);

        if transition.state.phase() != self.state.phase() {
            debug!(
                pose = %self.pose,
                score,
                from = ?self.state.phase(),
                to = ?transition.state.phase(),
                "hold phase changed"
            );
        }

        self.state = transition.state;
        transition.event
    }

    /// Change the active pose. Always drops any hold in progress, even when
    /// the same pose is selected again.
    pub fn switch_pose(&mut self, pose: PoseIdentifier) {
        debug!(from = %self.pose, to = %pose, "pose switched, hold reset");
        self.pose = pose;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = HoldState::Idle;
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn pose(&self) -> PoseIdentifier {
        self.pose
    }

    pub fn config(&self) -> &HoldConfig {
        &self.config
    }

    /// Whole seconds held, for the hold timer display
    pub fn hold_seconds(&self, now: Instant) -> Option<u64> {
        self.state.elapsed(now).map(|held| held.as_secs())
    }
}
