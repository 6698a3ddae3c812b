// Data models for the hold-to-capture state machine

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Hold tracker state. The hold start lives inside the variants that need it,
/// so an Idle state can never carry a stale timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldState {
    /// No sustained qualifying pose
    #[default]
    Idle,
    /// Score has stayed qualifying since `started_at`
    Holding { started_at: Instant },
    /// Capture already fired for this episode; latched until the score drops
    Captured { started_at: Instant },
}

/// Phase tag of a [`HoldState`], for display and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldPhase {
    Idle,
    Holding,
    Captured,
}

impl HoldState {
    pub fn phase(&self) -> HoldPhase {
        match self {
            HoldState::Idle => HoldPhase::Idle,
            HoldState::Holding { .. } => HoldPhase::Holding,
            HoldState::Captured { .. } => HoldPhase::Captured,
        }
    }

    pub fn hold_start(&self) -> Option<Instant> {
        match self {
            HoldState::Idle => None,
            HoldState::Holding { started_at } | HoldState::Captured { started_at } => {
                Some(*started_at)
            }
        }
    }

    /// Time held so far; zero if `now` is earlier than the hold start
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.hold_start()
            .map(|started_at| now.saturating_duration_since(started_at))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, HoldState::Idle)
    }
}

/// Discrete events emitted by the hold tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HoldEvent {
    /// Score reached the qualifying threshold from Idle
    HoldStarted,
    /// Still holding; for progress display
    HoldProgress { elapsed_ms: u64 },
    /// Hold reached the required duration (fires once per episode)
    CaptureFired { held_ms: u64 },
    /// A hold that had not yet captured dropped below the threshold
    PoseLost { score: u8 },
}

/// Thresholds driving the hold tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldConfig {
    pub qualifying_score: u8,    // Default: 80
    pub hold_duration_ms: u64,   // Default: 3000
    pub emit_progress: bool,     // Default: true
}

impl HoldConfig {
    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms)
    }
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            qualifying_score: 80,
            hold_duration_ms: 3000,
            emit_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_start() {
        let state = HoldState::default();
        assert!(state.is_idle());
        assert_eq!(state.phase(), HoldPhase::Idle);
        assert_eq!(state.elapsed(Instant::now()), None);
    }

    #[test]
    fn test_elapsed_saturates() {
        let t0 = Instant::now();
        let state = HoldState::Holding { started_at: t0 + Duration::from_millis(500) };
        assert_eq!(state.elapsed(t0), Some(Duration::ZERO));
        assert_eq!(
            state.elapsed(t0 + Duration::from_millis(1500)),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn test_hold_event_serialization() {
        let json = serde_json::to_string(&HoldEvent::CaptureFired { held_ms: 3000 }).unwrap();
        assert_eq!(json, r#"{"type":"capture_fired","held_ms":3000}"#);
    }
}
