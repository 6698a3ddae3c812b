// Data models for posing sessions: per-frame outcomes, events, captures and statistics

use super::hold::{HoldEvent, HoldPhase};
use super::pose::{PoseIdentifier, ScoreBand, ScoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Everything the presentation layer needs after one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub pose: PoseIdentifier,
    pub result: ScoreResult,
    pub band: ScoreBand,
    pub phase: HoldPhase,
    pub hold_seconds: Option<u64>, // Whole seconds held, while a hold is active
    pub event: Option<HoldEvent>,
}

/// Hold event tagged with the session context, sent to the cue task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub session_id: Uuid,
    pub pose: PoseIdentifier,
    pub event: HoldEvent,
    pub at: DateTime<Utc>,
}

/// Request for the host to persist the current camera image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub session_id: Uuid,
    pub pose: PoseIdentifier,
    pub file_name: String,
    pub path: PathBuf,
    pub captured_at: DateTime<Utc>,
    pub manual: bool,
}

impl CaptureRequest {
    pub fn new(
        session_id: Uuid,
        pose: PoseIdentifier,
        captured_at: DateTime<Utc>,
        capture_dir: &Path,
        manual: bool,
    ) -> Self {
        let file_name = capture_file_name(pose, captured_at);
        Self {
            session_id,
            pose,
            path: capture_dir.join(&file_name),
            file_name,
            captured_at,
            manual,
        }
    }

    /// Notification text shown to the athlete
    pub fn notification(&self) -> &'static str {
        if self.manual {
            "Screenshot saved!"
        } else {
            "Perfect! Screenshot captured!"
        }
    }
}

/// `Front_Double_Biceps_1700000000000.png`
pub fn capture_file_name(pose: PoseIdentifier, captured_at: DateTime<Utc>) -> String {
    let stem = pose
        .display_name()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}.png", stem, captured_at.timestamp_millis())
}

/// Aggregate numbers for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total_frames: u64,
    pub frames_with_body: u64,
    pub average_score: f32, // Over frames with a detected body
    pub best_score: u8,
    pub holds_started: u32,
    pub captures: u32,
    pub poses_lost: u32,
    pub pose_switches: u32,
    #[serde(skip)]
    score_sum: u64,
}

impl SessionStatistics {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            started_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn record_frame(&mut self, detected: bool, score: u8) {
        self.total_frames += 1;
        if !detected {
            return;
        }
        self.frames_with_body += 1;
        self.score_sum += u64::from(score);
        self.best_score = self.best_score.max(score);
        self.average_score = self.score_sum as f32 / self.frames_with_body as f32;
    }

    pub fn record_event(&mut self, event: &HoldEvent) {
        match event {
            HoldEvent::HoldStarted => self.holds_started += 1,
            HoldEvent::CaptureFired { .. } => self.captures += 1,
            HoldEvent::PoseLost { .. } => self.poses_lost += 1,
            HoldEvent::HoldProgress { .. } => {}
        }
    }
}

/// One line of a recorded landmark stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Milliseconds since the start of the recording
    pub t_ms: u64,
    pub landmarks: Option<Vec<[f64; 3]>>,
    /// Pose selection change taking effect on this frame
    #[serde(default)]
    pub pose: Option<String>,
}
