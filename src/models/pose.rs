// Data models for landmarks, pose identifiers and per-frame scoring results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==============================================================================
// Body Landmarks (MediaPipe Pose, 33 keypoints)
// ==============================================================================

/// MediaPipe Pose Landmark indices (33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    pub const COUNT: usize = 33;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single detected body keypoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64, // Normalized [0, 1] for image coordinates
    pub y: f64, // Normalized [0, 1], grows downwards
    pub z: f64, // Depth relative to the hip midpoint
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Landmark {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

/// Landmarks of one frame, guaranteed to cover every index a scorer reads
#[derive(Debug, Clone)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    /// Scorers read up to the right hip (index 24)
    pub const MIN_LEN: usize = BodyLandmark::RightHip as usize + 1;

    /// Wrap a detector frame; `None` when the frame is too short to score
    pub fn new(points: Vec<Landmark>) -> Option<Self> {
        if points.len() < Self::MIN_LEN {
            return None;
        }
        Some(Self { points })
    }

    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        Self::new(points.to_vec())
    }

    pub fn get(&self, landmark: BodyLandmark) -> Landmark {
        // MIN_LEN covers every index up to RightHip; later points are optional
        self.points
            .get(landmark.index())
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ==============================================================================
// Pose Identifiers
// ==============================================================================

/// Reference bodybuilding poses that can be scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseIdentifier {
    FrontDoubleBiceps,
    BackDoubleBiceps,
    SideChest,
    LatFlex,
}

impl PoseIdentifier {
    pub fn all() -> [PoseIdentifier; 4] {
        [
            PoseIdentifier::FrontDoubleBiceps,
            PoseIdentifier::BackDoubleBiceps,
            PoseIdentifier::SideChest,
            PoseIdentifier::LatFlex,
        ]
    }

    /// Name shown to the athlete
    pub fn display_name(&self) -> &'static str {
        match self {
            PoseIdentifier::FrontDoubleBiceps => "Front Double Biceps",
            PoseIdentifier::BackDoubleBiceps => "Back Double Biceps",
            PoseIdentifier::SideChest => "Side Chest",
            PoseIdentifier::LatFlex => "Lat Flex",
        }
    }

    pub fn to_id_string(&self) -> &'static str {
        match self {
            PoseIdentifier::FrontDoubleBiceps => "front_double_biceps",
            PoseIdentifier::BackDoubleBiceps => "back_double_biceps",
            PoseIdentifier::SideChest => "side_chest",
            PoseIdentifier::LatFlex => "lat_flex",
        }
    }
}

impl fmt::Display for PoseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PoseIdentifier {
    type Err = PoseError;

    /// Accepts display names ("Side Chest") and ids ("side_chest")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PoseIdentifier::all()
            .into_iter()
            .find(|pose| pose.display_name() == trimmed || pose.to_id_string() == trimmed)
            .ok_or_else(|| PoseError::UnknownPose(trimmed.to_string()))
    }
}

// ==============================================================================
// Score Result
// ==============================================================================

/// Measurements a score was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreDiagnostics {
    /// Elbow angles in degrees, left and right arm
    ElbowAngles { left: f64, right: f64 },
    /// Side chest: the more bent arm is the front arm
    ArmAngles { front: f64, back: f64 },
    /// Wrist width divided by shoulder width
    SpreadRatio { ratio: f64 },
}

/// Scoring result for a single frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8, // 0-100
    pub feedback: String,
    pub diagnostics: Option<ScoreDiagnostics>,
}

impl ScoreResult {
    pub fn new(score: u8, feedback: impl Into<String>, diagnostics: ScoreDiagnostics) -> Self {
        Self {
            score: score.min(100),
            feedback: feedback.into(),
            diagnostics: Some(diagnostics),
        }
    }

    /// Zero score with a directive message, no measurements taken
    pub fn rejected(feedback: impl Into<String>) -> Self {
        Self {
            score: 0,
            feedback: feedback.into(),
            diagnostics: None,
        }
    }
}

/// Rough quality band used for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Poor,
}

impl ScoreBand {
    pub fn classify(score: u8, qualifying_score: u8) -> Self {
        if score >= qualifying_score {
            ScoreBand::Good
        } else {
            ScoreBand::Poor
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::Poor => "poor",
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Unknown pose: {0}")]
    UnknownPose(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No pose session running")]
    SessionNotRunning,

    #[error("Pose session already running")]
    SessionAlreadyRunning,

    #[error("Feedback sink failed: {0}")]
    SinkFailed(String),
}

pub type PoseResult<T> = Result<T, PoseError>;
