// Pose scorers and the dispatcher selecting one per frame
//
// Every scorer is a pure function of one frame's landmarks. Gates reject
// frames where the limbs are not in a plausible configuration, returning a
// zero score with a directive message instead of an error.

pub mod back_double_biceps;
pub mod bands;
pub mod front_double_biceps;
pub mod lat_flex;
pub mod side_chest;

use crate::core::geometry::angle_between;
use crate::models::pose::{BodyLandmark, Landmark, LandmarkSet, PoseIdentifier, ScoreResult};

pub const UNKNOWN_POSE_FEEDBACK: &str = "Unknown pose";
pub const NO_POSE_FEEDBACK: &str = "No pose detected";

/// Minimum height of each wrist above its shoulder (normalized y)
const RAISED_WRIST_MARGIN: f64 = 0.02;

/// Score a frame for a known pose
pub fn score_pose_id(pose: PoseIdentifier, landmarks: &LandmarkSet) -> ScoreResult {
    match pose {
        PoseIdentifier::FrontDoubleBiceps => front_double_biceps::score(landmarks),
        PoseIdentifier::BackDoubleBiceps => back_double_biceps::score(landmarks),
        PoseIdentifier::SideChest => side_chest::score(landmarks),
        PoseIdentifier::LatFlex => lat_flex::score(landmarks),
    }
}

/// Score a raw detector frame. Missing or truncated landmarks short-circuit
/// to a zero score without running any scorer.
pub fn score_frame(pose: PoseIdentifier, landmarks: Option<&[Landmark]>) -> ScoreResult {
    match landmarks.and_then(LandmarkSet::from_slice) {
        Some(set) => score_pose_id(pose, &set),
        None => ScoreResult::rejected(NO_POSE_FEEDBACK),
    }
}

/// Score by pose name as chosen in the UI. Unknown names score zero; the
/// caller may be between two pose selections.
pub fn score_pose(pose_name: &str, landmarks: Option<&[Landmark]>) -> ScoreResult {
    match pose_name.parse::<PoseIdentifier>() {
        Ok(pose) => score_frame(pose, landmarks),
        Err(_) => ScoreResult::rejected(UNKNOWN_POSE_FEEDBACK),
    }
}

/// Shoulder-elbow-wrist angle for (left, right) arm
pub(crate) fn elbow_angles(landmarks: &LandmarkSet) -> Option<(f64, f64)> {
    let left = angle_between(
        landmarks.get(BodyLandmark::LeftShoulder),
        landmarks.get(BodyLandmark::LeftElbow),
        landmarks.get(BodyLandmark::LeftWrist),
    )?;
    let right = angle_between(
        landmarks.get(BodyLandmark::RightShoulder),
        landmarks.get(BodyLandmark::RightElbow),
        landmarks.get(BodyLandmark::RightWrist),
    )?;
    Some((left, right))
}

/// Both wrists clearly above their shoulders (smaller y is higher)
pub(crate) fn wrists_above_shoulders(landmarks: &LandmarkSet) -> bool {
    let left_wrist = landmarks.get(BodyLandmark::LeftWrist);
    let right_wrist = landmarks.get(BodyLandmark::RightWrist);
    let left_shoulder = landmarks.get(BodyLandmark::LeftShoulder);
    let right_shoulder = landmarks.get(BodyLandmark::RightShoulder);

    left_wrist.y < left_shoulder.y - RAISED_WRIST_MARGIN
        && right_wrist.y < right_shoulder.y - RAISED_WRIST_MARGIN
}

/// Clamp to [0, 100] and round half away from zero
pub(crate) fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}
