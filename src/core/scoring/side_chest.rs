// Side Chest: arms held in front of the torso, front arm tightly bent

use super::bands::{Band, BandTable};
use super::{elbow_angles, to_score};
use crate::models::pose::{BodyLandmark, LandmarkSet, ScoreDiagnostics, ScoreResult};

const FRONT_ARM_BANDS: BandTable = BandTable::new(
    &[Band::new(50.0, 100.0, 100), Band::new(40.0, 120.0, 80)],
    55,
);

const BACK_ARM_BANDS: BandTable = BandTable::new(
    &[Band::new(70.0, 140.0, 100), Band::new(60.0, 160.0, 80)],
    60,
);

const FRONT_WEIGHT: f64 = 0.7;
const BACK_WEIGHT: f64 = 0.3;
/// Inset of the chest zone from the shoulder and hip lines
const CHEST_ZONE_MARGIN: f64 = 0.05;

const GATE_FEEDBACK: &str = "Bring arms in front of chest";

/// At least one wrist strictly between the chest top and bottom lines
fn wrist_at_chest_height(landmarks: &LandmarkSet) -> bool {
    let chest_top = landmarks
        .get(BodyLandmark::LeftShoulder)
        .y
        .min(landmarks.get(BodyLandmark::RightShoulder).y)
        + CHEST_ZONE_MARGIN;
    let chest_bottom = landmarks
        .get(BodyLandmark::LeftHip)
        .y
        .max(landmarks.get(BodyLandmark::RightHip).y)
        - CHEST_ZONE_MARGIN;

    [BodyLandmark::LeftWrist, BodyLandmark::RightWrist]
        .into_iter()
        .map(|wrist| landmarks.get(wrist).y)
        .any(|y| chest_top < y && y < chest_bottom)
}

pub fn score(landmarks: &LandmarkSet) -> ScoreResult {
    if !wrist_at_chest_height(landmarks) {
        return ScoreResult::rejected(GATE_FEEDBACK);
    }
    let Some((left, right)) = elbow_angles(landmarks) else {
        return ScoreResult::rejected(GATE_FEEDBACK);
    };

    // The more bent arm is the one in front
    let front = left.min(right);
    let back = left.max(right);

    let raw = (FRONT_WEIGHT * f64::from(FRONT_ARM_BANDS.score(front))
        + BACK_WEIGHT * f64::from(BACK_ARM_BANDS.score(back)))
    .clamp(0.0, 100.0);

    let feedback = if raw >= 85.0 {
        "Nice side chest!"
    } else if front < 50.0 {
        "Squeeze chest more"
    } else {
        "Adjust arm position"
    };

    ScoreResult::new(
        to_score(raw),
        feedback,
        ScoreDiagnostics::ArmAngles { front, back },
    )
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::Body;
    use super::*;

    #[test]
    fn test_ideal_pose() {
        let result = score(&Body::chest_arms(75.0, 110.0).set());
        assert_eq!(result.score, 100);
        assert_eq!(result.feedback, "Nice side chest!");
        match result.diagnostics {
            Some(ScoreDiagnostics::ArmAngles { front, back }) => {
                assert!((front - 75.0).abs() < 1e-3);
                assert!((back - 110.0).abs() < 1e-3);
            }
            other => panic!("unexpected diagnostics {:?}", other),
        }
    }

    #[test]
    fn test_front_arm_is_the_more_bent_one() {
        let a = score(&Body::chest_arms(75.0, 110.0).set());
        let b = score(&Body::chest_arms(110.0, 75.0).set());
        assert_eq!(a.score, b.score);
        assert_eq!(a.feedback, b.feedback);

        // Mirrored fixtures only agree up to rounding
        match (a.diagnostics, b.diagnostics) {
            (
                Some(ScoreDiagnostics::ArmAngles { front: fa, back: ba }),
                Some(ScoreDiagnostics::ArmAngles { front: fb, back: bb }),
            ) => {
                assert!((fa - fb).abs() < 1e-6);
                assert!((ba - bb).abs() < 1e-6);
                assert!((fa - 75.0).abs() < 1e-6);
            }
            other => panic!("unexpected diagnostics {:?}", other),
        }
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        // Inner edges of both tables
        assert_eq!(score(&Body::chest_arms(50.0, 140.0).set()).score, 100);
        assert_eq!(score(&Body::chest_arms(100.0, 100.0).set()).score, 100);
        assert_eq!(score(&Body::chest_arms(70.0, 70.0).set()).score, 100);

        // Outer edges: 0.7 * 80 + 0.3 * 80
        let result = score(&Body::chest_arms(40.0, 160.0).set());
        assert_eq!(result.score, 80);
        assert_eq!(result.feedback, "Squeeze chest more");
        let result = score(&Body::chest_arms(120.0, 160.0).set());
        assert_eq!(result.score, 80);
        assert_eq!(result.feedback, "Adjust arm position");
    }

    #[test]
    fn test_weighted_combination() {
        // 0.7 * 100 + 0.3 * 60
        let result = score(&Body::chest_arms(80.0, 170.0).set());
        assert_eq!(result.score, 88);
        assert_eq!(result.feedback, "Nice side chest!");

        // 0.7 * 80 + 0.3 * 100
        let result = score(&Body::chest_arms(45.0, 100.0).set());
        assert_eq!(result.score, 86);
        assert_eq!(result.feedback, "Nice side chest!");
    }

    #[test]
    fn test_front_arm_too_straight_or_tight() {
        // 0.7 * 55 + 0.3 * 100 = 68.5
        let result = score(&Body::chest_arms(35.0, 100.0).set());
        assert_eq!(result.score, 69);
        assert_eq!(result.feedback, "Squeeze chest more");

        // 0.7 * 80 + 0.3 * 80
        let result = score(&Body::chest_arms(110.0, 150.0).set());
        assert_eq!(result.score, 80);
        assert_eq!(result.feedback, "Adjust arm position");
    }

    #[test]
    fn test_gate_rejects_raised_arms() {
        let result = score(&Body::raised_arms(75.0, 75.0).set());
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, "Bring arms in front of chest");
    }

    #[test]
    fn test_gate_needs_only_one_wrist() {
        let body = Body::chest_arms(75.0, 110.0).with(BodyLandmark::RightWrist, 0.55, 0.2);
        assert!(score(&body.set()).score > 0);
    }

    #[test]
    fn test_gate_is_strict() {
        // Left wrist exactly on the chest top line, right wrist above it
        let chest_top = 0.3 + CHEST_ZONE_MARGIN;
        let body = Body::chest_arms(75.0, 110.0)
            .with(BodyLandmark::LeftWrist, 0.45, chest_top)
            .with(BodyLandmark::RightWrist, 0.55, 0.2);
        assert_eq!(score(&body.set()).score, 0);
    }
}
