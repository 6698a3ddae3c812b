// Lat Flex: elbows flared wide at ribcage height, scored on spread ratio

use super::to_score;
use crate::core::geometry::distance;
use crate::models::pose::{BodyLandmark, LandmarkSet, ScoreDiagnostics, ScoreResult};

/// Keeps the ratio finite when both shoulders land on the same point
const WIDTH_EPSILON: f64 = 1e-6;
const CHEST_TOP_MARGIN: f64 = 0.05;
const HIP_LINE_MARGIN: f64 = 0.02;

/// Wrist-to-wrist width over shoulder-to-shoulder width
fn spread_ratio(landmarks: &LandmarkSet) -> f64 {
    let shoulder_width = distance(
        landmarks.get(BodyLandmark::LeftShoulder),
        landmarks.get(BodyLandmark::RightShoulder),
    );
    let wrist_width = distance(
        landmarks.get(BodyLandmark::LeftWrist),
        landmarks.get(BodyLandmark::RightWrist),
    );
    wrist_width / (shoulder_width + WIDTH_EPSILON)
}

/// Both wrists strictly between the chest top and the hip line
fn wrists_at_ribcage(landmarks: &LandmarkSet) -> bool {
    let chest_top = landmarks
        .get(BodyLandmark::LeftShoulder)
        .y
        .min(landmarks.get(BodyLandmark::RightShoulder).y)
        + CHEST_TOP_MARGIN;
    let hip_line = landmarks
        .get(BodyLandmark::LeftHip)
        .y
        .max(landmarks.get(BodyLandmark::RightHip).y)
        - HIP_LINE_MARGIN;

    [BodyLandmark::LeftWrist, BodyLandmark::RightWrist]
        .into_iter()
        .map(|wrist| landmarks.get(wrist).y)
        .all(|y| chest_top < y && y < hip_line)
}

pub fn score(landmarks: &LandmarkSet) -> ScoreResult {
    if !wrists_at_ribcage(landmarks) {
        return ScoreResult::rejected("Keep elbows wide at ribcage level");
    }

    let ratio = spread_ratio(landmarks);

    let (raw, feedback) = if ratio >= 1.25 {
        (100.0, "Huge lat spread!")
    } else if ratio >= 1.15 {
        ((90.0 + (ratio - 1.15) * 100.0).round(), "Great lat spread")
    } else if ratio >= 1.05 {
        ((75.0 + (ratio - 1.05) * 150.0).round(), "Good, flare lats a bit more")
    } else {
        ((ratio * 60.0).round().max(50.0), "Spread elbows out and widen back")
    };

    ScoreResult::new(to_score(raw), feedback, ScoreDiagnostics::SpreadRatio { ratio })
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::Body;
    use super::*;

    #[test]
    fn test_huge_spread() {
        // Shoulders 0.2 apart, wrists 0.3 apart
        let result = score(&Body::lat_spread(0.3).set());
        assert_eq!(result.score, 100);
        assert_eq!(result.feedback, "Huge lat spread!");
        match result.diagnostics {
            Some(ScoreDiagnostics::SpreadRatio { ratio }) => assert!((ratio - 1.5).abs() < 1e-4),
            other => panic!("unexpected diagnostics {:?}", other),
        }
    }

    #[test]
    fn test_gate_overrides_ratio() {
        let body = Body::lat_spread(0.3).with(BodyLandmark::RightWrist, 0.65, 0.3);
        let result = score(&body.set());
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, "Keep elbows wide at ribcage level");
    }

    #[test]
    fn test_gate_requires_both_wrists_above_hip_line() {
        // Hip line sits at 0.7 - 0.02
        let body = Body::lat_spread(0.3).with(BodyLandmark::LeftWrist, 0.35, 0.69);
        assert_eq!(score(&body.set()).score, 0);
    }

    #[test]
    fn test_great_spread() {
        // ratio 1.2 -> 90 + 5
        let result = score(&Body::lat_spread(0.24).set());
        assert_eq!(result.score, 95);
        assert_eq!(result.feedback, "Great lat spread");
    }

    #[test]
    fn test_good_spread() {
        // ratio 1.1 -> 75 + 7.5, rounded
        let result = score(&Body::lat_spread(0.22).set());
        assert!((82..=83).contains(&result.score));
        assert_eq!(result.feedback, "Good, flare lats a bit more");
    }

    #[test]
    fn test_narrow_spread_floors_at_50() {
        let result = score(&Body::lat_spread(0.1).set());
        assert_eq!(result.score, 50);
        assert_eq!(result.feedback, "Spread elbows out and widen back");

        // ratio 0.95 -> 57
        let result = score(&Body::lat_spread(0.19).set());
        assert_eq!(result.score, 57);
    }

    #[test]
    fn test_coincident_shoulders_stay_finite() {
        let body = Body::lat_spread(0.3)
            .with(BodyLandmark::LeftShoulder, 0.5, 0.3)
            .with(BodyLandmark::RightShoulder, 0.5, 0.3);
        let result = score(&body.set());
        assert_eq!(result.score, 100);
        assert_eq!(result.feedback, "Huge lat spread!");
    }
}
