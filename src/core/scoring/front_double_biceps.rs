// Front Double Biceps: both arms raised, elbows flexed, arms matched

use super::bands::{Band, BandTable};
use super::{elbow_angles, to_score, wrists_above_shoulders};
use crate::models::pose::{LandmarkSet, ScoreDiagnostics, ScoreResult};

const ARM_BANDS: BandTable = BandTable::new(
    &[
        Band::new(50.0, 100.0, 100),
        Band::new(40.0, 115.0, 85),
        Band::new(30.0, 130.0, 65),
    ],
    40,
);

/// Angle difference tolerated before the symmetry penalty applies
const SYMMETRY_TOLERANCE: f64 = 20.0;
const SYMMETRY_WEIGHT: f64 = 0.7;
/// Angle difference above which the athlete is told to match arms
const MISMATCH_FEEDBACK_DIFF: f64 = 25.0;

pub fn score(landmarks: &LandmarkSet) -> ScoreResult {
    if !wrists_above_shoulders(landmarks) {
        return ScoreResult::rejected("Lift arms above shoulders");
    }
    let Some((left, right)) = elbow_angles(landmarks) else {
        return ScoreResult::rejected("Lift arms above shoulders");
    };

    let mean = (f64::from(ARM_BANDS.score(left)) + f64::from(ARM_BANDS.score(right))) / 2.0;
    let diff = (left - right).abs();
    let penalty = (diff - SYMMETRY_TOLERANCE).max(0.0) * SYMMETRY_WEIGHT;
    let raw = (mean - penalty).clamp(0.0, 100.0);

    // Feedback follows the unrounded score
    let feedback = if raw >= 85.0 {
        "Strong double biceps!"
    } else if diff > MISMATCH_FEEDBACK_DIFF {
        "Match arm angles"
    } else {
        "Flex biceps more"
    };

    ScoreResult::new(
        to_score(raw),
        feedback,
        ScoreDiagnostics::ElbowAngles { left, right },
    )
}
