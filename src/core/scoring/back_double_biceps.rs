// Back Double Biceps: arms raised from behind, elbows more open than the front pose

use super::bands::{Band, BandTable};
use super::{elbow_angles, to_score, wrists_above_shoulders};
use crate::models::pose::{LandmarkSet, ScoreDiagnostics, ScoreResult};

const ARM_BANDS: BandTable = BandTable::new(
    &[
        Band::new(65.0, 110.0, 100),
        Band::new(55.0, 125.0, 85),
        Band::new(45.0, 140.0, 65),
    ],
    40,
);

const SYMMETRY_TOLERANCE: f64 = 30.0;
const SYMMETRY_WEIGHT: f64 = 0.5;
const IMBALANCE_FEEDBACK_DIFF: f64 = 35.0;
const OPEN_ELBOW: f64 = 125.0;
const TIGHT_ELBOW: f64 = 55.0;

pub fn score(landmarks: &LandmarkSet) -> ScoreResult {
    if !wrists_above_shoulders(landmarks) {
        return ScoreResult::rejected("Raise arms and flex back");
    }
    let Some((left, right)) = elbow_angles(landmarks) else {
        return ScoreResult::rejected("Raise arms and flex back");
    };

    let mean = (f64::from(ARM_BANDS.score(left)) + f64::from(ARM_BANDS.score(right))) / 2.0;
    let diff = (left - right).abs();
    let penalty = (diff - SYMMETRY_TOLERANCE).max(0.0) * SYMMETRY_WEIGHT;
    let raw = (mean - penalty).clamp(0.0, 100.0);

    let feedback = if raw >= 85.0 {
        "Strong back double biceps!"
    } else if diff > IMBALANCE_FEEDBACK_DIFF {
        "Balance both arms"
    } else if left > OPEN_ELBOW || right > OPEN_ELBOW {
        "Bend elbows slightly more"
    } else if left < TIGHT_ELBOW || right < TIGHT_ELBOW {
        "Flex arms and back harder"
    } else {
        "Tighten back and raise elbows"
    };

    ScoreResult::new(
        to_score(raw),
        feedback,
        ScoreDiagnostics::ElbowAngles { left, right },
    )
}
