// Vector math over landmarks

use crate::models::pose::Landmark;

/// Vectors shorter than this have no usable direction
pub const MIN_MAGNITUDE: f64 = 1e-6;

fn sub(a: Landmark, b: Landmark) -> [f64; 3] {
    [a.x - b.x, a.y - b.y, a.z - b.z]
}

fn magnitude(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Angle at vertex `b` between `b->a` and `b->c`, in degrees [0, 180].
///
/// Returns `None` when either arm of the angle is degenerate (two points
/// coincide), which callers treat as "pose not ready".
pub fn angle_between(a: Landmark, b: Landmark, c: Landmark) -> Option<f64> {
    let ba = sub(a, b);
    let bc = sub(c, b);

    let mag_ba = magnitude(ba);
    let mag_bc = magnitude(bc);
    if mag_ba < MIN_MAGNITUDE || mag_bc < MIN_MAGNITUDE {
        return None;
    }

    let dot = ba[0] * bc[0] + ba[1] * bc[1] + ba[2] * bc[2];
    // Rounding can push the cosine just outside acos' domain
    let cosine = (dot / (mag_ba * mag_bc)).clamp(-1.0, 1.0);

    Some(cosine.acos().to_degrees())
}

/// Euclidean distance in 3-D
pub fn distance(a: Landmark, b: Landmark) -> f64 {
    magnitude(sub(a, b))
}
