//! Scalar sampling and distance helpers shared by every entity.

/// Returns a value in `[min, max)`.
///
/// `min == max` yields exactly `min`, which is how tests pin a sampled
/// attribute to a known value.
pub fn random(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

/// Euclidean distance between two points.
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}
