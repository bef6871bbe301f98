pub use glam::{DQuat, DVec3};

/// A point in the animated scene.
pub type Point3 = DVec3;

/// Zero-based index of a driven animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct FrameIndex(pub u64);

/// Distance between two points projected onto the XY plane.
pub fn distance_xy(a: Point3, b: Point3) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Component-wise finiteness check.
pub fn is_finite_point(p: Point3) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
