//! Double-helix strand geometry around a spine.
//!
//! Produces the two backbone point sequences a renderer turns into tubes, spheres, and rungs.
//! No mesh data is built here.

use crate::foundation::core::{DQuat, DVec3, Point3};
use crate::foundation::error::{HelixError, HelixResult};
use crate::geometry::curve::CatmullRomCurve;

/// Shape and motion of the helix around its spine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HelixParams {
    /// Distance of each strand from the spine.
    pub radius: f64,
    /// Number of rung intervals; each strand has `rungs + 1` points.
    pub rungs: usize,
    /// Rotation (radians) between consecutive rungs.
    pub twist_per_rung: f64,
    /// Rotation (radians) per unit of elapsed time.
    pub spin_rate: f64,
}

impl Default for HelixParams {
    fn default() -> Self {
        Self {
            radius: 5.0,
            rungs: 100,
            twist_per_rung: std::f64::consts::PI / 12.0,
            spin_rate: 1.0 / 1000.0,
        }
    }
}

impl HelixParams {
    /// Check the parameters are usable.
    pub fn validate(&self) -> HelixResult<()> {
        if self.rungs == 0 {
            return Err(HelixError::validation("helix.rungs must be >= 1"));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(HelixError::validation(
                "helix.radius must be finite and >= 0",
            ));
        }
        if !self.twist_per_rung.is_finite() || !self.spin_rate.is_finite() {
            return Err(HelixError::validation(
                "helix.twist_per_rung and helix.spin_rate must be finite",
            ));
        }
        Ok(())
    }
}

/// The two strands of one helix frame; `left[i]` and `right[i]` form rung `i`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct HelixStrands {
    /// First backbone.
    pub left: Vec<Point3>,
    /// Second backbone, opposite `left` across the spine.
    pub right: Vec<Point3>,
}

impl HelixStrands {
    /// Number of rung end-point pairs.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// `true` when no rungs were built.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Rung end points, in order along the spine.
    pub fn rungs(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.left.iter().copied().zip(self.right.iter().copied())
    }
}

/// Wraps two strands around a spine point sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct HelixBuilder {
    params: HelixParams,
}

impl HelixBuilder {
    /// Create a builder after validating `params`.
    pub fn new(params: HelixParams) -> HelixResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Builder parameters.
    pub fn params(&self) -> HelixParams {
        self.params
    }

    /// Build both strands for `spine` at `time_elapsed`.
    ///
    /// The spine is re-splined and sampled at `rungs + 1` arc-length-uniform positions. At rung
    /// `i` the strand offset `(0, 0, ±radius)` is rotated about the local tangent by
    /// `twist_per_rung * i + spin_rate * time_elapsed`.
    pub fn build(&self, spine: &[Point3], time_elapsed: f64) -> HelixResult<HelixStrands> {
        let curve = CatmullRomCurve::new(spine.to_vec())?;
        let HelixParams {
            radius,
            rungs,
            twist_per_rung,
            spin_rate,
        } = self.params;

        let offset = DVec3::new(0.0, 0.0, radius);
        let spin = spin_rate * time_elapsed;
        let mut strands = HelixStrands {
            left: Vec::with_capacity(rungs + 1),
            right: Vec::with_capacity(rungs + 1),
        };
        for i in 0..=rungs {
            let u = i as f64 / rungs as f64;
            let center = curve.point_at(u);
            let tangent = curve.tangent_at(u);
            let q = DQuat::from_axis_angle(tangent, twist_per_rung * i as f64 + spin);
            let arm = q * offset;
            strands.left.push(center + arm);
            strands.right.push(center - arm);
        }
        Ok(strands)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/helix.rs"]
mod tests;
