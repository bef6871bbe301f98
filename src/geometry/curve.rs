//! Catmull-Rom spline sampling.
//!
//! The engine only needs "N evenly spaced points along a smooth curve through these control
//! points"; [`CurveSampler`] is that seam and [`CatmullRomSampler`] the stock implementation.

use crate::foundation::core::{DVec3, Point3};
use crate::foundation::error::{HelixError, HelixResult};

/// Arc-length table resolution used for `*_at` lookups.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

const TANGENT_DELTA: f64 = 1e-4;

/// Turns a sparse control polygon into a dense, evenly spaced sequence.
pub trait CurveSampler {
    /// Return `divisions + 1` points spaced evenly by arc length along a smooth curve through
    /// `control_points`.
    fn sample(&self, control_points: &[Point3], divisions: usize) -> HelixResult<Vec<Point3>>;
}

/// Parameterisation of a Catmull-Rom segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatmullRomKind {
    /// Uniform parameterisation with a tension factor.
    Uniform {
        /// Tangent scale; `0.5` is the classic spline.
        tension: f64,
    },
    /// Alpha `0.5`; avoids cusps and self-intersections.
    #[default]
    Centripetal,
    /// Alpha `1.0`.
    Chordal,
}

/// Open Catmull-Rom curve through a fixed set of control points.
#[derive(Clone, Debug)]
pub struct CatmullRomCurve {
    points: Vec<Point3>,
    kind: CatmullRomKind,
    lengths: Vec<f64>,
}

impl CatmullRomCurve {
    /// Build a centripetal curve through `points`.
    pub fn new(points: Vec<Point3>) -> HelixResult<Self> {
        Self::with_kind(points, CatmullRomKind::Centripetal)
    }

    /// Build a curve with an explicit parameterisation.
    pub fn with_kind(points: Vec<Point3>, kind: CatmullRomKind) -> HelixResult<Self> {
        if points.is_empty() {
            return Err(HelixError::validation(
                "catmull-rom curve needs at least one control point",
            ));
        }
        let mut curve = Self {
            points,
            kind,
            lengths: Vec::new(),
        };
        curve.lengths = curve.arc_lengths(ARC_LENGTH_DIVISIONS);
        Ok(curve)
    }

    /// Control points the curve passes through.
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// Approximate total arc length.
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` in `[0, 1]` (not arc-length uniform).
    pub fn point(&self, t: f64) -> Point3 {
        let pts = &self.points;
        let l = pts.len();
        if l == 1 {
            return pts[0];
        }

        let t = t.clamp(0.0, 1.0);
        let p = (l - 1) as f64 * t;
        let mut int_point = p.floor() as usize;
        let mut weight = p - int_point as f64;
        if int_point >= l - 1 {
            int_point = l - 2;
            weight = 1.0;
        }

        let p1 = pts[int_point];
        let p2 = pts[int_point + 1];
        let p0 = if int_point > 0 {
            pts[int_point - 1]
        } else {
            pts[0] + (pts[0] - pts[1])
        };
        let p3 = if int_point + 2 < l {
            pts[int_point + 2]
        } else {
            pts[l - 1] + (pts[l - 1] - pts[l - 2])
        };

        let [cx, cy, cz] = match self.kind {
            CatmullRomKind::Uniform { tension } => [
                Cubic::catmull_rom(p0.x, p1.x, p2.x, p3.x, tension),
                Cubic::catmull_rom(p0.y, p1.y, p2.y, p3.y, tension),
                Cubic::catmull_rom(p0.z, p1.z, p2.z, p3.z, tension),
            ],
            CatmullRomKind::Centripetal | CatmullRomKind::Chordal => {
                let pow = if self.kind == CatmullRomKind::Chordal {
                    0.5
                } else {
                    0.25
                };
                let mut dt1 = p1.distance_squared(p2).powf(pow);
                let mut dt0 = p0.distance_squared(p1).powf(pow);
                let mut dt2 = p2.distance_squared(p3).powf(pow);
                if dt1 < 1e-4 {
                    dt1 = 1.0;
                }
                if dt0 < 1e-4 {
                    dt0 = dt1;
                }
                if dt2 < 1e-4 {
                    dt2 = dt1;
                }
                [
                    Cubic::nonuniform(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2),
                    Cubic::nonuniform(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2),
                    Cubic::nonuniform(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2),
                ]
            }
        };

        DVec3::new(cx.eval(weight), cy.eval(weight), cz.eval(weight))
    }

    /// Map arc-length fraction `u` in `[0, 1]` to curve parameter `t`.
    pub fn u_to_t(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        let lengths = &self.lengths;
        let n = lengths.len();
        let total = self.length();
        if n < 2 || total <= 0.0 {
            return u;
        }

        let target = u * total;
        let i = lengths.partition_point(|&len| len < target);
        if i == 0 {
            return 0.0;
        }
        if i >= n {
            return 1.0;
        }
        if lengths[i] == target {
            return i as f64 / (n - 1) as f64;
        }

        let before = lengths[i - 1];
        let segment = lengths[i] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        ((i - 1) as f64 + fraction) / (n - 1) as f64
    }

    /// Point at arc-length fraction `u`.
    pub fn point_at(&self, u: f64) -> Point3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at curve parameter `t`. Falls back to `-Y` on degenerate curves.
    pub fn tangent(&self, t: f64) -> DVec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1))
            .try_normalize()
            .unwrap_or(DVec3::NEG_Y)
    }

    /// Unit tangent at arc-length fraction `u`.
    pub fn tangent_at(&self, u: f64) -> DVec3 {
        self.tangent(self.u_to_t(u))
    }

    /// `divisions + 1` points evenly spaced by arc length, first and last on the end points.
    pub fn spaced_points(&self, divisions: usize) -> Vec<Point3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(d as f64 / divisions as f64))
            .collect()
    }

    fn arc_lengths(&self, divisions: usize) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut last = self.point(0.0);
        lengths.push(0.0);
        for p in 1..=divisions {
            let current = self.point(p as f64 / divisions as f64);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

/// Stock [`CurveSampler`] backed by [`CatmullRomCurve`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CatmullRomSampler {
    /// Segment parameterisation.
    pub kind: CatmullRomKind,
}

impl CurveSampler for CatmullRomSampler {
    fn sample(&self, control_points: &[Point3], divisions: usize) -> HelixResult<Vec<Point3>> {
        if divisions == 0 {
            return Err(HelixError::validation("curve divisions must be >= 1"));
        }
        let curve = CatmullRomCurve::with_kind(control_points.to_vec(), self.kind)?;
        Ok(curve.spaced_points(divisions))
    }
}

/// Cubic `c0 + c1 t + c2 t^2 + c3 t^3` in Hermite form.
#[derive(Clone, Copy, Debug)]
struct Cubic {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl Cubic {
    fn hermite(x0: f64, x1: f64, t0: f64, t1: f64) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn catmull_rom(x0: f64, x1: f64, x2: f64, x3: f64, tension: f64) -> Self {
        Self::hermite(x1, x2, tension * (x2 - x0), tension * (x3 - x1))
    }

    fn nonuniform(x0: f64, x1: f64, x2: f64, x3: f64, dt0: f64, dt1: f64, dt2: f64) -> Self {
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    fn eval(self, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/curve.rs"]
mod tests;
