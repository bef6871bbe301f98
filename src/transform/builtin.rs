//! Stock transformers for the helix spine.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::compile::registry::TransformRegistry;
use crate::eval::context::TransformCtx;
use crate::foundation::core::{DVec3, Point3, distance_xy};
use crate::foundation::error::{HelixError, HelixResult};
use crate::geometry::noise::Noise4;

/// Registry name of [`NoiseDisplace`].
pub const NOISE: &str = "noise";
/// Registry name of [`CameraAttraction`].
pub const CAMERA_ATTRACTION: &str = "camera_attraction";

/// Shared, lock-free camera position the host moves between frames.
///
/// Transformers capture a clone; the host keeps another and calls [`set`](Self::set).
#[derive(Clone, Debug)]
pub struct CameraHandle {
    xyz: Arc<[AtomicU64; 3]>,
}

impl CameraHandle {
    /// Create a handle at `position`.
    pub fn new(position: Point3) -> Self {
        Self {
            xyz: Arc::new([
                AtomicU64::new(position.x.to_bits()),
                AtomicU64::new(position.y.to_bits()),
                AtomicU64::new(position.z.to_bits()),
            ]),
        }
    }

    /// Current position.
    pub fn get(&self) -> Point3 {
        let [x, y, z] = &*self.xyz;
        DVec3::new(
            f64::from_bits(x.load(Ordering::Relaxed)),
            f64::from_bits(y.load(Ordering::Relaxed)),
            f64::from_bits(z.load(Ordering::Relaxed)),
        )
    }

    /// Move the camera.
    pub fn set(&self, position: Point3) {
        let [x, y, z] = &*self.xyz;
        x.store(position.x.to_bits(), Ordering::Relaxed);
        y.store(position.y.to_bits(), Ordering::Relaxed);
        z.store(position.z.to_bits(), Ordering::Relaxed);
    }
}

impl Default for CameraHandle {
    fn default() -> Self {
        Self::new(DVec3::ZERO)
    }
}

/// Displaces each point along one axis by a 4D noise field sampled at `(p / scale, t)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoiseDisplace {
    /// Peak displacement.
    pub amplitude: f64,
    /// Spatial period of the field; positions are divided by this before sampling.
    pub spatial_scale: f64,
    /// Multiplier applied to `time_elapsed` to form the fourth noise coordinate.
    pub time_scale: f64,
    /// Displacement direction (not normalised).
    pub axis: [f64; 3],
}

impl Default for NoiseDisplace {
    fn default() -> Self {
        Self {
            amplitude: 15.0,
            spatial_scale: 100.0,
            time_scale: 1.0 / 10_000.0,
            axis: [1.0, 0.0, 0.0],
        }
    }
}

impl NoiseDisplace {
    /// Check the parameters are usable.
    pub fn validate(&self) -> HelixResult<()> {
        if !(self.spatial_scale.is_finite() && self.spatial_scale > 0.0) {
            return Err(HelixError::validation(
                "noise.spatial_scale must be finite and > 0",
            ));
        }
        if !self.amplitude.is_finite()
            || !self.time_scale.is_finite()
            || self.axis.iter().any(|v| !v.is_finite())
        {
            return Err(HelixError::validation(
                "noise parameters must be finite",
            ));
        }
        Ok(())
    }

    /// Displace one point.
    pub fn apply(&self, noise: &dyn Noise4, p: Point3, ctx: &TransformCtx) -> Point3 {
        let s = self.spatial_scale;
        let n = noise.noise4(p.x / s, p.y / s, p.z / s, ctx.time_elapsed * self.time_scale);
        p + DVec3::from_array(self.axis) * (self.amplitude * n)
    }
}

/// Pulls points sideways (along +x) as the camera approaches them in the XY plane.
///
/// The offset is `strength * ((reach - d) / falloff)^3` where `d` is the XY distance to the
/// camera, so points farther than `reach` are pushed the other way.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraAttraction {
    /// Displacement scale.
    pub strength: f64,
    /// Distance at which the offset crosses zero.
    pub reach: f64,
    /// Distance over which the cubic ramps by one unit.
    pub falloff: f64,
}

impl Default for CameraAttraction {
    fn default() -> Self {
        Self {
            strength: 30.0,
            reach: 100.0,
            falloff: 50.0,
        }
    }
}

impl CameraAttraction {
    /// Check the parameters are usable.
    pub fn validate(&self) -> HelixResult<()> {
        if !(self.falloff.is_finite() && self.falloff > 0.0) {
            return Err(HelixError::validation(
                "camera_attraction.falloff must be finite and > 0",
            ));
        }
        if !self.strength.is_finite() || !self.reach.is_finite() {
            return Err(HelixError::validation(
                "camera_attraction parameters must be finite",
            ));
        }
        Ok(())
    }

    /// Offset one point given the camera position.
    pub fn apply(&self, camera: Point3, p: Point3) -> Point3 {
        let dist = distance_xy(p, camera);
        let offset = ((self.reach - dist) / self.falloff).powi(3);
        DVec3::new(p.x + self.strength * offset, p.y, p.z)
    }
}

/// Register [`NOISE`] and [`CAMERA_ATTRACTION`] on `registry`.
pub fn register_builtins(
    registry: &mut TransformRegistry,
    noise: Arc<dyn Noise4>,
    noise_params: NoiseDisplace,
    camera: CameraHandle,
    attraction: CameraAttraction,
) -> HelixResult<()> {
    noise_params.validate()?;
    attraction.validate()?;

    registry.register_transformer(NOISE, move |p, ctx| {
        noise_params.apply(noise.as_ref(), p, ctx)
    })?;
    registry.register_transformer(CAMERA_ATTRACTION, move |p, _| {
        attraction.apply(camera.get(), p)
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/builtin.rs"]
mod tests;
