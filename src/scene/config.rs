use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::eval::scheduler::DEFAULT_TRANSITION_STEPS;
use crate::foundation::core::{DVec3, Point3, is_finite_point};
use crate::foundation::error::{HelixError, HelixResult};
use crate::geometry::curve::CatmullRomKind;
use crate::geometry::helix::HelixParams;
use crate::transform::builtin::{CameraAttraction, NoiseDisplace};

/// One named pipeline in an [`EngineConfig`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineDef {
    /// Pipeline name.
    pub name: String,
    /// Transformer names, applied left to right.
    #[serde(default)]
    pub transformers: Vec<String>,
    /// Activate this pipeline at start-up.
    #[serde(default)]
    pub default: bool,
}

/// JSON-facing description of a complete helix rig.
///
/// Every field except `pipelines` falls back to the stock scene when omitted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Arc-length divisions of the spine; the spine has `divisions + 1` points.
    pub divisions: usize,
    /// Sparse control polygon of the spine.
    pub control_points: Vec<[f64; 3]>,
    /// Spline parameterisation used for the spine.
    pub curve: CatmullRomKind,
    /// `update` calls per pipeline swap.
    pub transition_steps: u32,
    /// Seed of the stock noise field.
    pub noise_seed: u64,
    /// Initial camera position.
    pub camera: [f64; 3],
    /// Parameters of the `noise` transformer.
    pub noise: NoiseDisplace,
    /// Parameters of the `camera_attraction` transformer.
    pub camera_attraction: CameraAttraction,
    /// Pipelines, defined in order.
    pub pipelines: Vec<PipelineDef>,
    /// Strand geometry.
    pub helix: HelixParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            divisions: 100,
            control_points: vec![[0.0, 0.0, 0.0], [0.0, -150.0, 0.0]],
            curve: CatmullRomKind::Centripetal,
            transition_steps: DEFAULT_TRANSITION_STEPS,
            noise_seed: 0,
            camera: [50.0, -50.0, 50.0],
            noise: NoiseDisplace::default(),
            camera_attraction: CameraAttraction::default(),
            pipelines: Vec::new(),
            helix: HelixParams::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HelixResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HelixError::validation(format!("parse engine config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HelixResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HelixError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> HelixResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| HelixError::serde(e.to_string()))
    }

    /// Check structural constraints that do not need a registry.
    ///
    /// Unknown transformer names are reported later, when pipelines are defined.
    pub fn validate(&self) -> HelixResult<()> {
        if self.divisions == 0 {
            return Err(HelixError::validation("divisions must be >= 1"));
        }
        if self.control_points.is_empty() {
            return Err(HelixError::validation(
                "control_points must contain at least one point",
            ));
        }
        if self.control_points().into_iter().any(|p| !is_finite_point(p)) {
            return Err(HelixError::validation("control_points must be finite"));
        }
        if !is_finite_point(self.camera_position()) {
            return Err(HelixError::validation("camera must be finite"));
        }
        if self.transition_steps == 0 {
            return Err(HelixError::validation("transition_steps must be >= 1"));
        }
        if let CatmullRomKind::Uniform { tension } = self.curve {
            if !tension.is_finite() {
                return Err(HelixError::validation("curve tension must be finite"));
            }
        }
        self.noise.validate()?;
        self.camera_attraction.validate()?;
        self.helix.validate()?;

        let defaults = self.pipelines.iter().filter(|p| p.default).count();
        if defaults > 1 {
            return Err(HelixError::validation(format!(
                "at most one pipeline may be marked default, found {defaults}"
            )));
        }
        Ok(())
    }

    /// Control points as vectors.
    pub fn control_points(&self) -> Vec<Point3> {
        self.control_points
            .iter()
            .map(|&p| DVec3::from_array(p))
            .collect()
    }

    /// Initial camera position as a vector.
    pub fn camera_position(&self) -> Point3 {
        DVec3::from_array(self.camera)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
