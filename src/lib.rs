//! helixflow animates the spine of a procedurally generated double helix.
//!
//! The core is a small point-transform pipeline engine:
//!
//! 1. **Register**: named pure transformers `(Point3, &TransformCtx) -> Point3`
//!    ([`TransformRegistry`]).
//! 2. **Compile**: ordered lists of transformer names are resolved once into a
//!    [`CompiledPipeline`]; unknown names fail at definition time.
//! 3. **Schedule**: a [`PipelineScheduler`] re-evaluates the active pipeline over fixed,
//!    curve-sampled base points once per frame and swaps pipelines over a bounded number of
//!    frames instead of popping.
//!
//! Around the core the crate ships the pieces needed to drive a complete scene headlessly: a
//! Catmull-Rom [`CurveSampler`], a seeded [`Noise4`] field, the stock spine transformers, a
//! [`HelixBuilder`] for strand geometry, a JSON [`EngineConfig`], and a [`HelixSession`] that
//! streams frames into a [`FrameSink`]. Meshes, shading, and drawing belong to the renderer on the
//! other side of the sink.
//!
//! The engine is single-threaded and frame-driven: nothing blocks, and an undriven session simply
//! keeps its last point set.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod encode;
mod eval;
mod foundation;
mod geometry;
mod scene;
mod session;
mod transform;

pub use compile::pipeline::{CompiledPipeline, Transformer};
pub use compile::registry::TransformRegistry;
pub use encode::sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig, SpineFrame};
pub use eval::context::TransformCtx;
pub use eval::scheduler::{DEFAULT_TRANSITION_STEPS, PipelineScheduler, SchedulerState};
pub use foundation::core::{DQuat, DVec3, FrameIndex, Point3, distance_xy};
pub use foundation::error::{HelixError, HelixResult};
pub use geometry::curve::{
    ARC_LENGTH_DIVISIONS, CatmullRomCurve, CatmullRomKind, CatmullRomSampler, CurveSampler,
};
pub use geometry::helix::{HelixBuilder, HelixParams, HelixStrands};
pub use geometry::noise::{Noise4, ValueNoise4};
pub use scene::config::{EngineConfig, PipelineDef};
pub use session::helix_session::{HelixSession, PipelineSwitch, SessionOpts, SessionStats};
pub use transform::builtin::{
    CAMERA_ATTRACTION, CameraAttraction, CameraHandle, NOISE, NoiseDisplace, register_builtins,
};
