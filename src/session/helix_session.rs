use std::str::FromStr;
use std::sync::Arc;

use crate::compile::registry::TransformRegistry;
use crate::encode::sink::{FrameSink, SinkConfig, SpineFrame};
use crate::eval::scheduler::{PipelineScheduler, SchedulerState};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HelixError, HelixResult};
use crate::geometry::curve::CatmullRomSampler;
use crate::geometry::helix::HelixBuilder;
use crate::geometry::noise::{Noise4, ValueNoise4};
use crate::scene::config::EngineConfig;
use crate::transform::builtin::{CameraHandle, register_builtins};

/// Options for driving a frame range.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOpts {
    /// Elapsed time passed to the first `update`.
    pub start_time: f64,
    /// Elapsed time added per frame.
    pub frame_dt: f64,
    /// Build helix strands for every frame.
    pub with_strands: bool,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            frame_dt: 1000.0 / 60.0,
            with_strands: false,
        }
    }
}

/// Request to switch pipelines right before a given frame is driven.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineSwitch {
    /// Frame at which the request is issued.
    pub at: FrameIndex,
    /// Target pipeline.
    pub pipeline: String,
}

impl FromStr for PipelineSwitch {
    type Err = HelixError;

    /// Parse `<frame>=<pipeline>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, pipeline) = s.split_once('=').ok_or_else(|| {
            HelixError::validation(format!("switch '{s}' must look like <frame>=<pipeline>"))
        })?;
        let at = at
            .trim()
            .parse::<u64>()
            .map_err(|e| HelixError::validation(format!("switch frame '{at}': {e}")))?;
        let pipeline = pipeline.trim();
        if pipeline.is_empty() {
            return Err(HelixError::validation(format!(
                "switch '{s}' names no pipeline"
            )));
        }
        Ok(Self {
            at: FrameIndex(at),
            pipeline: pipeline.to_owned(),
        })
    }
}

/// Range statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Swaps that ran to completion inside the range.
    pub transitions_completed: u64,
}

/// A fully assembled helix rig: scheduler, camera, and strand builder.
///
/// The session front-loads config validation, curve sampling, and pipeline resolution, then
/// drives frames one `update` at a time.
pub struct HelixSession {
    scheduler: PipelineScheduler,
    camera: CameraHandle,
    helix: HelixBuilder,
}

impl HelixSession {
    /// Build a rig using the stock seeded noise field.
    pub fn from_config(cfg: &EngineConfig) -> HelixResult<Self> {
        Self::with_noise(cfg, Arc::new(ValueNoise4::new(cfg.noise_seed)))
    }

    /// Build a rig with a caller-provided noise source.
    #[tracing::instrument(skip_all)]
    pub fn with_noise(cfg: &EngineConfig, noise: Arc<dyn Noise4>) -> HelixResult<Self> {
        cfg.validate()?;

        let camera = CameraHandle::new(cfg.camera_position());
        let mut registry = TransformRegistry::new();
        register_builtins(
            &mut registry,
            noise,
            cfg.noise,
            camera.clone(),
            cfg.camera_attraction,
        )?;
        for p in &cfg.pipelines {
            registry.define_pipeline(&p.name, p.transformers.as_slice(), p.default)?;
        }

        let sampler = CatmullRomSampler { kind: cfg.curve };
        let scheduler = PipelineScheduler::from_control_points(
            registry,
            &sampler,
            &cfg.control_points(),
            cfg.divisions,
            cfg.transition_steps,
        )?;
        let helix = HelixBuilder::new(cfg.helix)?;

        tracing::info!(
            spine_len = scheduler.base_points().len(),
            pipelines = cfg.pipelines.len(),
            active = scheduler.active_pipeline(),
            "helix session ready"
        );
        Ok(Self {
            scheduler,
            camera,
            helix,
        })
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &PipelineScheduler {
        &self.scheduler
    }

    /// Mutably borrow the scheduler, e.g. to register extra transformers.
    pub fn scheduler_mut(&mut self) -> &mut PipelineScheduler {
        &mut self.scheduler
    }

    /// Camera handle shared with the `camera_attraction` transformer.
    pub fn camera(&self) -> &CameraHandle {
        &self.camera
    }

    /// Strand builder.
    pub fn helix(&self) -> &HelixBuilder {
        &self.helix
    }

    /// Request a pipeline swap.
    pub fn set_pipeline(&mut self, name: &str) -> HelixResult<()> {
        self.scheduler.set_pipeline(name)
    }

    /// Drive one frame and package the result.
    pub fn step(
        &mut self,
        frame: FrameIndex,
        time_elapsed: f64,
        with_strands: bool,
    ) -> HelixResult<SpineFrame> {
        self.scheduler.update(time_elapsed)?;
        let points = self.scheduler.snapshot()?;
        let strands = if with_strands {
            Some(self.helix.build(&points, time_elapsed)?)
        } else {
            None
        };
        let active = self
            .scheduler
            .active_pipeline()
            .ok_or_else(|| HelixError::not_ready("no active pipeline"))?
            .to_owned();

        Ok(SpineFrame {
            frame,
            time: time_elapsed,
            state: self.scheduler.state(),
            active,
            pending: self.scheduler.pending_pipeline().map(str::to_owned),
            progress: self.scheduler.transition_progress(),
            points,
            strands,
        })
    }

    /// Drive `frames` frames into `sink`, issuing `switches` right before their frame.
    pub fn run(
        &mut self,
        frames: u64,
        opts: &SessionOpts,
        switches: &[PipelineSwitch],
        sink: &mut dyn FrameSink,
    ) -> HelixResult<SessionStats> {
        if frames == 0 {
            return Err(HelixError::validation("run needs at least one frame"));
        }
        if !(opts.start_time.is_finite() && opts.frame_dt.is_finite()) {
            return Err(HelixError::validation(
                "start_time and frame_dt must be finite",
            ));
        }

        sink.begin(SinkConfig {
            spine_len: self.scheduler.base_points().len(),
            with_strands: opts.with_strands,
        })?;

        let mut stats = SessionStats::default();
        for i in 0..frames {
            let idx = FrameIndex(i);
            for s in switches.iter().filter(|s| s.at == idx) {
                self.scheduler.set_pipeline(&s.pipeline)?;
            }

            let was_transitioning = self.scheduler.state() == SchedulerState::Transitioning;
            let time = opts.start_time + opts.frame_dt * i as f64;
            let frame = self.step(idx, time, opts.with_strands)?;
            if was_transitioning && frame.state == SchedulerState::Steady {
                stats.transitions_completed += 1;
            }

            sink.push_frame(&frame)?;
            stats.frames_total += 1;
        }

        sink.end()?;
        tracing::debug!(
            frames = stats.frames_total,
            transitions = stats.transitions_completed,
            "range driven"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/helix_session.rs"]
mod tests;
