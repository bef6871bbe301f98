use crate::compile::pipeline::CompiledPipeline;
use crate::compile::registry::TransformRegistry;
use crate::eval::context::TransformCtx;
use crate::foundation::core::Point3;
use crate::foundation::error::{HelixError, HelixResult};
use crate::geometry::curve::CurveSampler;

/// Number of `update` calls a pipeline swap takes by default (a step of `0.01` per call).
pub const DEFAULT_TRANSITION_STEPS: u32 = 100;

/// Which pipeline produces output each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    /// No pipeline has been activated yet.
    Uninitialized,
    /// One active pipeline, nothing pending.
    Steady,
    /// An active pipeline is being retired in favour of a pending one.
    Transitioning,
}

/// Call-count driven countdown behind `transition_progress`.
///
/// Progress is `remaining / steps`, so a swap completes after exactly `steps` ticks regardless of
/// how much wall-clock time passes between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TransitionClock {
    steps: u32,
    remaining: u32,
}

impl TransitionClock {
    pub(crate) fn new(steps: u32) -> HelixResult<Self> {
        if steps == 0 {
            return Err(HelixError::validation("transition steps must be >= 1"));
        }
        Ok(Self {
            steps,
            remaining: steps,
        })
    }

    pub(crate) fn steps(self) -> u32 {
        self.steps
    }

    pub(crate) fn progress(self) -> f64 {
        f64::from(self.remaining) / f64::from(self.steps)
    }

    /// Advance one step. Returns `true` when the countdown ran out; the clock is then full again.
    pub(crate) fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.steps;
            return true;
        }
        false
    }
}

/// Runtime owner of the active and pending pipelines and the shared per-frame context.
///
/// The host calls [`update`](Self::update) once per displayed frame and reads the result through
/// [`points`](Self::points). Swaps requested with [`set_pipeline`](Self::set_pipeline) take
/// effect after a fixed number of `update` calls. Retargeting an in-flight swap keeps the progress
/// already made.
#[derive(Debug)]
pub struct PipelineScheduler {
    registry: TransformRegistry,
    base_points: Vec<Point3>,
    current_points: Vec<Point3>,
    active: Option<CompiledPipeline>,
    pending: Option<CompiledPipeline>,
    ctx: TransformCtx,
    clock: TransitionClock,
    frames_evaluated: u64,
}

impl PipelineScheduler {
    /// Build a scheduler over fixed `base_points` with the default transition length.
    ///
    /// If the registry has a default pipeline it becomes active immediately.
    pub fn new(registry: TransformRegistry, base_points: Vec<Point3>) -> Self {
        let clock = TransitionClock {
            steps: DEFAULT_TRANSITION_STEPS,
            remaining: DEFAULT_TRANSITION_STEPS,
        };
        Self::with_clock(registry, base_points, clock)
    }

    /// Build a scheduler whose swaps complete after `steps` calls to `update`.
    pub fn with_transition_steps(
        registry: TransformRegistry,
        base_points: Vec<Point3>,
        steps: u32,
    ) -> HelixResult<Self> {
        Ok(Self::with_clock(
            registry,
            base_points,
            TransitionClock::new(steps)?,
        ))
    }

    /// Sample `control_points` once through `sampler` and use the result as base points.
    pub fn from_control_points(
        registry: TransformRegistry,
        sampler: &dyn CurveSampler,
        control_points: &[Point3],
        divisions: usize,
        steps: u32,
    ) -> HelixResult<Self> {
        let base_points = sampler.sample(control_points, divisions)?;
        Self::with_transition_steps(registry, base_points, steps)
    }

    fn with_clock(
        registry: TransformRegistry,
        base_points: Vec<Point3>,
        clock: TransitionClock,
    ) -> Self {
        let active = registry
            .default_pipeline()
            .and_then(|name| registry.compile(name).ok());
        if let Some(p) = &active {
            tracing::debug!(pipeline = p.name(), "default pipeline active");
        }
        Self {
            registry,
            base_points,
            current_points: Vec::new(),
            active,
            pending: None,
            ctx: TransformCtx::initial(),
            clock,
            frames_evaluated: 0,
        }
    }

    /// Borrow the underlying registry.
    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    /// Register a transformer on the underlying registry.
    pub fn register_transformer<F>(&mut self, name: &str, f: F) -> HelixResult<()>
    where
        F: Fn(Point3, &TransformCtx) -> Point3 + Send + Sync + 'static,
    {
        self.registry.register_transformer(name, f)
    }

    /// Define a pipeline on the underlying registry.
    ///
    /// A pipeline defined with `is_default` replaces the active pipeline at once, without a
    /// transition. A swap already in flight is left pending.
    pub fn define_pipeline<S: AsRef<str>>(
        &mut self,
        name: &str,
        transformer_names: &[S],
        is_default: bool,
    ) -> HelixResult<()> {
        let compiled = self
            .registry
            .define_pipeline(name, transformer_names, is_default)?;
        if is_default {
            tracing::debug!(pipeline = compiled.name(), "default pipeline activated");
            self.active = Some(compiled);
        }
        Ok(())
    }

    /// Request `name` as the next pipeline.
    ///
    /// Before any pipeline is active the request takes effect immediately. Otherwise it becomes
    /// the pending target, replacing any earlier pending target without resetting progress.
    pub fn set_pipeline(&mut self, name: &str) -> HelixResult<()> {
        let next = self.registry.compile(name)?;
        if self.active.is_none() {
            tracing::debug!(pipeline = name, "pipeline activated");
            self.active = Some(next);
            return Ok(());
        }

        match self.pending.replace(next) {
            Some(prev) => tracing::debug!(
                from = prev.name(),
                to = name,
                progress = self.clock.progress(),
                "pending pipeline retargeted"
            ),
            None => tracing::debug!(to = name, "pipeline transition started"),
        }
        Ok(())
    }

    /// Advance shared state to `time_elapsed` and re-evaluate the active pipeline.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, time_elapsed: f64) -> HelixResult<()> {
        let Some(active) = self.active.as_mut() else {
            return Err(HelixError::not_ready(
                "update called before any pipeline was activated",
            ));
        };

        self.ctx.time_elapsed = time_elapsed;

        if self.pending.is_some()
            && self.clock.tick()
            && let Some(next) = self.pending.take()
        {
            tracing::debug!(pipeline = next.name(), "pipeline transition complete");
            *active = next;
        }
        self.ctx.transition_progress = self.clock.progress();

        self.current_points = active.evaluate(&self.base_points, &self.ctx);
        self.frames_evaluated += 1;
        Ok(())
    }

    /// Points produced by the most recent `update`; empty before the first one.
    pub fn points(&self) -> HelixResult<&[Point3]> {
        self.ensure_ready()?;
        Ok(&self.current_points)
    }

    /// Owned copy of [`points`](Self::points) for consumers that keep their own buffers.
    pub fn snapshot(&self) -> HelixResult<Vec<Point3>> {
        self.points().map(<[Point3]>::to_vec)
    }

    /// Current state of the swap state machine.
    pub fn state(&self) -> SchedulerState {
        match (&self.active, &self.pending) {
            (None, _) => SchedulerState::Uninitialized,
            (Some(_), None) => SchedulerState::Steady,
            (Some(_), Some(_)) => SchedulerState::Transitioning,
        }
    }

    /// Name of the pipeline currently producing output.
    pub fn active_pipeline(&self) -> Option<&str> {
        self.active.as_ref().map(CompiledPipeline::name)
    }

    /// Name of the pipeline waiting to take over.
    pub fn pending_pipeline(&self) -> Option<&str> {
        self.pending.as_ref().map(CompiledPipeline::name)
    }

    /// Transition progress in `[0, 1]`; `1` when steady.
    pub fn transition_progress(&self) -> f64 {
        self.clock.progress()
    }

    /// Number of `update` calls a full swap takes.
    pub fn transition_steps(&self) -> u32 {
        self.clock.steps()
    }

    /// Shared context as seen by transformers during the last evaluation.
    pub fn ctx(&self) -> TransformCtx {
        self.ctx
    }

    /// Curve-sampled input sequence every evaluation starts from.
    pub fn base_points(&self) -> &[Point3] {
        &self.base_points
    }

    /// Number of successful `update` calls.
    pub fn frames_evaluated(&self) -> u64 {
        self.frames_evaluated
    }

    fn ensure_ready(&self) -> HelixResult<()> {
        if self.active.is_none() {
            return Err(HelixError::not_ready(
                "no pipeline has been activated yet",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/scheduler.rs"]
mod tests;
