use std::sync::Arc;

use crate::eval::context::TransformCtx;
use crate::foundation::core::Point3;

/// A pure point-wise mapping evaluated against the shared per-frame context.
pub type Transformer = Arc<dyn Fn(Point3, &TransformCtx) -> Point3 + Send + Sync>;

/// One resolved stage of a compiled pipeline.
#[derive(Clone)]
pub(crate) struct Stage {
    pub(crate) name: String,
    pub(crate) f: Transformer,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// A named, fully resolved composition of transformers.
///
/// Stages were looked up when the pipeline was defined, so evaluation never performs name
/// resolution and cannot fail. Cloning shares the stage list.
#[derive(Clone, Debug)]
pub struct CompiledPipeline {
    name: Arc<str>,
    stages: Arc<[Stage]>,
}

impl CompiledPipeline {
    pub(crate) fn new(name: &str, stages: Vec<Stage>) -> Self {
        Self {
            name: Arc::from(name),
            stages: Arc::from(stages),
        }
    }

    /// Pipeline name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transformer names in evaluation order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name.as_str())
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// `true` for the identity pipeline.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage left to right over a private copy of `points`.
    ///
    /// Each stage observes the cumulative output of the previous stages. The output always has
    /// the same length as the input.
    pub fn evaluate(&self, points: &[Point3], ctx: &TransformCtx) -> Vec<Point3> {
        let mut out = points.to_vec();
        for stage in self.stages.iter() {
            for p in out.iter_mut() {
                *p = (stage.f)(*p, ctx);
            }
        }
        out
    }

    /// Evaluate a single point through every stage.
    pub fn evaluate_point(&self, p: Point3, ctx: &TransformCtx) -> Point3 {
        self.stages.iter().fold(p, |acc, stage| (stage.f)(acc, ctx))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/pipeline.rs"]
mod tests;
