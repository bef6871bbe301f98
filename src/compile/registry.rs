use std::collections::BTreeMap;
use std::sync::Arc;

use crate::compile::pipeline::{CompiledPipeline, Stage, Transformer};
use crate::eval::context::TransformCtx;
use crate::foundation::core::Point3;
use crate::foundation::error::{HelixError, HelixResult};

/// Name-indexed storage of transformers and the pipelines composed from them.
///
/// Pipelines are resolved against the registry when they are defined. Re-registering a
/// transformer afterwards only affects pipelines defined later.
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transformers: BTreeMap<String, Transformer>,
    pipelines: BTreeMap<String, CompiledPipeline>,
    default_pipeline: Option<String>,
}

impl std::fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("transformers", &self.transformers.keys().collect::<Vec<_>>())
            .field("pipelines", &self.pipelines)
            .field("default_pipeline", &self.default_pipeline)
            .finish()
    }
}

impl TransformRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `f` under `name`, silently replacing any previous transformer of that name.
    pub fn register_transformer<F>(&mut self, name: &str, f: F) -> HelixResult<()>
    where
        F: Fn(Point3, &TransformCtx) -> Point3 + Send + Sync + 'static,
    {
        self.register_shared(name, Arc::new(f))
    }

    /// Same as [`register_transformer`](Self::register_transformer) for an already shared function.
    pub fn register_shared(&mut self, name: &str, f: Transformer) -> HelixResult<()> {
        let name = checked_name(name, "transformer")?;
        if self.transformers.insert(name.to_owned(), f).is_some() {
            tracing::debug!(transformer = name, "transformer replaced");
        }
        Ok(())
    }

    /// `true` when a transformer named `name` is registered.
    pub fn has_transformer(&self, name: &str) -> bool {
        self.transformers.contains_key(name)
    }

    /// Registered transformer names, sorted.
    pub fn transformer_names(&self) -> impl Iterator<Item = &str> {
        self.transformers.keys().map(String::as_str)
    }

    /// Resolve `transformer_names` now and store the composed pipeline under `name`.
    ///
    /// Fails with [`HelixError::Configuration`] if any name is unknown; in that case nothing is
    /// stored and a previous pipeline of the same name stays in place. When `is_default` is set
    /// this pipeline becomes the default one, replacing any earlier default.
    pub fn define_pipeline<S: AsRef<str>>(
        &mut self,
        name: &str,
        transformer_names: &[S],
        is_default: bool,
    ) -> HelixResult<CompiledPipeline> {
        let name = checked_name(name, "pipeline")?;

        let stages = transformer_names
            .iter()
            .map(|t| {
                let t = t.as_ref();
                self.transformers
                    .get(t)
                    .map(|f| Stage {
                        name: t.to_owned(),
                        f: Arc::clone(f),
                    })
                    .ok_or_else(|| {
                        HelixError::configuration(format!(
                            "pipeline '{name}' references unknown transformer '{t}'"
                        ))
                    })
            })
            .collect::<HelixResult<Vec<_>>>()?;

        let compiled = CompiledPipeline::new(name, stages);
        self.pipelines.insert(name.to_owned(), compiled.clone());
        if is_default {
            self.default_pipeline = Some(name.to_owned());
        }
        tracing::debug!(
            pipeline = name,
            stages = compiled.len(),
            is_default,
            "pipeline defined"
        );
        Ok(compiled)
    }

    /// Return the compiled pipeline stored under `name`.
    pub fn compile(&self, name: &str) -> HelixResult<CompiledPipeline> {
        self.pipelines
            .get(name)
            .cloned()
            .ok_or_else(|| HelixError::not_found(format!("pipeline '{name}' is not defined")))
    }

    /// Defined pipeline names, sorted.
    pub fn pipeline_names(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }

    /// Name of the pipeline marked default, if any.
    pub fn default_pipeline(&self) -> Option<&str> {
        self.default_pipeline.as_deref()
    }
}

fn checked_name<'a>(name: &'a str, what: &str) -> HelixResult<&'a str> {
    if name.trim().is_empty() {
        return Err(HelixError::configuration(format!(
            "{what} name must be non-empty"
        )));
    }
    Ok(name)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/registry.rs"]
mod tests;
