/// Per-frame state shared by every transformer during one pipeline evaluation.
///
/// The scheduler is the only writer; transformers receive it by shared reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformCtx {
    /// Monotonic animation clock. Units are owned by the host.
    pub time_elapsed: f64,
    /// Transition progress in `[0, 1]`; `1` means fully on the active pipeline.
    pub transition_progress: f64,
}

impl TransformCtx {
    /// Context at time zero with no transition in flight.
    pub const fn initial() -> Self {
        Self {
            time_elapsed: 0.0,
            transition_progress: 1.0,
        }
    }

    /// Context at `time_elapsed` with no transition in flight.
    pub const fn at(time_elapsed: f64) -> Self {
        Self {
            time_elapsed,
            transition_progress: 1.0,
        }
    }
}

impl Default for TransformCtx {
    fn default() -> Self {
        Self::initial()
    }
}
