use std::io::Write;

use anyhow::Context as _;

use crate::eval::scheduler::SchedulerState;
use crate::foundation::core::{FrameIndex, Point3};
use crate::foundation::error::{HelixError, HelixResult};
use crate::geometry::helix::HelixStrands;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Number of spine points in every frame.
    pub spine_len: usize,
    /// Whether frames carry helix strands.
    pub with_strands: bool,
}

/// Everything a renderer needs for one driven frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SpineFrame {
    /// Frame index within the driven range.
    pub frame: FrameIndex,
    /// Elapsed time passed to `update`.
    pub time: f64,
    /// Scheduler state after the update.
    pub state: SchedulerState,
    /// Pipeline that produced `points`.
    pub active: String,
    /// Pipeline waiting to take over, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<String>,
    /// Transition progress after the update.
    pub progress: f64,
    /// Transformed spine.
    pub points: Vec<Point3>,
    /// Helix strands built around `points`, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strands: Option<HelixStrands>,
}

/// Consumer of driven frames, in increasing frame order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> HelixResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, frame: &SpineFrame) -> HelixResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> HelixResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<SpineFrame>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames.
    pub fn frames(&self) -> &[SpineFrame] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> HelixResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &SpineFrame) -> HelixResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> HelixResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes one JSON object per frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.written
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> HelixResult<()> {
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &SpineFrame) -> HelixResult<()> {
        serde_json::to_writer(&mut self.out, frame).map_err(|e| HelixError::serde(e.to_string()))?;
        self.out
            .write_all(b"\n")
            .with_context(|| format!("write frame {}", frame.frame.0))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> HelixResult<()> {
        self.out.flush().context("flush frame output")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
