use std::time::{Duration, Instant};

use crate::error::EngineFault;

/// Timestamps for one frame. Built at loop entry and dropped with the frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub previous: Instant,
    pub current: Instant,
    pub elapsed_ms: f64,
}

impl FrameContext {
    #[inline]
    pub fn between(previous: Instant, current: Instant) -> Self {
        Self {
            previous,
            current,
            elapsed_ms: duration_ms(current.saturating_duration_since(previous)),
        }
    }
}

/// Whole milliseconds come out exact.
#[inline]
pub fn duration_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

/// What one scheduler tick did.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// 1-based; counts paused frames too.
    pub index: u64,
    pub context: FrameContext,
    pub paused: bool,
    pub sim_ms: f64,
    pub draw_ms: f64,
    pub fault: Option<EngineFault>,
    pub status: String,
}
