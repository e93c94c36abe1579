use std::{fmt, time::{Duration, Instant}};

use log::{info, warn};

use crate::{
    boundary::{EngineBoundary, EngineHandle},
    clock::{Clock, SystemClock},
    config::FrameConfig,
    error::EngineFault,
    frame::{duration_ms, FrameContext, FrameReport},
    input::InputState,
    metrics::{FrameMetrics, FrameSample, Metric},
};

pub const RUNNING_PHRASE: &str = "Simulation running";
pub const PAUSED_PHRASE: &str = "Paused";

/// Leading part of the status line.
#[derive(Debug, Clone, Copy)]
pub enum StatusPhrase<'a> {
    Running,
    Faulted(&'a EngineFault),
    Paused,
}

impl fmt::Display for StatusPhrase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPhrase::Running => f.write_str(RUNNING_PHRASE),
            StatusPhrase::Faulted(fault) => write!(f, "Simulation error: {fault}"),
            StatusPhrase::Paused => f.write_str(PAUSED_PHRASE),
        }
    }
}

/// `"<phrase> – X.Xms sim – Y.Yms draw – Z.Zfps"`. Missing data prints as 0.0.
pub fn compose_status(phrase: StatusPhrase<'_>, metrics: &FrameMetrics) -> String {
    let sim = metrics.average(Metric::Simulation).unwrap_or(0.0);
    let draw = metrics.average(Metric::Draw).unwrap_or(0.0);
    let fps = metrics.fps().unwrap_or(0.0);
    format!("{phrase} – {sim:.1}ms sim – {draw:.1}ms draw – {fps:.1}fps")
}

/// Drives the engine once per host frame and keeps the rolling timings.
///
/// Created in the running state: construction is the loop registration, and
/// the first frame's elapsed time is measured from that instant.
pub struct FrameScheduler<E, C = SystemClock> {
    boundary: EngineBoundary<E>,
    clock: C,
    metrics: FrameMetrics,

    previous: Instant,
    frame_index: u64,
    paused: bool,
    faulted: bool,

    status_log_period: Option<Duration>,
    last_status_log: Instant,
}

impl<E: EngineHandle, C: Clock> FrameScheduler<E, C> {
    pub fn start(boundary: EngineBoundary<E>, clock: C, cfg: &FrameConfig) -> Self {
        let now = clock.now();
        let status_log_period = match cfg.status_log_period_ms {
            0 => None,
            ms => Some(Duration::from_millis(u64::from(ms))),
        };

        Self {
            boundary,
            clock,
            metrics: FrameMetrics::new(cfg.metrics_capacity),

            previous: now,
            frame_index: 0,
            paused: false,
            faulted: false,

            status_log_period,
            last_status_log: now,
        }
    }

    pub fn tick(&mut self, input: &InputState) -> FrameReport {
        let now = self.clock.now();
        let context = FrameContext::between(self.previous, now);
        self.previous = now;
        self.frame_index += 1;

        if self.paused {
            let status = compose_status(StatusPhrase::Paused, &self.metrics);
            return FrameReport {
                index: self.frame_index,
                context,
                paused: true,
                sim_ms: 0.0,
                draw_ms: 0.0,
                fault: None,
                status,
            };
        }

        let sim_start = self.clock.now();
        let sim = self.boundary.simulate(context.elapsed_ms, input);
        let draw_start = self.clock.now();
        let draw = self.boundary.draw();
        let draw_end = self.clock.now();

        let sim_ms = duration_ms(draw_start.saturating_duration_since(sim_start));
        let draw_ms = duration_ms(draw_end.saturating_duration_since(draw_start));

        self.metrics.record(FrameSample {
            sim_ms,
            draw_ms,
            frame_ms: context.elapsed_ms,
        });

        // simulate's error wins when both calls fail
        let fault = sim.err().or(draw.err());
        self.note_fault(fault.as_ref());

        let phrase = match &fault {
            Some(f) => StatusPhrase::Faulted(f),
            None => StatusPhrase::Running,
        };
        let status = compose_status(phrase, &self.metrics);
        self.maybe_log_status(now, &status);

        FrameReport {
            index: self.frame_index,
            context,
            paused: false,
            sim_ms,
            draw_ms,
            fault,
            status,
        }
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        info!("paused at frame {}", self.frame_index);
    }

    /// The next frame's elapsed time starts from here, not from the last
    /// frame before the pause.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.previous = self.clock.now();
        info!("resumed at frame {}", self.frame_index);
    }

    /// Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    #[inline]
    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    #[inline]
    pub fn boundary(&self) -> &EngineBoundary<E> {
        &self.boundary
    }

    fn note_fault(&mut self, fault: Option<&EngineFault>) {
        match (fault, self.faulted) {
            (Some(f), false) => {
                warn!("frame {}: engine reported: {f}", self.frame_index);
                self.faulted = true;
            }
            (None, true) => {
                info!("frame {}: engine recovered", self.frame_index);
                self.faulted = false;
            }
            _ => {}
        }
    }

    fn maybe_log_status(&mut self, now: Instant, status: &str) {
        let Some(period) = self.status_log_period else { return };
        if now.saturating_duration_since(self.last_status_log) >= period {
            self.last_status_log = now;
            info!("frame {}: {status}", self.frame_index);
        }
    }
}
