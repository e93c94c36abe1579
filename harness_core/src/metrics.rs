//! Rolling frame timings.
//!
//! The three series (simulation, draw, whole frame) live in one record with a
//! single write cursor, so slot `i` of every series always belongs to the same
//! frame. Until the buffer fills, samples are appended; afterwards each frame
//! overwrites the oldest slot and the cursor moves on once.

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Simulation,
    Draw,
    Frame,
}

/// One frame's timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub sim_ms: f64,
    pub draw_ms: f64,
    pub frame_ms: f64,
}

#[derive(Debug, Clone)]
pub struct FrameMetrics {
    capacity: usize,
    sim_ms: Vec<f64>,
    draw_ms: Vec<f64>,
    frame_ms: Vec<f64>,
    cursor: usize,
}

impl FrameMetrics {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            sim_ms: Vec::with_capacity(capacity),
            draw_ms: Vec::with_capacity(capacity),
            frame_ms: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frame_ms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame_ms.is_empty()
    }

    /// Slot the next overwrite lands in once the buffer is full.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn record(&mut self, sample: FrameSample) {
        if self.frame_ms.len() < self.capacity {
            self.sim_ms.push(sample.sim_ms);
            self.draw_ms.push(sample.draw_ms);
            self.frame_ms.push(sample.frame_ms);
            return;
        }

        let i = self.cursor;
        self.sim_ms[i] = sample.sim_ms;
        self.draw_ms[i] = sample.draw_ms;
        self.frame_ms[i] = sample.frame_ms;
        self.cursor = (i + 1) % self.capacity;
    }

    /// Raw slots in storage order (not chronological once wrapped).
    #[inline]
    pub fn samples(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Simulation => &self.sim_ms,
            Metric::Draw => &self.draw_ms,
            Metric::Frame => &self.frame_ms,
        }
    }

    pub fn sample_at(&self, slot: usize) -> Option<FrameSample> {
        Some(FrameSample {
            sim_ms: *self.sim_ms.get(slot)?,
            draw_ms: *self.draw_ms.get(slot)?,
            frame_ms: *self.frame_ms.get(slot)?,
        })
    }

    /// Held samples, oldest first.
    pub fn chronological(&self, metric: Metric) -> Vec<f64> {
        let s = self.samples(metric);
        if s.len() < self.capacity {
            return s.to_vec();
        }
        let mut out = Vec::with_capacity(s.len());
        out.extend_from_slice(&s[self.cursor..]);
        out.extend_from_slice(&s[..self.cursor]);
        out
    }

    /// Mean over every held sample; `None` before the first frame.
    #[inline]
    pub fn average(&self, metric: Metric) -> Option<f64> {
        mean(self.samples(metric))
    }

    pub fn fps(&self) -> Option<f64> {
        self.average(Metric::Frame)
            .filter(|ms| *ms > 0.0)
            .map(|ms| 1000.0 / ms)
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
