use std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};

use super::{FrameHost, HostEvent, Presentation};

/// Paces frames with a fixed interval and rewrites one terminal line as the
/// status region. Produces no input.
pub struct HeadlessHost {
    interval: Duration,
    next_frame: Option<Instant>,
    wrote_status: bool,
}

impl HeadlessHost {
    pub fn new(target_fps: u32) -> Self {
        let fps = target_fps.max(1);
        Self {
            interval: Duration::from_secs(1) / fps,
            next_frame: None,
            wrote_status: false,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameHost for HeadlessHost {
    fn next_frame(&mut self, _events: &mut Vec<HostEvent>) -> Presentation {
        let now = Instant::now();
        let due = *self.next_frame.get_or_insert(now + self.interval);
        if now < due {
            thread::sleep(due - now);
        }

        let mut next = due + self.interval;
        // Behind schedule: start over instead of bursting to catch up.
        let now = Instant::now();
        if next < now {
            next = now + self.interval;
        }
        self.next_frame = Some(next);

        Presentation::Ready
    }

    fn publish_status(&mut self, status: &str) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "\r{status}\x1b[K");
        let _ = out.flush();
        self.wrote_status = true;
    }
}

impl Drop for HeadlessHost {
    fn drop(&mut self) {
        if self.wrote_status {
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_fps() {
        assert_eq!(HeadlessHost::new(50).interval(), Duration::from_millis(20));
        assert_eq!(HeadlessHost::new(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_next_frame_waits_one_interval() {
        let mut host = HeadlessHost::new(200);
        let mut events = Vec::new();
        let t0 = Instant::now();
        assert_eq!(host.next_frame(&mut events), Presentation::Ready);
        assert!(t0.elapsed() >= Duration::from_millis(5));
        assert!(events.is_empty());
    }
}
