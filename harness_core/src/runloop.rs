use log::info;

use crate::{
    boundary::{EngineBoundary, EngineHandle, FactoryOutput},
    clock::Clock,
    config::HarnessConfig,
    error::InitError,
    host::{FrameHost, HostEvent, Presentation},
    input::{InputState, KeyCode, KeyState},
    scheduler::FrameScheduler,
    signals::ExitSignal,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub paused_frames: u64,
    pub faulted_frames: u64,
}

/// Application-level loop: owns the input state, waits on the host, feeds
/// events in, ticks the scheduler and publishes the status line.
///
/// Stops when the host tears down, exit is requested (Escape, window close,
/// Ctrl-C) or `max_frames` is reached.
pub struct RunLoop<E, C> {
    scheduler: FrameScheduler<E, C>,
    input: InputState,
    exit: ExitSignal,
    max_frames: Option<u64>,
    events: Vec<HostEvent>,
}

impl<E: EngineHandle, C: Clock> RunLoop<E, C> {
    /// Builds the engine and registers the loop. A factory failure is
    /// returned before anything is scheduled.
    pub fn launch<F>(factory: F, clock: C, cfg: &HarnessConfig, exit: ExitSignal) -> Result<Self, InitError>
    where
        F: FnOnce() -> FactoryOutput<E>,
    {
        let boundary = EngineBoundary::initialize(factory)?;
        let scheduler = FrameScheduler::start(boundary, clock, &cfg.frame);
        Ok(Self::new(scheduler, exit, cfg.runtime.max_frames))
    }

    /// `max_frames == 0` means no limit.
    pub fn new(scheduler: FrameScheduler<E, C>, exit: ExitSignal, max_frames: u64) -> Self {
        Self {
            scheduler,
            input: InputState::new(),
            exit,
            max_frames: (max_frames > 0).then_some(max_frames),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub fn scheduler(&self) -> &FrameScheduler<E, C> {
        &self.scheduler
    }

    pub fn run(&mut self, host: &mut dyn FrameHost) -> RunSummary {
        let mut summary = RunSummary::default();

        loop {
            if self.exit.is_exit_requested() {
                info!("exit requested");
                break;
            }
            if self.max_frames.is_some_and(|max| summary.frames >= max) {
                info!("frame limit reached");
                break;
            }

            self.events.clear();
            if host.next_frame(&mut self.events) == Presentation::TornDown {
                info!("host torn down");
                break;
            }

            self.apply_events();
            if self.exit.is_exit_requested() {
                info!("exit requested");
                break;
            }

            let report = self.scheduler.tick(&self.input);
            summary.frames += 1;
            if report.paused {
                summary.paused_frames += 1;
            }
            if report.fault.is_some() {
                summary.faulted_frames += 1;
            }

            host.publish_status(&report.status);
        }

        summary
    }

    fn apply_events(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        for ev in events.drain(..) {
            match ev {
                HostEvent::CloseRequested => self.exit.request_exit(),
                HostEvent::Key { code: KeyCode::Escape, state: KeyState::Pressed, .. } => {
                    self.exit.request_exit();
                }
                HostEvent::Key { code: KeyCode::P, state: KeyState::Pressed, repeat: false } => {
                    self.scheduler.toggle_pause();
                }
                HostEvent::Key { code, state, .. } => self.input.apply(code, state),
            }
        }
        self.events = events;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, input::KeyCode};
    use std::collections::VecDeque;

    struct CountingEngine {
        calls: u32,
        fail_every: Option<u32>,
        last_input: InputState,
    }

    impl CountingEngine {
        fn new() -> Self {
            Self { calls: 0, fail_every: None, last_input: InputState::default() }
        }
    }

    impl EngineHandle for CountingEngine {
        fn simulate(&mut self, _elapsed_ms: f64, up: bool, down: bool, left: bool, right: bool) -> Option<String> {
            self.calls += 1;
            self.last_input = InputState { up, down, left, right };
            match self.fail_every {
                Some(n) if self.calls % n == 0 => Some(format!("fault on call {}", self.calls)),
                _ => None,
            }
        }

        fn draw(&mut self) -> Option<String> {
            None
        }
    }

    /// Host that replays one batch of events per frame and records the
    /// published status lines.
    struct ScriptedHost {
        clock: ManualClock,
        frames: VecDeque<Vec<HostEvent>>,
        published: Vec<String>,
        waits: u32,
    }

    impl ScriptedHost {
        fn new(clock: &ManualClock, frames: Vec<Vec<HostEvent>>) -> Self {
            Self { clock: clock.clone(), frames: frames.into(), published: Vec::new(), waits: 0 }
        }

        fn idle(clock: &ManualClock, n: usize) -> Self {
            Self::new(clock, vec![Vec::new(); n])
        }
    }

    impl FrameHost for ScriptedHost {
        fn next_frame(&mut self, events: &mut Vec<HostEvent>) -> Presentation {
            self.waits += 1;
            let Some(batch) = self.frames.pop_front() else { return Presentation::TornDown };
            self.clock.advance_ms(16);
            events.extend(batch);
            Presentation::Ready
        }

        fn publish_status(&mut self, status: &str) {
            self.published.push(status.to_string());
        }
    }

    fn key(code: KeyCode, state: KeyState) -> HostEvent {
        HostEvent::Key { code, state, repeat: false }
    }

    fn quiet_cfg() -> HarnessConfig {
        let mut cfg = HarnessConfig::default();
        cfg.frame.status_log_period_ms = 0;
        cfg
    }

    fn launch(engine: CountingEngine, clock: &ManualClock, cfg: &HarnessConfig) -> RunLoop<CountingEngine, ManualClock> {
        RunLoop::launch(|| FactoryOutput::ready(engine), clock.clone(), cfg, ExitSignal::new()).unwrap()
    }

    #[test]
    fn test_factory_failure_never_schedules() {
        let clock = ManualClock::new();
        let res = RunLoop::<CountingEngine, _>::launch(
            || FactoryOutput::failed("boom"),
            clock,
            &quiet_cfg(),
            ExitSignal::new(),
        );
        assert!(matches!(res, Err(InitError::Factory(ref m)) if m == "boom"));
    }

    #[test]
    fn test_runs_until_host_tears_down() {
        let clock = ManualClock::new();
        let mut run = launch(CountingEngine::new(), &clock, &quiet_cfg());
        let mut host = ScriptedHost::idle(&clock, 5);

        let summary = run.run(&mut host);

        assert_eq!(summary, RunSummary { frames: 5, paused_frames: 0, faulted_frames: 0 });
        assert_eq!(host.published.len(), 5);
        assert_eq!(run.scheduler().boundary().engine().calls, 5);
        assert_eq!(
            host.published[0],
            "Simulation running – 0.0ms sim – 0.0ms draw – 62.5fps"
        );
    }

    #[test]
    fn test_faults_do_not_stop_the_loop() {
        let clock = ManualClock::new();
        let mut engine = CountingEngine::new();
        engine.fail_every = Some(2);
        let mut run = launch(engine, &clock, &quiet_cfg());
        let mut host = ScriptedHost::idle(&clock, 6);

        let summary = run.run(&mut host);

        assert_eq!(summary.frames, 6);
        assert_eq!(summary.faulted_frames, 3);
        assert!(host.published[1].starts_with("Simulation error: fault on call 2 – "));
        assert!(host.published[2].starts_with("Simulation running – "));
        assert_eq!(run.scheduler().metrics().len(), 6);
        // the host was asked for a frame after every faulted one
        assert_eq!(host.waits, 7);
    }

    #[test]
    fn test_key_events_reach_engine() {
        let clock = ManualClock::new();
        let mut run = launch(CountingEngine::new(), &clock, &quiet_cfg());
        let mut host = ScriptedHost::new(
            &clock,
            vec![
                vec![key(KeyCode::ArrowUp, KeyState::Pressed), key(KeyCode::ArrowLeft, KeyState::Pressed)],
                vec![key(KeyCode::ArrowUp, KeyState::Released), key(KeyCode::Unknown, KeyState::Pressed)],
            ],
        );

        run.run(&mut host);

        let expected = InputState { left: true, ..InputState::default() };
        assert_eq!(*run.input(), expected);
        assert_eq!(run.scheduler().boundary().engine().last_input, expected);
    }

    #[test]
    fn test_escape_and_close_request_exit() {
        let clock = ManualClock::new();
        let mut run = launch(CountingEngine::new(), &clock, &quiet_cfg());
        let mut host = ScriptedHost::new(
            &clock,
            vec![Vec::new(), vec![key(KeyCode::Escape, KeyState::Pressed)], Vec::new()],
        );
        assert_eq!(run.run(&mut host).frames, 1);

        let mut run = launch(CountingEngine::new(), &clock, &quiet_cfg());
        let mut host = ScriptedHost::new(&clock, vec![vec![HostEvent::CloseRequested], Vec::new()]);
        assert_eq!(run.run(&mut host).frames, 0);
    }

    #[test]
    fn test_external_exit_signal() {
        let clock = ManualClock::new();
        let exit = ExitSignal::new();
        let mut run = RunLoop::launch(
            || FactoryOutput::ready(CountingEngine::new()),
            clock.clone(),
            &quiet_cfg(),
            exit.clone(),
        )
        .unwrap();
        exit.request_exit();

        let mut host = ScriptedHost::idle(&clock, 3);
        assert_eq!(run.run(&mut host).frames, 0);
        assert_eq!(host.waits, 0);
    }

    #[test]
    fn test_pause_key_toggles() {
        let clock = ManualClock::new();
        let mut run = launch(CountingEngine::new(), &clock, &quiet_cfg());
        let p = key(KeyCode::P, KeyState::Pressed);
        let p_repeat = HostEvent::Key { code: KeyCode::P, state: KeyState::Pressed, repeat: true };
        let mut host = ScriptedHost::new(
            &clock,
            vec![Vec::new(), vec![p], vec![p_repeat], vec![p], Vec::new()],
        );

        let summary = run.run(&mut host);

        assert_eq!(summary.frames, 5);
        assert_eq!(summary.paused_frames, 2);
        assert_eq!(run.scheduler().boundary().engine().calls, 3);
        assert!(host.published[1].starts_with("Paused – "));
        assert!(host.published[3].starts_with("Simulation running – "));
    }

    #[test]
    fn test_max_frames() {
        let clock = ManualClock::new();
        let mut cfg = quiet_cfg();
        cfg.runtime.max_frames = 3;
        let mut run = launch(CountingEngine::new(), &clock, &cfg);
        let mut host = ScriptedHost::idle(&clock, 10);

        assert_eq!(run.run(&mut host).frames, 3);
        assert_eq!(host.waits, 3);
    }
}
