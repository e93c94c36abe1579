use std::time::Duration;

use anyhow::Result;
use log::error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode as WKeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

use super::{FrameHost, HostEvent, Presentation};
use crate::{
    config::WindowConfig,
    input::{KeyCode, KeyState},
};

/// Upper bound on a single event pump while waiting for the next redraw.
const PUMP_TIMEOUT: Duration = Duration::from_millis(16);

/// Winit window of fixed logical size. The window title is the status region.
///
/// Events are pumped from inside `next_frame`, so the run loop keeps control
/// of its own lifetime instead of handing it to winit.
pub struct WindowHost {
    event_loop: EventLoop<()>,
    app: WindowApp,
}

impl WindowHost {
    pub fn new(cfg: &WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            app: WindowApp::new(cfg),
        })
    }
}

impl FrameHost for WindowHost {
    fn next_frame(&mut self, events: &mut Vec<HostEvent>) -> Presentation {
        loop {
            if let Some(w) = &self.app.window {
                w.request_redraw();
            }
            if let PumpStatus::Exit(_) = self
                .event_loop
                .pump_app_events(Some(PUMP_TIMEOUT), &mut self.app)
            {
                events.append(&mut self.app.pending);
                return Presentation::TornDown;
            }
            if self.app.redraw_ready {
                break;
            }
        }

        self.app.redraw_ready = false;
        events.append(&mut self.app.pending);
        Presentation::Ready
    }

    fn publish_status(&mut self, status: &str) {
        if let Some(w) = &self.app.window {
            w.set_title(&format!("{} – {}", self.app.title, status));
        }
    }
}

struct WindowApp {
    title: String,
    width: u32,
    height: u32,

    window: Option<Window>,
    window_id: Option<WindowId>,

    pending: Vec<HostEvent>,
    redraw_ready: bool,
}

impl WindowApp {
    fn new(cfg: &WindowConfig) -> Self {
        Self {
            title: cfg.title.clone(),
            width: cfg.width,
            height: cfg.height,
            window: None,
            window_id: None,
            pending: Vec::new(),
            redraw_ready: false,
        }
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, el: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(false);

        let window = match el.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create window: {e}");
                el.exit();
                return;
            }
        };

        self.window_id = Some(window.id());
        self.window = Some(window);
    }

    fn window_event(&mut self, _el: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if Some(id) != self.window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.pending.push(HostEvent::CloseRequested),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.pending.push(HostEvent::Key {
                        code: map_key_code(code),
                        state: map_key_state(event.state),
                        repeat: event.repeat,
                    });
                }
            }
            WindowEvent::RedrawRequested => self.redraw_ready = true,
            _ => {}
        }
    }
}

fn map_key_code(code: WKeyCode) -> KeyCode {
    match code {
        WKeyCode::ArrowUp => KeyCode::ArrowUp,
        WKeyCode::ArrowDown => KeyCode::ArrowDown,
        WKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WKeyCode::ArrowRight => KeyCode::ArrowRight,
        WKeyCode::Escape => KeyCode::Escape,
        WKeyCode::KeyP => KeyCode::P,
        _ => KeyCode::Unknown,
    }
}

#[inline]
fn map_key_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}
