//! Frame presentation hosts.
//!
//! A host owns the presentation surface and the input source. The run loop
//! blocks in [`FrameHost::next_frame`] once per frame; that call is the only
//! suspension point, so key handling and frame work never overlap.

pub mod headless;
pub mod window;

use anyhow::Result;
use log::info;

use crate::{
    config::{HarnessConfig, HostKind},
    input::{KeyCode, KeyState},
};

pub use headless::HeadlessHost;
pub use window::WindowHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Key { code: KeyCode, state: KeyState, repeat: bool },
    CloseRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Ready,
    /// The host is gone; no further frames will come.
    TornDown,
}

pub trait FrameHost {
    /// Blocks until the next frame may run. Input seen while waiting is
    /// appended to `events` in arrival order.
    fn next_frame(&mut self, events: &mut Vec<HostEvent>) -> Presentation;

    /// Replaces the status text shown to the user.
    fn publish_status(&mut self, status: &str);
}

pub fn create_host(cfg: &HarnessConfig) -> Result<Box<dyn FrameHost>> {
    match cfg.runtime.host {
        HostKind::Window => {
            info!(
                "window host {}x{} '{}'",
                cfg.window.width, cfg.window.height, cfg.window.title
            );
            Ok(Box::new(WindowHost::new(&cfg.window)?))
        }
        HostKind::Headless => {
            info!("headless host at {} fps", cfg.frame.target_fps);
            Ok(Box::new(HeadlessHost::new(cfg.frame.target_fps)))
        }
    }
}
