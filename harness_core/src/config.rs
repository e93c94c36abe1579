use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::metrics::DEFAULT_CAPACITY;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl HarnessConfig {
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: HarnessConfig = toml::from_str(text)?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String { "Frame Harness".to_string() }
fn default_width() -> u32 { 1024 }
fn default_height() -> u32 { 768 }

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: default_title(), width: default_width(), height: default_height() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default = "default_metrics_capacity")]
    pub metrics_capacity: usize,
    /// 0 disables the periodic status log.
    #[serde(default = "default_status_log_period_ms")]
    pub status_log_period_ms: u32,
    /// Pacing for the headless host; the window host follows the compositor.
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

fn default_metrics_capacity() -> usize { DEFAULT_CAPACITY }
fn default_status_log_period_ms() -> u32 { 1000 }
fn default_target_fps() -> u32 { 60 }

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            metrics_capacity: default_metrics_capacity(),
            status_log_period_ms: default_status_log_period_ms(),
            target_fps: default_target_fps(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    Window,
    Headless,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_host")]
    pub host: HostKind,
    /// 0 runs until the host goes away or exit is requested.
    #[serde(default)]
    pub max_frames: u64,
}

fn default_host() -> HostKind { HostKind::Window }

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { host: default_host(), max_frames: 0 }
    }
}
