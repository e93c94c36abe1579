use std::io::Write;

use anyhow::{anyhow, Result};
use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

pub const LEVEL_ENV: &str = "HARNESS_LOG";
pub const COLORS_ENV: &str = "HARNESS_LOG_COLORS";
pub const MODULE_ENV: &str = "HARNESS_LOG_MODULE";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LevelFilter,
    pub colors: bool,
    pub include_module: bool,
}

impl LoggerConfig {
    pub fn from_env() -> Self {
        let level = std::env::var(LEVEL_ENV)
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        let colors = std::env::var(COLORS_ENV)
            .ok()
            .map(|v| v != "0")
            .unwrap_or(true);
        let include_module = std::env::var(MODULE_ENV)
            .ok()
            .map(|v| v != "0")
            .unwrap_or(true);

        Self {
            level,
            colors,
            include_module,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Installs the process-wide console logger. Fails if a logger is already set.
pub fn init(config: &LoggerConfig) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(config.level);
    builder.write_style(if config.colors {
        WriteStyle::Auto
    } else {
        WriteStyle::Never
    });

    let include_module = config.include_module;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if include_module {
            writeln!(
                buf,
                "[{style}{:<5}{style:#}] {:<25} {}",
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "[{style}{:<5}{style:#}] {}", record.level(), record.args())
        }
    });

    builder
        .try_init()
        .map_err(|e| anyhow!("logger init failed: {e}"))
}
