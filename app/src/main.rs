mod demo;

use harness_core::{
    host, logging, ExitSignal, HarnessConfig, RunLoop, SystemClock,
};
use log::{error, info, warn};

const CONFIG_ENV: &str = "HARNESS_CONFIG";

fn main() -> anyhow::Result<()> {
    logging::init(&logging::LoggerConfig::from_env())?;

    let cfg = match std::env::var_os(CONFIG_ENV) {
        Some(path) => HarnessConfig::load_toml(path)?,
        None => HarnessConfig::default(),
    };
    info!("boot");

    let exit = ExitSignal::new();
    if let Err(e) = exit.install_ctrlc_handler() {
        warn!("ctrl-c handler not installed: {e}");
    }

    let (width, height) = (cfg.window.width, cfg.window.height);
    let mut run = RunLoop::launch(
        || demo::create_engine(width, height),
        SystemClock,
        &cfg,
        exit,
    )
    .inspect_err(|e| error!("{e}"))?;

    let mut host = host::create_host(&cfg)?;
    let summary = run.run(host.as_mut());

    info!(
        "shutdown after {} frames ({} paused, {} with engine errors)",
        summary.frames, summary.paused_frames, summary.faulted_frames
    );
    Ok(())
}
