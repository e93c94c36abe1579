//! Frame harness core
//!
//! Host-side run loop for an external simulation engine: arrow-key input
//! state, per-frame `simulate`/`draw` calls with measured elapsed time,
//! rolling timing averages and a one-line status readout.

pub mod boundary;
pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod host;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod runloop;
pub mod scheduler;
pub mod signals;

pub use boundary::{EngineBoundary, EngineHandle, FactoryOutput};
pub use clock::{Clock, SystemClock};
pub use config::HarnessConfig;
pub use error::{EngineFault, InitError};
pub use input::InputState;
pub use runloop::{RunLoop, RunSummary};
pub use scheduler::FrameScheduler;
pub use signals::ExitSignal;
