use thiserror::Error;

/// Engine construction failed. Fatal: the run loop must not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("engine factory failed: {0}")]
    Factory(String),
    #[error("engine factory returned neither an engine nor an error")]
    MissingEngine,
}

/// A `simulate` or `draw` call reported a problem for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineFault(pub String);

impl EngineFault {
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
