use crate::{
    error::{EngineFault, InitError},
    input::InputState,
};

/// The external simulation/rendering engine.
///
/// Errors come back as values: `None` means the call went fine.
pub trait EngineHandle {
    fn simulate(&mut self, elapsed_ms: f64, up: bool, down: bool, left: bool, right: bool) -> Option<String>;
    fn draw(&mut self) -> Option<String>;
}

/// What an engine factory hands back. Callers check `error` first, then `engine`.
#[derive(Debug)]
pub struct FactoryOutput<E> {
    pub error: Option<String>,
    pub engine: Option<E>,
}

impl<E> FactoryOutput<E> {
    pub fn ready(engine: E) -> Self {
        Self { error: None, engine: Some(engine) }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), engine: None }
    }
}

/// Sole owner of the engine; turns its optional errors into `Result`s.
pub struct EngineBoundary<E> {
    engine: E,
}

impl<E: EngineHandle> EngineBoundary<E> {
    pub fn initialize<F>(factory: F) -> Result<Self, InitError>
    where
        F: FnOnce() -> FactoryOutput<E>,
    {
        let out = factory();
        if let Some(err) = out.error {
            return Err(InitError::Factory(err));
        }
        let engine = out.engine.ok_or(InitError::MissingEngine)?;
        Ok(Self { engine })
    }

    /// `elapsed_ms` comes from the scheduler; the engine never measures it.
    #[inline]
    pub fn simulate(&mut self, elapsed_ms: f64, input: &InputState) -> Result<(), EngineFault> {
        into_result(self.engine.simulate(elapsed_ms, input.up, input.down, input.left, input.right))
    }

    #[inline]
    pub fn draw(&mut self) -> Result<(), EngineFault> {
        into_result(self.engine.draw())
    }

    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[inline]
fn into_result(raw: Option<String>) -> Result<(), EngineFault> {
    match raw {
        None => Ok(()),
        Some(msg) => Err(EngineFault(msg)),
    }
}
