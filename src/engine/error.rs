//! Engine error taxonomy
//!
//! Every failure the engine can observe falls into one of these classes.
//! Injection failures never leave the ticker; the others reach callers through
//! [`EngineError`] from the run and settings commands.

use thiserror::Error;

/// `Start()` could not register the wheel interceptor.
#[derive(Error, Debug)]
pub enum HookInstallError {
    #[error("A wheel hook is already installed in this process")]
    AlreadyInstalled,

    #[error("Wheel interception is not supported on this platform")]
    Unsupported,

    #[error("Failed to spawn hook thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),

    #[error("OS refused hook registration: {0}")]
    Os(String),
}

/// A synthetic wheel event could not be delivered on this tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectionFailure {
    #[error("Cursor position unavailable")]
    NoCursor,

    #[error("No window under the cursor")]
    NoWindow,

    #[error("Posting wheel event failed: {0}")]
    PostFailed(String),
}

/// Settings could not be read or written.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No configuration directory available for this user")]
    NoConfigDir,
}

/// A runtime parameter was outside its domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Smoothness must be in (0, 1], got {0}")]
    Smoothness(f64),

    #[error("Scroll multiplier must be finite and > 0, got {0}")]
    ScrollMultiplier(f64),

    #[error("Timer interval must be > 0 ms")]
    TimerInterval,
}

/// Errors surfaced by the engine facade
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    HookInstall(#[from] HookInstallError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
