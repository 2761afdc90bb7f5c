use thiserror::Error;

/// Everything that can stop a surge. None of these are fatal to the host;
/// each one is shown to the player and the surge aborts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurgeError {
    /// No token/actor was selected to act on.
    #[error("no actor selected")]
    NoSelection,

    /// An expected actor, class or hit point field is absent.
    #[error("missing data: {0}")]
    MissingData(String),

    /// Every hit dice pool is exhausted.
    #[error("no hit dice remaining to spend")]
    NoResourceAvailable,

    /// Resolver precondition violated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The actor store rejected a write.
    #[error("store write failed: {0}")]
    StoreWrite(String),
}

pub type SurgeResult<T> = Result<T, SurgeError>;
