use thiserror::Error;

/// Raised when a set cannot be built for the requested capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("Capability descriptor must be a string")]
    NotString,

    #[error("'{0}' does not name a collectable type")]
    NotCollectable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    InvalidCapability(#[from] CapabilityError),

    #[error("Item is not a '{expected}'")]
    InvalidCollectable { expected: String },

    #[error("No item stored under key '{0}'")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
