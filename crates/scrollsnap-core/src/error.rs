use thiserror::Error;

/// A required option was missing or out of range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Elements missing: elements")]
    MissingElements,

    #[error("Property missing or not a number: min_width")]
    MissingMinWidth,

    #[error("Property missing or not a number: min_height")]
    MissingMinHeight,
}

/// Why `SnapController::init` left the controller inert
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InitError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Mobile device detected, snapping disabled")]
    MobileDevice,

    #[error("Controller is already initialized")]
    AlreadyInitialized,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
