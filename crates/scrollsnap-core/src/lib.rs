pub mod config;
pub mod error;
pub mod layout;
pub mod snap;

pub use config::{AppConfig, EasingType, SnapSettings, WheelMode};
pub use error::{ConfigError, Error, InitError, Result};
pub use snap::{Outcome, SnapConfig, SnapController};
