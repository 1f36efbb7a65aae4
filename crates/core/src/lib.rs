#![forbid(unsafe_code)]

pub mod config;
pub mod model;

pub use config::{ConfigError, TrackerConfig};
