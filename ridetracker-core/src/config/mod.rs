//! Configuration types
//!
//! Board-agnostic configuration, read from `ride.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ConfigError};
pub use types::*;
