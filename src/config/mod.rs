//! Configuration file support.
//!
//! TOML at `~/.config/remote-ui/config.toml`; a missing file means defaults.
//! Command line flags are applied on top by the binary.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, Defaults, NetworkConfig, RegionConfig, ScreenChoice};
