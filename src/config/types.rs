use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub region: RegionConfig,
}

/// Which demo screens to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScreenChoice {
    Tabs,
    Button,
    Input,
    #[default]
    All,
}

/// Default settings for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Screen(s) to show on startup (default: all).
    #[serde(default)]
    pub screen: ScreenChoice,
    /// UI tick interval in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

/// Simulated provider latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Fixed latency added to every provider call (default: 30).
    #[serde(default = "default_base_latency_ms")]
    pub base_latency_ms: u64,
    /// Upper bound of the random latency on top of the base (default: 0).
    #[serde(default)]
    pub delay_ms: u64,
    /// Provider calls slower than this fail with a timeout (default: 5000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Render loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Number of recent errors kept per region (default: 50).
    #[serde(default = "default_error_history")]
    pub error_history: usize,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_base_latency_ms() -> u64 {
    30
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_error_history() -> usize {
    50
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            screen: ScreenChoice::default(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_latency_ms: default_base_latency_ms(),
            delay_ms: 0,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            error_history: default_error_history(),
        }
    }
}
