use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ScreenChoice};

#[derive(Debug, Parser)]
#[command(name = "remote-ui", version, about = "Render provider-driven component trees in the terminal")]
pub struct Cli {
    /// Screen(s) to mount (overrides the config file)
    #[arg(long, value_enum)]
    pub screen: Option<ScreenChoice>,

    /// Random extra provider latency ceiling in milliseconds
    #[arg(long, value_name = "MS")]
    pub net_delay: Option<u64>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (also settable via REMOTE_UI_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Apply command line overrides on top of the file configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(screen) = self.screen {
            config.defaults.screen = screen;
        }
        if let Some(delay) = self.net_delay {
            config.network.delay_ms = delay;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let cli = Cli::try_parse_from(["remote-ui", "--screen", "button", "--net-delay", "300"])
            .unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.defaults.screen, ScreenChoice::Button);
        assert_eq!(config.network.delay_ms, 300);
    }

    #[test]
    fn no_flags_keep_file_values() {
        let cli = Cli::try_parse_from(["remote-ui"]).unwrap();
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn unknown_screen_is_rejected() {
        assert!(Cli::try_parse_from(["remote-ui", "--screen", "carousel"]).is_err());
    }
}
