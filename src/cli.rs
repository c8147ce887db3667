//! Command-line arguments.

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use termfireworks::Config;
use termfireworks::color::parse_hex_color;

#[derive(Parser)]
#[command(name = "termfireworks")]
#[command(about = "Fireworks display for true-colour terminals", long_about = None)]
#[command(version)]
#[command(after_help = "Hold the left mouse button to launch fireworks at the pointer.\n\
                        Press 'q', ESC, or Ctrl+C to exit.")]
pub struct Cli {
    /// Background color as hex (e.g., --bg-color 1a1b26)
    #[arg(long, value_name = "RRGGBB", value_parser = parse_bg_color)]
    pub bg_color: Option<(u8, u8, u8)>,

    /// Seed for a reproducible show
    #[arg(long)]
    pub seed: Option<u64>,

    /// Particles per burst
    #[arg(long, value_name = "COUNT")]
    pub particles: Option<usize>,

    /// Minimum ticks between automatic launches
    #[arg(long, value_name = "TICKS")]
    pub auto_min: Option<u32>,

    /// Maximum ticks between automatic launches
    #[arg(long, value_name = "TICKS")]
    pub auto_max: Option<u32>,

    /// Hide the pulsing ring at each firework's target
    #[arg(long)]
    pub no_target_indicator: bool,

    /// Multiplier for speeds and gravity (derived from terminal height if omitted)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub tick_rate: u32,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Write log output to this file (stderr shares the screen and is muted while drawing)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Builds the simulation config for a surface `height` pixels tall.
    pub fn config(&self, height: usize) -> Config {
        let mut config = Config::default();

        if let Some(count) = self.particles {
            config.particle_count = count;
        }
        if let Some(min) = self.auto_min {
            config.ticks_per_firework_automated_min = min;
        }
        if let Some(max) = self.auto_max {
            config.ticks_per_firework_automated_max = max;
        }
        if self.no_target_indicator {
            config.firework_target_indicator = false;
        }

        let scale = self
            .scale
            .unwrap_or_else(|| Config::scale_for_height(height));
        config.scaled(scale)
    }

    pub fn log_level(&self) -> Option<LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, false) => None,
            (0, true) => Some(LevelFilter::Error),
            (1, _) => Some(LevelFilter::Info),
            (2, _) => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }

    /// Log level while the display owns the terminal. Console logging would
    /// write over the frame, so it is muted unless logs go to a file.
    pub fn screen_log_level(&self, configured: LevelFilter) -> LevelFilter {
        if self.log_file.is_some() {
            configured
        } else {
            LevelFilter::Off
        }
    }
}

fn parse_bg_color(value: &str) -> Result<(u8, u8, u8), String> {
    parse_hex_color(value)
        .ok_or_else(|| format!("invalid hex color '{value}', expected RRGGBB (e.g., 1a1b26)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["termfireworks"]).unwrap();
        assert_eq!(cli.tick_rate, 60);
        assert_eq!(cli.bg_color, None);
        assert_eq!(cli.log_level(), None);

        let config = cli.config(720);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "termfireworks",
            "--bg-color",
            "1a1b26",
            "--particles",
            "40",
            "--auto-min",
            "10",
            "--auto-max",
            "30",
            "--no-target-indicator",
            "--scale",
            "0.5",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.bg_color, Some((0x1a, 0x1b, 0x26)));
        assert_eq!(cli.log_level(), Some(LevelFilter::Debug));

        let config = cli.config(100);
        assert_eq!(config.particle_count, 40);
        assert_eq!(config.ticks_per_firework_automated_min, 10);
        assert_eq!(config.ticks_per_firework_automated_max, 30);
        assert!(!config.firework_target_indicator);
        assert_eq!(config.firework_speed, 2.5);
    }

    #[test]
    fn test_console_logging_muted_while_drawing() {
        let cli = Cli::try_parse_from(["termfireworks", "-vvv"]).unwrap();
        assert_eq!(cli.screen_log_level(LevelFilter::Trace), LevelFilter::Off);

        let cli =
            Cli::try_parse_from(["termfireworks", "-vvv", "--log-file", "show.log"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("show.log")));
        assert_eq!(cli.screen_log_level(LevelFilter::Trace), LevelFilter::Trace);
    }

    #[test]
    fn test_bad_color_rejected() {
        assert!(Cli::try_parse_from(["termfireworks", "--bg-color", "red"]).is_err());
    }

    #[test]
    fn test_tick_rate_bounds() {
        assert!(Cli::try_parse_from(["termfireworks", "--tick-rate", "0"]).is_err());
        assert!(Cli::try_parse_from(["termfireworks", "--tick-rate", "30"]).is_ok());
    }
}
