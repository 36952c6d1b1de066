//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use sortviz_core::constants::{
    API_URL_ENV, DEFAULT_ALGORITHM, DEFAULT_API_URL, DEFAULT_ARRAY_SIZE, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_SPEED,
};
use sortviz_core::model::Distribution;
use sortviz_core::validation::{check_speed, SizeLimits};
use sortviz_tui::{RunForm, TuiOptions};

/// SortViz: watch sorting algorithms run, compare them and predict their
/// runtime against a SortViz backend.
#[derive(Parser, Debug)]
#[command(name = "sortviz", version, about)]
pub struct AppConfig {
    /// Backend base URL.
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Initial algorithm.
    #[arg(short, long, default_value = DEFAULT_ALGORITHM)]
    pub algorithm: String,

    /// Initial array size (10-200).
    #[arg(short, long, default_value_t = DEFAULT_ARRAY_SIZE, value_parser = parse_size)]
    pub size: usize,

    /// Input distribution: random, sorted, reverse, nearly_sorted or many_duplicates.
    #[arg(short, long, default_value = "random")]
    pub distribution: Distribution,

    /// Animation speed (10-100).
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = parse_speed)]
    pub speed: u32,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS, value_parser = parse_timeout)]
    pub timeout_secs: u64,

    /// Write logs to this file while the TUI is running.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Check backend health, list the algorithms and exit.
    #[arg(long)]
    pub check: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Start-up settings for the TUI.
    #[must_use]
    pub fn tui_options(&self, api_url: &str) -> TuiOptions {
        TuiOptions {
            api_url: api_url.to_string(),
            run: RunForm {
                algorithm: self.algorithm.clone(),
                size: self.size,
                distribution: self.distribution,
                speed: self.speed,
            },
        }
    }
}

fn parse_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    SizeLimits::RUN_FORM.check(size).map_err(|e| e.to_string())
}

fn parse_speed(s: &str) -> Result<u32, String> {
    let speed: u32 = s.parse().map_err(|e| format!("{e}"))?;
    check_speed(speed).map_err(|e| e.to_string())
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("timeout must be at least one second".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(e.to_string()),
    }
}
