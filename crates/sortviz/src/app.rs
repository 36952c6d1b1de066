//! Application entry point and dispatch.

use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sortviz_client::HttpBackend;
use sortviz_core::VizError;
use sortviz_orchestration::catalog::AlgorithmCatalog;
use sortviz_orchestration::interfaces::{endpoints, BackendClient};
use sortviz_tui::{TuiApp, TuiMessage, Worker};

use crate::config::AppConfig;

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
}

/// Install the tracing subscriber.
///
/// `--check` logs to stderr. The TUI owns the terminal, so it only logs
/// when `--log-file` is given.
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    if config.check {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .init();
    } else if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    let client = HttpBackend::new(&config.api_url, config.timeout())?;
    if config.check {
        return run_check(&client);
    }
    run_tui(client, config)
}

fn run_check(client: &HttpBackend) -> Result<()> {
    let health = client.health()?;
    if !health.is_ok() {
        return Err(VizError::network(
            endpoints::HEALTH,
            format!("backend reports status {:?}", health.status),
        )
        .into());
    }
    let entries = AlgorithmCatalog::new().load(client)?;
    println!("{}: ok, {} algorithms", client.base_url(), entries.len());
    for algorithm in entries.iter() {
        println!(
            "  {:<16} {:<18} avg {:<12} worst {}",
            algorithm.name, algorithm.label, algorithm.average, algorithm.worst
        );
    }
    Ok(())
}

fn run_tui(client: HttpBackend, config: &AppConfig) -> Result<()> {
    let api_url = client.base_url().to_string();
    let (tx, rx) = crossbeam_channel::unbounded::<TuiMessage>();
    let worker = Worker::new(Arc::new(client), tx);
    let mut app = TuiApp::new(rx, config.tui_options(&api_url))?;
    info!(%api_url, "starting TUI");
    app.run(&worker).context("TUI error")?;
    Ok(())
}
