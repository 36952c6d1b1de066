//! SortViz terminal client.

use std::process::ExitCode;

use sortviz_lib::{app, config, errors};

fn main() -> ExitCode {
    let config = config::AppConfig::parse();
    if let Err(e) = app::init_tracing(&config) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = errors::exit_code(&e);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
