//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Running one lookup against the configured provider
//! - Human-friendly output formatting and exit codes

use std::{ffi::OsString, process::ExitCode};

mod app;
mod cli;
mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let ctx = app::RunContext::from_env();

    match app::run(args, &ctx).await {
        Ok(report) => {
            for line in render::render_report(&report) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("run ended with error: {err:?}");
            let rendered = render::render_error(&err, &ctx);
            rendered.emit();
            ExitCode::from(rendered.exit_code)
        }
    }
}
