mod cli;
mod commands;
mod config;
mod error;
mod paths;

use std::fs;
use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Debug log to `latest.log` in the cache dir, plus info on stderr with `--verbose`.
fn init_logging(verbose: bool) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    paths::rotate_logs();
    if let Some(path) = paths::log_file() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match File::create(&path) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file)),
            Err(e) => eprintln!("warning: cannot write {}: {}", path.display(), e),
        }
    }

    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    let _ = CombinedLogger::init(loggers);
}
