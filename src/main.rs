use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use class_version::cli::Cli;
use class_version::config::Config;
use class_version::coordinate::InputPatterns;
use class_version::dispatch::Dispatcher;
use class_version::fetch::Curl;
use class_version::report::ConsoleReporter;
use class_version::walk::FsTree;
use std::io;
use tracing::level_filters::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.inputs.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = Config::resolve(&cli);
    let patterns = InputPatterns::default();
    let fetcher = Curl::new(config.curl.clone());
    let mut reporter = ConsoleReporter::new(config.format, io::stdout().lock(), io::stderr());
    let mut dispatcher = Dispatcher::new(&config, &patterns, &FsTree, &fetcher, &mut reporter);

    let mut failed = 0usize;
    for arg in &cli.inputs {
        if let Err(err) = dispatcher.run(arg) {
            failed += 1;
            eprintln!("[class-version] {arg}: {err:#}");
        }
    }

    if failed > 0 {
        bail!("{failed} of {} inputs failed", cli.inputs.len());
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => level_from_env(),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn level_from_env() -> LevelFilter {
    std::env::var("RUST_LOG")
        .map(|e| match e.to_ascii_lowercase().as_str() {
            "error" => LevelFilter::ERROR,
            "warn" => LevelFilter::WARN,
            "info" => LevelFilter::INFO,
            "debug" => LevelFilter::DEBUG,
            "trace" => LevelFilter::TRACE,
            "off" => LevelFilter::OFF,
            _ => LevelFilter::WARN,
        })
        .unwrap_or(LevelFilter::WARN)
}
