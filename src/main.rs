use std::process;

use clap::{CommandFactory, Parser};
use santree::cli::args::Cli;
use santree::cli::commands::execute_command;
use santree::cli::output;
use santree::exitcode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if cli.command.is_none() {
        // Help text goes to stdout; a failed write is not worth reporting
        let _ = Cli::command().print_help();
        process::exit(exitcode::USAGE);
    }

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        process::exit(e.exit_code());
    }
    process::exit(exitcode::OK);
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_parse() {
        let cli = Cli::try_parse_from([
            "santree",
            "-dd",
            "--strict",
            "check",
            "--text",
            "1. e4 e5",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        assert!(cli.strict);
        assert!(!cli.castling_suffix);
    }

    #[test]
    fn test_file_and_text_conflict() {
        let result = Cli::try_parse_from(["santree", "parse", "game.san", "--text", "1. e4"]);
        assert!(result.is_err());
    }
}
