//! Console mirror match
//!
//! Launches one UCI engine binary twice and lets it play itself, printing
//! the board after every move and writing a PGN of the game at the end.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use match_core::pgn;
use match_runner::{run_match, ConsoleSink, EngineConfig, MatchConfig, Publisher};
use uci_session::UciEngineSession;

#[derive(Debug)]
struct CliOptions {
    config: MatchConfig,
    pgn_path: PathBuf,
}

fn print_usage() {
    println!("Engine mirror match");
    println!();
    println!("Usage:");
    println!("  mirror_match <engine-binary> [--think-ms N] [--delay-ms N] [--max-plies N] [--pgn PATH]");
    println!();
    println!("Options:");
    println!("  --think-ms N    thinking time per move in milliseconds (default 300)");
    println!("  --delay-ms N    pacing delay between moves in milliseconds (default 100)");
    println!("  --max-plies N   abort the game after N plies (default 512)");
    println!("  --pgn PATH      where to write the game record (default mirror_match.pgn)");
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> anyhow::Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => bail!("missing value for {flag}"),
    }
}

fn parse_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions {
        config: MatchConfig::default(),
        pgn_path: PathBuf::from("mirror_match.pgn"),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--think-ms" => {
                options.config.think_time =
                    Duration::from_millis(flag_value(args, &mut i)?.parse()?);
            }
            "--delay-ms" => {
                options.config.move_delay =
                    Duration::from_millis(flag_value(args, &mut i)?.parse()?);
            }
            "--max-plies" => {
                options.config.max_plies = flag_value(args, &mut i)?.parse()?;
            }
            "--pgn" => {
                options.pgn_path = PathBuf::from(flag_value(args, &mut i)?);
            }
            other => bail!("unknown option: {other}"),
        }
        i += 1;
    }
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("match_runner=info".parse()?))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "help" || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let mut options = parse_options(&args[2..])?;

    let engine = EngineConfig::new(&args[1])?;
    if let Some(stem) = engine.binary.file_stem().and_then(|s| s.to_str()) {
        options.config.white_name = format!("{stem} (white)");
        options.config.black_name = format!("{stem} (black)");
    }
    info!(path = %engine.binary.display(), "launching engines");

    let mut white = UciEngineSession::spawn("white", &engine.binary)?;
    let mut black = UciEngineSession::spawn("black", &engine.binary)?;

    let mut publisher = Publisher::new();
    publisher.attach(Box::new(ConsoleSink));

    let outcome = run_match(&mut white, &mut black, &options.config, &mut publisher)?;
    println!("Result: {}", outcome.result);

    // The match result stands even if the export fails; just report it.
    match pgn::write_file(&options.pgn_path, &outcome.record) {
        Ok(()) => println!("PGN saved to {}", options.pgn_path.display()),
        Err(e) => error!(error = %e, "failed to write game record"),
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_options(&args(&[
            "--think-ms",
            "50",
            "--delay-ms",
            "5",
            "--max-plies",
            "40",
            "--pgn",
            "out.pgn",
        ]))
        .unwrap();

        assert_eq!(options.config.think_time, Duration::from_millis(50));
        assert_eq!(options.config.move_delay, Duration::from_millis(5));
        assert_eq!(options.config.max_plies, 40);
        assert_eq!(options.pgn_path, PathBuf::from("out.pgn"));
    }

    #[test]
    fn trailing_flag_without_value_is_an_error() {
        let err = parse_options(&args(&["--think-ms"])).unwrap_err();
        assert!(err.to_string().contains("missing value for --think-ms"));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = parse_options(&args(&["--frobnicate"])).unwrap_err();
        assert!(err.to_string().contains("unknown option"));
    }
}
