use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};
use tabsync_replay::{Replay, ReplayError, Scenario, write_trace};

/// Replay a scripted gesture trace and print the header translation.
#[derive(Debug, Parser)]
#[command(name = "tabsync-replay", version)]
struct Args {
    /// Scenario file (JSON).
    scenario: PathBuf,

    /// Log file.
    #[arg(long, default_value = "tabsync-replay.log")]
    log: PathBuf,

    /// Print the trace as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// More log detail (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<(), ReplayError> {
    let scenario = Scenario::load(&args.scenario)?;
    let trace = Replay::new(scenario)?.run()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &trace)
            .map_err(|e| ReplayError::Output(e.into()))?;
        writeln!(out)?;
    } else {
        write_trace(&mut out, &trace)?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let log_file = File::create(&args.log).expect("Failed to create log file");
    WriteLogger::init(level, Config::default(), log_file).expect("Failed to initialize logger");

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
