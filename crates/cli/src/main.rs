//! Tracestate CLI: project a JSON-lines event file into attribute histories.
//!
//! ```text
//! tracestate project events.jsonl                 # summary + every interval
//! tracestate project events.jsonl --at 1500       # state at t=1500ns
//! tracestate project events.jsonl --json          # machine-readable output
//! tracestate project - < events.jsonl             # read stdin
//! ```
//!
//! Log verbosity follows `RUST_LOG`, or `-v` / `-vv` when it is unset.

mod format;
mod parse;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use tracestate::prelude::*;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use parse::ProjectArgs;

fn build_cli() -> Command {
    Command::new("tracestate")
        .about("Project trace event streams into time-indexed state histories")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("project")
                .about("Project a JSON-lines event file and print the resulting state")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("Event file, one JSON event per line ('-' for stdin)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_name("PATH")
                        .help("TOML projection configuration"),
                )
                .arg(
                    Arg::new("at")
                        .long("at")
                        .value_name("NANOS")
                        .help("Print the state at this timestamp instead of full histories"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit JSON instead of text"),
                ),
        )
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("project", sub)) => parse::project_args(sub).and_then(|args| run_project(&args)),
        _ => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run_project(args: &ProjectArgs) -> Result<()> {
    let mut builder = Analysis::builder();
    if let Some(path) = &args.config {
        builder = builder
            .config_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    let mut analysis = builder.build()?;

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin().lock()))
    } else {
        let file =
            File::open(&args.input).with_context(|| format!("opening {}", args.input))?;
        Box::new(BufReader::new(file))
    };

    let summary = analysis.run_json_lines(reader)?;
    debug!(events = summary.events, "input consumed");

    let store = analysis.store();
    let out = match (args.at, args.json) {
        (Some(at), false) => format::text_state(&summary, at, &store.state_at(at)),
        (Some(at), true) => format::json_state(&summary, at, &store.state_at(at))?,
        (None, false) => format::text_history(&summary, store),
        (None, true) => format::json_history(&summary, store)?,
    };
    println!("{}", out);
    Ok(())
}
