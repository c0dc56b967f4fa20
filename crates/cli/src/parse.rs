//! ArgMatches → typed arguments.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use tracestate::prelude::Timestamp;

/// Arguments of `tracestate project`.
#[derive(Debug)]
pub struct ProjectArgs {
    pub input: String,
    pub config: Option<PathBuf>,
    pub at: Option<Timestamp>,
    pub json: bool,
}

pub fn project_args(matches: &ArgMatches) -> Result<ProjectArgs> {
    let input = matches
        .get_one::<String>("file")
        .cloned()
        .ok_or_else(|| anyhow!("missing event file"))?;
    let at = matches
        .get_one::<String>("at")
        .map(|s| parse_timestamp(s))
        .transpose()?;
    Ok(ProjectArgs {
        input,
        config: matches.get_one::<String>("config").map(PathBuf::from),
        at,
        json: matches.get_flag("json"),
    })
}

/// Nanoseconds, optionally with `_` digit separators.
fn parse_timestamp(s: &str) -> Result<Timestamp> {
    let digits: String = s.chars().filter(|c| *c != '_').collect();
    digits
        .parse::<i64>()
        .map(Timestamp::from_nanos)
        .map_err(|_| anyhow!("invalid timestamp '{}': expected integer nanoseconds", s))
}
