use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use getopts::Options;

/// What the binary computes from a layout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Coordinates,
    Agenda,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "coordinates" => Ok(Self::Coordinates),
            "agenda" => Ok(Self::Agenda),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub input: PathBuf,
    pub mode: Mode,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_BIN_NAME")),
    );
    opts.optopt(
        "i",
        "input",
        "JSON layout request to read",
        "FILE",
    );
    opts.optopt(
        "m",
        "mode",
        "Either 'coordinates' or 'agenda' [Default: coordinates]",
        "MODE",
    );
    opts
}

/// ## Summary
/// Parses the command line (without the program name).
///
/// ## Errors
/// Fails on unknown options, a missing `--input` or an unknown `--mode`.
///
/// ## Side Effects
/// Prints the usage and exits when `--help` is given.
pub fn parse<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let opts = opts();
    let matches = opts.parse(args)?;

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_BIN_NAME"))));
        process::exit(0);
    }

    let input = matches
        .opt_str("input")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Missing required option 'input'"))?;
    let mode = matches
        .opt_get_default("mode", Mode::Coordinates)
        .map_err(|err| anyhow!("Provided value for option 'mode' is invalid: {err}"))?;

    Ok(Args { input, mode })
}
