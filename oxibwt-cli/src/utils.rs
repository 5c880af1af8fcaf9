//! Utility functions for the CLI.

use log::LevelFilter;
use oxibwt_core::Direction;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Parse a filter direction: `-` or `forward`, `+` or `inverse`.
pub fn parse_direction(value: &str) -> Result<Direction, String> {
    Direction::from_symbol(value)
        .or(match value {
            "forward" | "encode" => Some(Direction::Forward),
            "inverse" | "decode" => Some(Direction::Inverse),
            _ => None,
        })
        .ok_or_else(|| format!("expected '-' (forward) or '+' (inverse), got '{}'", value))
}

/// Log level for the given `-v` count; `-q` silences everything.
pub fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the terminal logger. Logs go to stderr because stdout carries data.
pub fn init_logging(verbose: u8, quiet: bool) {
    if let Err(e) = TermLogger::init(
        log_level(verbose, quiet),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logger already initialised: {}", e);
    }
}

/// Open a file for reading, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}

/// Create a file for writing, or use stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Read the whole input into memory.
pub fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    open_input(path)?.read_to_end(&mut data)?;
    Ok(data)
}

/// Human-readable description of where data comes from or goes to.
pub fn describe(path: Option<&Path>, stream: &str) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => format!("<{}>", stream),
    }
}
