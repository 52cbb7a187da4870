//! Counts distinct and single-occurrence values in a file of line-separated
//! decimal integers over the full `u32` domain.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use cardinality_counter::{reader, CardinalityCounter};
use tracing::{error, info, Level};
use tracing_subscriber::fmt;

fn init_logging() {
    fmt()
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_max_level(Level::INFO)
        .init();
}

fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    // ~1 GiB of bitmaps for the full u32 domain
    let mut counter = CardinalityCounter::full()?;
    info!(path, "counting distinct values");

    let file = File::open(path)?;
    let observed = reader::count_lines(BufReader::new(file), &mut counter)?;
    info!(observed, "stream complete");

    let counts = counter.finalize();
    println!("Distinct numbers: {}", counts.distinct);
    println!("Unique numbers (occur once): {}", counts.unique);

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "count-distinct".into());
    let Some(path) = args.next() else {
        eprintln!("Usage: {program} <file>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
