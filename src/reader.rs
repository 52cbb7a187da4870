//! Line-oriented ingestion: the counter's input collaborator.
//!
//! Parses one decimal integer per line, trims surrounding whitespace and feeds
//! the values into a [`CardinalityCounter`]. Malformed lines surface as an
//! explicit parse error carrying the offending line number rather than being
//! silently dropped.
//!
//! Also provides a parallel batch counter that shards an in-memory slice across
//! rayon workers, one counter pair per shard, and combines the shards with
//! [`CardinalityCounter::merge`].

use std::io::BufRead;
use std::num::ParseIntError;

use rayon::prelude::*;
use thiserror::Error;

use crate::counter::{CardinalityCounter, Counts};
use crate::error::CounterError;

/// Errors produced while streaming values from a text source.
#[derive(Error, Debug)]
pub enum ReadError {
    /// Reading from the underlying source failed.
    #[error("i/o error reading input")]
    Io(#[from] std::io::Error),

    /// A line failed to parse as a decimal `u32`.
    #[error("line {line_no}: invalid integer")]
    Parse {
        line_no: u64,
        #[source]
        source: ParseIntError,
    },

    /// The counter rejected a parsed value.
    #[error("line {line_no}: {source}")]
    Count {
        line_no: u64,
        #[source]
        source: CounterError,
    },
}

/// Stream `reader` line by line into `counter` and return the number of values
/// observed.
///
/// Each line is whitespace-trimmed before parsing; blank lines are skipped. A
/// line that fails to parse, or a parsed value outside the counter's domain,
/// aborts the stream with the offending line number. Abort-on-bad-input is this
/// adapter's policy; callers wanting to skip bad lines can drive
/// [`CardinalityCounter::observe`] themselves.
pub fn count_lines<R: BufRead>(
    reader: R,
    counter: &mut CardinalityCounter,
) -> Result<u64, ReadError> {
    let mut observed = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = (idx + 1) as u64;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|source| ReadError::Parse { line_no, source })?;
        counter
            .observe(value)
            .map_err(|source| ReadError::Count { line_no, source })?;
        observed += 1;
    }
    Ok(observed)
}

/// Count an in-memory batch of values in parallel.
///
/// The slice is split into chunks of `chunk_len` values; each rayon task counts
/// its chunk into a private counter pair and the per-chunk counters are folded
/// together with [`CardinalityCounter::merge`]. Summing per-chunk counts
/// instead would be wrong: a value seen once in two different chunks has been
/// seen twice globally.
pub fn count_values_parallel(
    values: &[u32],
    domain_size: u64,
    chunk_len: usize,
) -> Result<Counts, CounterError> {
    let merged = values
        .par_chunks(chunk_len.max(1))
        .map(|chunk| {
            let mut counter = CardinalityCounter::with_domain(domain_size)?;
            for &value in chunk {
                counter.observe(value)?;
            }
            Ok(counter)
        })
        .try_reduce_with(|mut lhs, rhs| {
            lhs.merge(&rhs)?;
            Ok(lhs)
        });

    match merged {
        Some(counter) => Ok(counter?.finalize()),
        None => Ok(Counts::default()),
    }
}
