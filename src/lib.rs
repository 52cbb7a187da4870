//! `cardinality-counter` is a Rust crate for exact distinct-value and single-occurrence counting
//! over large streams of `u32` values in a fixed amount of memory.
//!
//! Instead of a hash-based frequency table whose footprint grows with the number of distinct
//! values, the counter keeps two bitmaps addressable over the whole value domain and encodes a
//! three-state saturating occurrence count (never seen, seen once, seen two or more times) per
//! value. Updates are O(1) and memory use is fixed at construction regardless of cardinality;
//! the full 32-bit domain costs ~1 GiB for the two bitmaps.
mod bitmap;
pub mod counter;
mod error;
pub mod reader;

pub use counter::{CardinalityCounter, Counts, FULL_DOMAIN};
pub use error::CounterError;
pub use reader::ReadError;
