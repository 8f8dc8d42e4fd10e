//! Station discovery and deduplication.
//!
//! Providers return one POI per exit and per category, so a single stop
//! near the search center usually shows up several times. Stations are
//! grouped by a normalized name and only the nearest record of each group
//! is kept.

mod dedupe;
mod discover;
mod normalize;

pub use dedupe::{StationSet, dedupe};
pub use discover::discover;
pub use normalize::{NormalizedKey, normalize};
