//! Geodata provider capability.
//!
//! The engine never talks to a map SDK directly. Everything it needs from
//! the outside world goes through [`GeoProvider`], which is constructed
//! explicitly and passed down. This keeps the engine testable with a fake
//! provider and lets the concrete AMap client be swapped out.
//!
//! Key characteristics of providers:
//! - Every call is asynchronous and may fail or come back empty
//! - Calls have no ordering guarantee relative to each other
//! - The `city` scope is passed explicitly on every call; there is no
//!   default city

pub mod amap;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use amap::{AmapClient, AmapConfig};
pub use error::ProviderError;
pub use types::{LineDetail, Poi, RawLine, RawStop};

use crate::domain::{Category, Point};

/// Trait for looking up places, stations and lines.
///
/// This abstraction allows the engine to be tested with mock data.
pub trait GeoProvider: Send + Sync {
    /// Resolve an address to a point. `Ok(None)` if nothing matched.
    fn geocode(
        &self,
        address: &str,
        city: &str,
    ) -> impl Future<Output = Result<Option<Point>, ProviderError>> + Send;

    /// Find stations of one category within `radius_m` of `center`.
    fn search_nearby(
        &self,
        center: Point,
        radius_m: u32,
        category: Category,
        city: &str,
    ) -> impl Future<Output = Result<Vec<Poi>, ProviderError>> + Send;

    /// Find lines serving a station, by station name.
    fn search_lines_by_station(
        &self,
        keyword: &str,
        city: &str,
    ) -> impl Future<Output = Result<Vec<RawLine>, ProviderError>> + Send;

    /// Fetch geometry and schedule for one line. `Ok(None)` if unknown.
    fn line_detail(
        &self,
        line_id: &str,
        city: &str,
    ) -> impl Future<Output = Result<Option<LineDetail>, ProviderError>> + Send;
}
