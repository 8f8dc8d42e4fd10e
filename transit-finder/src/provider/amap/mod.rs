//! AMap (高德地图) web service provider.
//!
//! Implements [`GeoProvider`](super::GeoProvider) over the AMap v3 REST API.
//!
//! Key characteristics of AMap:
//! - Every response carries a `status`/`infocode` envelope; HTTP 200 does
//!   not mean success
//! - Coordinates are GCJ-02 `"lng,lat"` strings
//! - Empty optional fields are sent as `[]` rather than omitted
//! - Line schedules arrive as a URL-encoded JSON blob (`timedesc`)

mod client;
mod convert;
mod types;

pub use client::{AmapClient, AmapConfig};
pub use convert::{category_hint, parse_polyline};
