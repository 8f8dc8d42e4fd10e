//! Errors surfaced to users of the engine.

/// Error from a discovery cycle or line operation.
///
/// Per-lookup failures inside the fan-out and unparseable schedules never
/// show up here; they degrade to empty or placeholder data instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Geocoding found nothing
    #[error("no location found for \"{address}\"; try a more specific address")]
    AddressNotFound { address: String },

    /// The provider could not be reached or is not configured
    #[error("transit data provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// No line with this id in the current cycle
    #[error("unknown line: {0}")]
    UnknownLine(String),

    /// A newer search started while this one was running
    #[error("superseded by a newer search")]
    Superseded,

    /// Radius outside 500..=2000 or not a multiple of 100
    #[error("invalid search radius {0}m: must be 500-2000 in steps of 100")]
    InvalidRadius(u32),
}
