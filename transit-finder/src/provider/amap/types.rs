//! AMap v3 REST API response types.
//!
//! These types map directly to the JSON returned by the AMap web service.
//! AMap encodes every scalar as a string, and encodes absent optional
//! strings as `[]`, so optional text fields go through [`lenient_string`].

use serde::{Deserialize, Deserializer};

/// Status fields present on every AMap response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// `"1"` on success, `"0"` on failure.
    pub status: String,

    /// Human-readable status, e.g. `"OK"` or `"INVALID_USER_KEY"`.
    #[serde(default)]
    pub info: String,

    /// Numeric status code as a string, e.g. `"10000"`.
    #[serde(default)]
    pub infocode: String,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }
}

/// Response types that carry an [`Envelope`].
pub trait HasEnvelope {
    fn envelope(&self) -> &Envelope;
}

/// Response from `/geocode/geo`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(flatten)]
    pub envelope: Envelope,

    #[serde(default)]
    pub geocodes: Vec<GeocodeDto>,
}

/// One geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeDto {
    /// `"lng,lat"`
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
}

/// Response from `/place/around`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceAroundResponse {
    #[serde(flatten)]
    pub envelope: Envelope,

    #[serde(default)]
    pub pois: Vec<PoiDto>,
}

/// A point of interest.
#[derive(Debug, Clone, Deserialize)]
///
/// Every field is lenient so one malformed POI cannot fail the whole page;
/// [`super::convert::convert_pois`] drops incomplete ones.
pub struct PoiDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// `"lng,lat"`
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
}

/// Response from `/bus/linename` and `/bus/lineid`.
#[derive(Debug, Clone, Deserialize)]
pub struct BusLineResponse {
    #[serde(flatten)]
    pub envelope: Envelope,

    #[serde(default)]
    pub buslines: Vec<BusLineDto>,
}

/// A bus or rail line.
///
/// `polyline`, `busstops` and `timedesc` are only populated with
/// `extensions=all`.
#[derive(Debug, Clone, Deserialize)]
pub struct BusLineDto {
    pub id: String,

    pub name: String,

    /// Line type text, e.g. `"地铁"` or `"普通公交"`.
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub line_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub start_stop: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub end_stop: Option<String>,

    /// `"lng,lat;lng,lat;..."`
    #[serde(default, deserialize_with = "lenient_string")]
    pub polyline: Option<String>,

    #[serde(default)]
    pub busstops: Vec<BusStopDto>,

    /// URL-encoded JSON schedule description.
    #[serde(default, deserialize_with = "lenient_string")]
    pub timedesc: Option<String>,
}

/// A stop on a line.
#[derive(Debug, Clone, Deserialize)]
pub struct BusStopDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// `"lng,lat"`
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
}

impl HasEnvelope for GeocodeResponse {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl HasEnvelope for PlaceAroundResponse {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl HasEnvelope for BusLineResponse {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

/// Accept a non-empty string; treat anything else (`[]`, `null`, `""`) as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}
