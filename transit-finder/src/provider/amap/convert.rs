//! Conversion from AMap response types to provider types.

use tracing::debug;

use crate::domain::{Category, InvalidPoint, Point};
use crate::provider::{LineDetail, Poi, RawLine, RawStop};

use super::types::{BusLineDto, PoiDto};

/// Line type words that mark a rail line.
const RAIL_TYPE_WORDS: &[&str] = &["地铁", "轻轨", "磁悬浮", "有轨电车", "轨道"];

/// Line type word that marks a surface line.
const SURFACE_TYPE_WORD: &str = "公交";

/// Why a POI could not be used.
#[derive(Debug, thiserror::Error)]
pub enum PoiRejected {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error(transparent)]
    Location(#[from] InvalidPoint),
}

/// Convert a POI, rejecting it if a field is absent or its location does
/// not parse.
pub fn convert_poi(dto: PoiDto) -> Result<Poi, PoiRejected> {
    let location = dto.location.ok_or(PoiRejected::Missing("location"))?;
    let point = Point::parse_lng_lat(&location)?;
    Ok(Poi {
        id: dto.id.ok_or(PoiRejected::Missing("id"))?,
        name: dto.name.ok_or(PoiRejected::Missing("name"))?,
        point,
    })
}

/// Convert POIs, dropping any that are incomplete.
pub fn convert_pois(dtos: Vec<PoiDto>) -> Vec<Poi> {
    dtos.into_iter()
        .filter_map(|dto| {
            let id = dto.id.clone().unwrap_or_default();
            convert_poi(dto)
                .map_err(|e| debug!(poi = %id, error = %e, "Skipping unusable POI"))
                .ok()
        })
        .collect()
}

/// Map AMap's line type text to a category, if recognisable.
pub fn category_hint(line_type: Option<&str>) -> Option<Category> {
    let line_type = line_type?;
    if RAIL_TYPE_WORDS.iter().any(|w| line_type.contains(w)) {
        Some(Category::Rail)
    } else if line_type.contains(SURFACE_TYPE_WORD) {
        Some(Category::Surface)
    } else {
        None
    }
}

/// Convert a line from a name search.
pub fn convert_raw_line(dto: BusLineDto) -> RawLine {
    RawLine {
        category_hint: category_hint(dto.line_type.as_deref()),
        id: dto.id,
        name: dto.name,
        start_stop: dto.start_stop.unwrap_or_default(),
        end_stop: dto.end_stop.unwrap_or_default(),
    }
}

/// Parse a `"lng,lat;lng,lat;..."` polyline, skipping malformed vertices.
pub fn parse_polyline(polyline: &str) -> Vec<Point> {
    polyline
        .split(';')
        .filter(|pair| !pair.trim().is_empty())
        .filter_map(|pair| Point::parse_lng_lat(pair).ok())
        .collect()
}

/// Convert a line from an id lookup into detail data.
pub fn convert_line_detail(dto: BusLineDto) -> LineDetail {
    let path = dto
        .polyline
        .as_deref()
        .map(parse_polyline)
        .unwrap_or_default();

    let stops = dto
        .busstops
        .into_iter()
        .map(|stop| RawStop {
            point: stop
                .location
                .as_deref()
                .and_then(|loc| Point::parse_lng_lat(loc).ok()),
            name: stop.name.unwrap_or_default(),
        })
        .collect();

    LineDetail {
        path,
        stops,
        schedule_blob: dto.timedesc,
    }
}
