//! Geographic point type.

use std::fmt;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Error returned when constructing a point from invalid coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid point: {reason}")]
pub struct InvalidPoint {
    reason: &'static str,
}

/// A WGS84 position as (longitude, latitude) in degrees.
///
/// Both coordinates are finite and within range. This type guarantees
/// that any `Point` value is valid by construction.
///
/// # Examples
///
/// ```
/// use transit_finder::domain::Point;
///
/// let p = Point::new(120.15, 30.28).unwrap();
/// assert_eq!(p.lng(), 120.15);
///
/// assert!(Point::new(f64::NAN, 30.0).is_err());
/// assert!(Point::new(120.0, 91.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Point {
    lng: f64,
    lat: f64,
}

impl Point {
    /// Create a point from longitude and latitude.
    pub fn new(lng: f64, lat: f64) -> Result<Self, InvalidPoint> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(InvalidPoint {
                reason: "coordinates must be finite",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidPoint {
                reason: "longitude must be within [-180, 180]",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidPoint {
                reason: "latitude must be within [-90, 90]",
            });
        }
        Ok(Self { lng, lat })
    }

    /// Parse a `"lng,lat"` pair, the encoding most map providers use.
    pub fn parse_lng_lat(s: &str) -> Result<Self, InvalidPoint> {
        let (lng, lat) = s.split_once(',').ok_or(InvalidPoint {
            reason: "expected \"lng,lat\"",
        })?;
        let lng = lng.trim().parse::<f64>().map_err(|_| InvalidPoint {
            reason: "longitude is not a number",
        })?;
        let lat = lat.trim().parse::<f64>().map_err(|_| InvalidPoint {
            reason: "latitude is not a number",
        })?;
        Self::new(lng, lat)
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Great-circle distance to `other` in metres (haversine).
    pub fn distance_m(&self, other: &Point) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Distance to `other` rounded to whole metres.
    pub fn rounded_distance_m(&self, other: &Point) -> u32 {
        self.distance_m(other).round() as u32
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.lng, self.lat)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Point::new(181.0, 0.0).is_err());
        assert!(Point::new(0.0, -90.5).is_err());
        assert!(Point::new(-180.0, 90.0).is_ok());
    }

    #[test]
    fn parse_lng_lat_pair() {
        let p = Point::parse_lng_lat("120.153576,30.287459").unwrap();
        assert_eq!(p.lng(), 120.153576);
        assert_eq!(p.lat(), 30.287459);

        assert!(Point::parse_lng_lat("120.15").is_err());
        assert!(Point::parse_lng_lat("abc,30").is_err());
        assert!(Point::parse_lng_lat("").is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let p = Point::new(116.397428, 39.90923).unwrap();
        assert_eq!(Point::parse_lng_lat(&p.to_string()).unwrap(), p);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Point::new(116.397428, 39.90923).unwrap();
        assert_eq!(p.distance_m(&p), 0.0);
    }

    #[test]
    fn distance_one_degree_latitude() {
        // One degree of latitude is roughly 111.2 km everywhere.
        let a = Point::new(120.0, 30.0).unwrap();
        let b = Point::new(120.0, 31.0).unwrap();
        let d = a.distance_m(&b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(120.15, 30.28).unwrap();
        let b = Point::new(120.16, 30.27).unwrap();
        assert_eq!(a.rounded_distance_m(&b), b.rounded_distance_m(&a));
    }
}
