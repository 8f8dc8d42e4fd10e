//! Station and transit category types.

use std::fmt;

use super::Point;

/// Kind of transit a station or line belongs to.
///
/// Ordering puts `Rail` before `Surface`, which is the ranking order
/// used for line lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Subway, metro and other rail services.
    Rail,
    /// Buses and other street-level services.
    Surface,
}

impl Category {
    /// Both categories, in ranking order.
    pub const ALL: [Category; 2] = [Category::Rail, Category::Surface];

    /// Stable lowercase name (`"rail"` / `"surface"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rail => "rail",
            Category::Surface => "surface",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station discovered near a search center.
///
/// `id` is provider-assigned and unique within one search, but separate
/// exits of the same stop carry different ids, so it is not a grouping key.
/// `distance_m` is measured from the search center once at discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub point: Point,
    pub category: Category,
    pub distance_m: u32,
}

impl Station {
    /// Create a station, measuring its distance from `center`.
    pub fn discovered(
        id: impl Into<String>,
        name: impl Into<String>,
        point: Point,
        category: Category,
        center: &Point,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            point,
            category,
            distance_m: center.rounded_distance_m(&point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rail_ranks_before_surface() {
        assert!(Category::Rail < Category::Surface);
        assert_eq!(Category::ALL, [Category::Rail, Category::Surface]);
    }

    #[test]
    fn category_display() {
        assert_eq!(Category::Rail.to_string(), "rail");
        assert_eq!(Category::Surface.to_string(), "surface");
    }

    #[test]
    fn discovered_measures_distance() {
        let center = Point::new(120.0, 30.0).unwrap();
        let point = Point::new(120.0, 30.001).unwrap();
        let station = Station::discovered("B001", "Wulin Square", point, Category::Rail, &center);
        assert_eq!(station.distance_m, 111);
        assert_eq!(station.category, Category::Rail);
    }
}
