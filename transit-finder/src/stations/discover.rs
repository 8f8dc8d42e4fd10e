//! Nearby station discovery.

use tracing::{debug, warn};

use crate::domain::{Category, Point, Station};
use crate::provider::GeoProvider;

/// Search both station categories around `center`.
///
/// The two searches run concurrently and both are awaited before anything
/// is returned. A failed category is logged and contributes nothing.
/// Results are raw (not deduplicated), nearest first.
pub async fn discover<P: GeoProvider>(
    provider: &P,
    center: Point,
    radius_m: u32,
    city: &str,
) -> Vec<Station> {
    let (rail, surface) = tokio::join!(
        provider.search_nearby(center, radius_m, Category::Rail, city),
        provider.search_nearby(center, radius_m, Category::Surface, city),
    );

    let mut stations = Vec::new();
    for (category, result) in [(Category::Rail, rail), (Category::Surface, surface)] {
        match result {
            Ok(pois) => {
                debug!(%category, count = pois.len(), "Nearby search returned");
                stations.extend(
                    pois.into_iter()
                        .map(|p| Station::discovered(p.id, p.name, p.point, category, &center)),
                );
            }
            Err(e) => warn!(%category, error = %e, "Nearby search failed"),
        }
    }

    stations.sort_by(|a, b| a.distance_m.cmp(&b.distance_m).then_with(|| a.id.cmp(&b.id)));
    stations
}
