//! Line aggregation across nearby stations.
//!
//! One line lookup is issued per physical stop (deduplicated by normalized
//! name). Lookups run concurrently and are merged as each one settles, so
//! the caller sees the line list grow. The merged result is the same
//! whatever order the lookups complete in.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info};

use crate::domain::{Category, Line, OperatingWindow, Station};
use crate::engine::VisibilityDefaults;
use crate::provider::{GeoProvider, RawLine};
use crate::stations::dedupe;

use super::palette::ColorCursor;

/// Name fragments that mark a line as rail when the provider gave no hint.
const RAIL_NAME_TOKENS: &[&str] = &["地铁", "轨道", "轻轨", "号线", "metro", "subway"];

/// Category from the provider hint, or from the line name when absent.
pub fn infer_category(hint: Option<Category>, name: &str) -> Category {
    if let Some(category) = hint {
        return category;
    }
    let lower = name.to_lowercase();
    if RAIL_NAME_TOKENS.iter().any(|t| lower.contains(t)) {
        Category::Rail
    } else {
        Category::Surface
    }
}

/// Lines discovered during one cycle, keyed by provider line id.
///
/// Owns the colour cursor, so a fresh `LineMerge` is a full colour reset.
#[derive(Debug, Clone)]
pub struct LineMerge {
    lines: IndexMap<String, Line>,
    colors: ColorCursor,
    visibility: VisibilityDefaults,
}

impl LineMerge {
    pub fn new(visibility: VisibilityDefaults) -> Self {
        Self {
            lines: IndexMap::new(),
            colors: ColorCursor::new(),
            visibility,
        }
    }

    /// Merge the lines one station's lookup returned.
    ///
    /// New ids become new lines. Known ids only ever move their nearest
    /// station closer.
    pub fn absorb(&mut self, station: &Station, raw_lines: Vec<RawLine>) {
        for raw in raw_lines {
            match self.lines.entry(raw.id) {
                Entry::Occupied(mut slot) => {
                    let line = slot.get_mut();
                    if station.distance_m < line.nearest_distance_m {
                        line.nearest_distance_m = station.distance_m;
                        line.nearest_station_name = station.name.clone();
                    }
                }
                Entry::Vacant(slot) => {
                    let category = infer_category(raw.category_hint, &raw.name);
                    let line = Line {
                        id: slot.key().clone(),
                        name: raw.name,
                        category,
                        nearest_station_name: station.name.clone(),
                        nearest_distance_m: station.distance_m,
                        start_stop: raw.start_stop,
                        end_stop: raw.end_stop,
                        operating_window: OperatingWindow::placeholder(),
                        stops: Vec::new(),
                        path: Vec::new(),
                        color: self.colors.advance().to_string(),
                        visible: self.visibility.for_category(category),
                        hydrated: false,
                    };
                    slot.insert(line);
                }
            }
        }
    }

    /// All lines, rail first, then nearest first, then by id.
    pub fn ranked(&self) -> Vec<Line> {
        let mut lines: Vec<Line> = self.lines.values().cloned().collect();
        lines.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.nearest_distance_m.cmp(&b.nearest_distance_m))
                .then_with(|| a.id.cmp(&b.id))
        });
        lines
    }

    pub fn get(&self, id: &str) -> Option<&Line> {
        self.lines.get(id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Look up and merge the lines serving `stations`.
///
/// Calls `on_progress(lines, done)` once per settled lookup with the full
/// ranked list; `done` is true on the last call. Failed lookups count as
/// settled with nothing found. With no stations, `on_progress(&[], true)`
/// is called once before the first await.
///
/// A lookup that never settles keeps the future pending and `done` false.
pub async fn aggregate<P, F>(
    provider: &P,
    city: &str,
    stations: &[Station],
    merge: &mut LineMerge,
    mut on_progress: F,
) where
    P: GeoProvider,
    F: FnMut(&[Line], bool),
{
    let unique = dedupe(stations.iter().cloned());
    let total = unique.len();

    if total == 0 {
        on_progress(&[], true);
        return;
    }

    info!(stations = total, %city, "Looking up lines");

    let mut pending: FuturesUnordered<_> = unique
        .into_map()
        .into_iter()
        .map(|(keyword, station)| async move {
            let result = provider
                .search_lines_by_station(keyword.as_str(), city)
                .await;
            (station, result)
        })
        .collect();

    let mut settled = 0;
    while let Some((station, result)) = pending.next().await {
        settled += 1;
        match result {
            Ok(raw_lines) => {
                debug!(station = %station.name, count = raw_lines.len(), "Lines found");
                merge.absorb(&station, raw_lines);
            }
            Err(e) => debug!(station = %station.name, error = %e, "Line lookup failed"),
        }
        on_progress(&merge.ranked(), settled == total);
    }

    info!(lines = merge.len(), "Line lookup finished");
}
