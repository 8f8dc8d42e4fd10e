//! Station deduplication.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::domain::Station;

use super::normalize::{NormalizedKey, normalize};

/// Stations grouped by normalized name, nearest record kept per group.
///
/// Built as a fold, so it gives the same result whether stations arrive in
/// one batch or across several result pages, provided all are folded in.
/// Iteration order is the order keys were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSet {
    by_key: IndexMap<NormalizedKey, Station>,
}

impl StationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one station in.
    ///
    /// An existing entry is replaced only by a strictly nearer station.
    pub fn insert(&mut self, station: Station) {
        match self.by_key.entry(normalize(&station.name)) {
            Entry::Vacant(slot) => {
                slot.insert(station);
            }
            Entry::Occupied(mut slot) => {
                if station.distance_m < slot.get().distance_m {
                    slot.insert(station);
                }
            }
        }
    }

    /// Representative station for a key.
    pub fn get(&self, key: &NormalizedKey) -> Option<&Station> {
        self.by_key.get(key)
    }

    /// Number of distinct stops.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterate over `(key, station)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedKey, &Station)> {
        self.by_key.iter()
    }

    /// Representatives sorted nearest first, ties broken by id.
    pub fn ranked(&self) -> Vec<Station> {
        let mut stations: Vec<Station> = self.by_key.values().cloned().collect();
        stations.sort_by(|a, b| a.distance_m.cmp(&b.distance_m).then_with(|| a.id.cmp(&b.id)));
        stations
    }

    /// The underlying key → station mapping.
    pub fn into_map(self) -> IndexMap<NormalizedKey, Station> {
        self.by_key
    }
}

impl Extend<Station> for StationSet {
    fn extend<I: IntoIterator<Item = Station>>(&mut self, iter: I) {
        for station in iter {
            self.insert(station);
        }
    }
}

impl FromIterator<Station> for StationSet {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        let mut set = StationSet::new();
        set.extend(iter);
        set
    }
}

/// Collapse stations that are the same physical stop.
pub fn dedupe(stations: impl IntoIterator<Item = Station>) -> StationSet {
    stations.into_iter().collect()
}
