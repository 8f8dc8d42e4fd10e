//! Discovery cycle orchestration.
//!
//! A [`Session`] owns one user's view-state: the search center, the
//! deduplicated stations around it, and the lines serving them. Each
//! [`Session::search`] starts a new cycle and discards the previous one.
//!
//! Cycles are not cancelled when a new search starts. Instead every cycle
//! carries a generation number, and results from an older generation are
//! dropped when they arrive. The state lock is only taken between awaits.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::domain::{Line, Point, Station};
use crate::lines::{LineMerge, aggregate, hydrate};
use crate::provider::GeoProvider;
use crate::stations::{dedupe, discover};

use super::config::EngineConfig;
use super::error::EngineError;

/// Snapshot of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Increases with every search or reset.
    pub generation: u64,
    pub center: Option<Point>,
    /// Deduplicated, nearest first.
    pub stations: Vec<Station>,
    /// Rail first, then by nearest station distance.
    pub lines: Vec<Line>,
    /// True once every line lookup of this cycle has settled.
    pub lines_done: bool,
}

impl ViewState {
    /// Take a progress report from the aggregator.
    ///
    /// Lines already shown keep their visibility and hydration; only the
    /// nearest-station fields are taken from the report.
    fn apply_progress(&mut self, ranked: &[Line], done: bool) {
        let mut previous: HashMap<String, Line> =
            self.lines.drain(..).map(|l| (l.id.clone(), l)).collect();

        self.lines = ranked
            .iter()
            .map(|line| match previous.remove(&line.id) {
                Some(mut kept) => {
                    kept.nearest_station_name = line.nearest_station_name.clone();
                    kept.nearest_distance_m = line.nearest_distance_m;
                    kept
                }
                None => line.clone(),
            })
            .collect();
        self.lines_done = done;
    }
}

#[derive(Debug, Default)]
struct CycleState {
    view: ViewState,
    /// Line ids with a detail lookup in flight.
    hydrating: HashSet<String>,
}

/// One user's transit search state.
pub struct Session<P> {
    provider: Arc<P>,
    config: EngineConfig,
    state: Mutex<CycleState>,
}

impl<P: GeoProvider> Session<P> {
    pub fn new(provider: Arc<P>, config: EngineConfig) -> Self {
        Self {
            provider,
            config,
            state: Mutex::new(CycleState::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current state.
    pub fn snapshot(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Discard everything and start an empty cycle.
    pub fn reset(&self) -> u64 {
        let mut state = self.lock();
        let generation = state.view.generation + 1;
        *state = CycleState {
            view: ViewState {
                generation,
                ..ViewState::default()
            },
            hydrating: HashSet::new(),
        };
        generation
    }

    /// Run a full discovery cycle for `address`.
    ///
    /// Returns the final state, or [`EngineError::Superseded`] if another
    /// search started before this one finished. If a line lookup never
    /// settles this future never resolves; progress so far is visible
    /// through [`Session::snapshot`].
    pub async fn search(&self, address: &str) -> Result<ViewState, EngineError> {
        let generation = self.reset();
        let city = self.config.city.as_str();
        info!(%address, %city, generation, "Starting search");

        let center = match self.provider.geocode(address, city).await {
            Ok(Some(point)) => point,
            Ok(None) => {
                return Err(EngineError::AddressNotFound {
                    address: address.to_string(),
                });
            }
            Err(e) if e.is_unavailable() => {
                return Err(EngineError::ProviderUnavailable(e.to_string()));
            }
            Err(e) => {
                debug!(%address, error = %e, "Geocode failed");
                return Err(EngineError::AddressNotFound {
                    address: address.to_string(),
                });
            }
        };
        self.update(generation, |view| view.center = Some(center))?;

        let raw = discover(&*self.provider, center, self.config.radius.meters(), city).await;
        let stations = dedupe(raw).ranked();
        info!(stations = stations.len(), generation, "Stations discovered");
        self.update(generation, |view| view.stations = stations.clone())?;

        let mut merge = LineMerge::new(self.config.visibility);
        aggregate(&*self.provider, city, &stations, &mut merge, |lines, done| {
            if self
                .update(generation, |view| view.apply_progress(lines, done))
                .is_err()
            {
                debug!(generation, "Dropping progress from superseded search");
            }
        })
        .await;

        let state = self.lock();
        if state.view.generation == generation {
            Ok(state.view.clone())
        } else {
            Err(EngineError::Superseded)
        }
    }

    /// Flip a line's visibility.
    ///
    /// The first time an unhydrated line becomes visible its detail is
    /// fetched and merged in. Returns the line as it stands afterwards.
    pub async fn toggle_line(&self, line_id: &str) -> Result<Line, EngineError> {
        let (generation, line, fetch) = {
            let mut guard = self.lock();
            let state = &mut *guard;
            let line = state
                .view
                .lines
                .iter_mut()
                .find(|l| l.id == line_id)
                .ok_or_else(|| EngineError::UnknownLine(line_id.to_string()))?;

            line.visible = !line.visible;
            let fetch =
                line.visible && !line.hydrated && state.hydrating.insert(line_id.to_string());
            (state.view.generation, line.clone(), fetch)
        };

        if !fetch {
            return Ok(line);
        }

        debug!(line = %line_id, generation, "Hydrating line");
        let patch = hydrate(&*self.provider, line_id, &self.config.city).await;

        let mut guard = self.lock();
        let state = &mut *guard;
        if state.view.generation != generation {
            return Err(EngineError::Superseded);
        }
        state.hydrating.remove(line_id);
        let line = state
            .view
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| EngineError::UnknownLine(line_id.to_string()))?;
        line.apply(patch);
        Ok(line.clone())
    }

    /// Apply `f` to the view if `generation` is still current.
    fn update<F>(&self, generation: u64, f: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut ViewState),
    {
        let mut state = self.lock();
        if state.view.generation != generation {
            return Err(EngineError::Superseded);
        }
        f(&mut state.view);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, CycleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
