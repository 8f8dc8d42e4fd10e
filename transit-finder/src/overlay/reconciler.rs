//! Overlay reconciliation.
//!
//! Overlays fall into three groups: the center marker, station markers and
//! route overlays (polyline plus stop dots). A group is redrawn only when
//! its input changed since the last call, and then it is cleared and drawn
//! again in full rather than patched. Calling [`OverlayReconciler::reconcile`]
//! twice with the same input therefore issues no calls the second time.

use indexmap::IndexMap;
use tracing::trace;

use crate::domain::{Line, Point, Station};

use super::style::{CENTER_MARKER, DotStyle, FIT_PADDING, RouteStyle, station_marker};
use super::surface::{Overlay, Surface};

/// Stable identity of a drawn overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum OverlayKey {
    Center,
    Station(String),
    Route(String),
    StopDot { line: String, sequence: u32 },
}

impl OverlayKey {
    fn group(&self) -> Group {
        match self {
            OverlayKey::Center => Group::Center,
            OverlayKey::Station(_) => Group::Stations,
            OverlayKey::Route(_) | OverlayKey::StopDot { .. } => Group::Routes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Center,
    Stations,
    Routes,
}

/// The parts of a line that affect how its route is drawn.
#[derive(Debug, Clone, PartialEq)]
struct RouteView {
    id: String,
    color: String,
    path: Vec<Point>,
    stops: Vec<(u32, Point)>,
}

impl RouteView {
    fn of(line: &Line) -> Self {
        Self {
            id: line.id.clone(),
            color: line.color.clone(),
            path: line.path.clone(),
            stops: line
                .stops
                .iter()
                .filter_map(|s| s.point.map(|p| (s.sequence_index, p)))
                .collect(),
        }
    }
}

/// What the reconciler should show.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileInput<'a> {
    pub center: Option<Point>,
    pub stations: &'a [Station],
    /// All lines; only visible, hydrated lines with a real path are drawn.
    pub lines: &'a [Line],
}

/// Calls issued by one reconcile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub drawn: usize,
    pub removed: usize,
    pub fitted: bool,
}

impl ReconcileReport {
    /// Whether the surface was touched at all.
    pub fn is_noop(&self) -> bool {
        self.drawn == 0 && self.removed == 0 && !self.fitted
    }
}

/// Keeps a surface in step with the current center, stations and lines.
pub struct OverlayReconciler<S: Surface> {
    drawn: IndexMap<OverlayKey, S::Handle>,
    last_center: Option<Option<Point>>,
    last_stations: Option<Vec<Station>>,
    last_routes: Option<Vec<RouteView>>,
}

impl<S: Surface> Default for OverlayReconciler<S> {
    fn default() -> Self {
        Self {
            drawn: IndexMap::new(),
            last_center: None,
            last_stations: None,
            last_routes: None,
        }
    }
}

impl<S: Surface> OverlayReconciler<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of overlays currently on the surface.
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    /// Bring `surface` in line with `input`.
    pub fn reconcile(&mut self, surface: &mut S, input: ReconcileInput<'_>) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        if self.last_center != Some(input.center) {
            report.removed += self.clear_group(surface, Group::Center);
            if let Some(point) = input.center {
                self.draw(
                    surface,
                    OverlayKey::Center,
                    &Overlay::Marker {
                        point,
                        style: CENTER_MARKER,
                        title: None,
                    },
                );
                report.drawn += 1;
            }
            self.last_center = Some(input.center);
        }

        if self.last_stations.as_deref() != Some(input.stations) {
            report.removed += self.clear_group(surface, Group::Stations);
            for station in input.stations {
                self.draw(
                    surface,
                    OverlayKey::Station(station.id.clone()),
                    &Overlay::Marker {
                        point: station.point,
                        style: station_marker(station.category),
                        title: Some(format!("{} ({}m)", station.name, station.distance_m)),
                    },
                );
                report.drawn += 1;
            }
            self.last_stations = Some(input.stations.to_vec());
        }

        let routes: Vec<RouteView> = input
            .lines
            .iter()
            .filter(|l| l.is_drawable())
            .map(RouteView::of)
            .collect();

        if self.last_routes.as_ref() != Some(&routes) {
            report.removed += self.clear_group(surface, Group::Routes);
            for route in &routes {
                report.drawn += self.draw_route(surface, route);
            }

            let handles: Vec<&S::Handle> = self
                .drawn
                .iter()
                .filter(|(key, _)| key.group() == Group::Routes)
                .map(|(_, handle)| handle)
                .collect();
            if !handles.is_empty() {
                surface.fit_view(&handles, FIT_PADDING);
                report.fitted = true;
            }
            self.last_routes = Some(routes);
        }

        trace!(?report, total = self.drawn.len(), "Reconciled overlays");
        report
    }

    /// Remove everything and forget what was drawn.
    pub fn clear(&mut self, surface: &mut S) -> usize {
        let removed = self.drawn.len();
        for (_, handle) in self.drawn.drain(..) {
            surface.remove(handle);
        }
        self.last_center = None;
        self.last_stations = None;
        self.last_routes = None;
        removed
    }

    fn draw(&mut self, surface: &mut S, key: OverlayKey, overlay: &Overlay) {
        let handle = surface.draw(overlay);
        if let Some(stale) = self.drawn.insert(key, handle) {
            surface.remove(stale);
        }
    }

    fn draw_route(&mut self, surface: &mut S, route: &RouteView) -> usize {
        self.draw(
            surface,
            OverlayKey::Route(route.id.clone()),
            &Overlay::Route {
                path: route.path.clone(),
                style: RouteStyle::for_color(&route.color),
            },
        );
        for &(sequence, point) in &route.stops {
            self.draw(
                surface,
                OverlayKey::StopDot {
                    line: route.id.clone(),
                    sequence,
                },
                &Overlay::StopDot {
                    point,
                    style: DotStyle::for_color(&route.color),
                },
            );
        }
        1 + route.stops.len()
    }

    fn clear_group(&mut self, surface: &mut S, group: Group) -> usize {
        let keys: Vec<OverlayKey> = self
            .drawn
            .keys()
            .filter(|key| key.group() == group)
            .cloned()
            .collect();
        for key in &keys {
            if let Some(handle) = self.drawn.shift_remove(key) {
                surface.remove(handle);
            }
        }
        keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, OperatingWindow, Stop};
    use crate::overlay::style::{MarkerShape, Padding};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Draw(u32, Overlay),
        Remove(u32),
        Fit(Vec<u32>, Padding),
    }

    #[derive(Default)]
    struct RecordingSurface {
        next: u32,
        calls: Vec<Call>,
        live: Vec<u32>,
    }

    impl RecordingSurface {
        fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl Surface for RecordingSurface {
        type Handle = u32;

        fn draw(&mut self, overlay: &Overlay) -> u32 {
            self.next += 1;
            self.calls.push(Call::Draw(self.next, overlay.clone()));
            self.live.push(self.next);
            self.next
        }

        fn remove(&mut self, handle: u32) {
            self.calls.push(Call::Remove(handle));
            self.live.retain(|h| *h != handle);
        }

        fn fit_view(&mut self, handles: &[&u32], padding: Padding) {
            self.calls
                .push(Call::Fit(handles.iter().map(|h| **h).collect(), padding));
        }
    }

    fn pt(lng: f64, lat: f64) -> Point {
        Point::new(lng, lat).unwrap()
    }

    fn station(id: &str, category: Category) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station {id}"),
            point: pt(120.16, 30.27),
            category,
            distance_m: 250,
        }
    }

    fn line(id: &str, visible: bool, hydrated: bool, path_len: usize) -> Line {
        let path: Vec<Point> = (0..path_len)
            .map(|i| pt(120.0 + i as f64 * 0.01, 30.0))
            .collect();
        Line {
            id: id.to_string(),
            name: format!("Line {id}"),
            category: Category::Rail,
            nearest_station_name: "A".to_string(),
            nearest_distance_m: 100,
            start_stop: String::new(),
            end_stop: String::new(),
            operating_window: OperatingWindow::placeholder(),
            stops: Stop::sequence(path.iter().map(|p| ("stop".to_string(), Some(*p)))),
            path,
            color: "#722ed1".to_string(),
            visible,
            hydrated,
        }
    }

    fn lines_only(lines: &[Line]) -> ReconcileInput<'_> {
        ReconcileInput {
            center: None,
            stations: &[],
            lines,
        }
    }

    fn count_draws(calls: &[Call]) -> usize {
        calls.iter().filter(|c| matches!(c, Call::Draw(..))).count()
    }

    #[test]
    fn second_identical_call_is_noop() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let stations = [station("a", Category::Rail), station("b", Category::Surface)];
        let lines = [line("L1", true, true, 3)];
        let input = ReconcileInput {
            center: Some(pt(120.15, 30.27)),
            stations: &stations,
            lines: &lines,
        };

        let first = reconciler.reconcile(&mut surface, input);
        assert_eq!(first.drawn, 1 + 2 + 1 + 3);
        assert!(first.fitted);
        let drawn_after_first = surface.live.clone();

        let second = reconciler.reconcile(&mut surface, input);
        assert!(second.is_noop());
        assert_eq!(surface.live, drawn_after_first);
        assert_eq!(reconciler.drawn_count(), 7);
    }

    #[test]
    fn no_center_draws_no_center_marker() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let report = reconciler.reconcile(
            &mut surface,
            ReconcileInput {
                center: None,
                stations: &[],
                lines: &[],
            },
        );
        assert!(report.is_noop());
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn center_change_replaces_marker() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let mut input = ReconcileInput {
            center: Some(pt(120.15, 30.27)),
            stations: &[],
            lines: &[],
        };
        reconciler.reconcile(&mut surface, input);
        surface.take();

        input.center = Some(pt(121.47, 31.23));
        reconciler.reconcile(&mut surface, input);

        let calls = surface.take();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Remove(1));
        match &calls[1] {
            Call::Draw(_, Overlay::Marker { point, style, .. }) => {
                assert_eq!(*point, pt(121.47, 31.23));
                assert_eq!(*style, CENTER_MARKER);
            }
            other => panic!("unexpected call {other:?}"),
        }
        assert_eq!(surface.live.len(), 1);
    }

    #[test]
    fn station_change_replaces_all_markers() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let before = [station("a", Category::Rail), station("b", Category::Surface)];
        let after = [station("c", Category::Surface)];

        reconciler.reconcile(
            &mut surface,
            ReconcileInput {
                center: None,
                stations: &before,
                lines: &[],
            },
        );
        surface.take();

        let report = reconciler.reconcile(
            &mut surface,
            ReconcileInput {
                center: None,
                stations: &after,
                lines: &[],
            },
        );

        assert_eq!(report.removed, 2);
        assert_eq!(report.drawn, 1);
        match &surface.take()[2] {
            Call::Draw(_, Overlay::Marker { style, title, .. }) => {
                assert_eq!(style.shape, MarkerShape::RoundedSquare);
                assert_eq!(title.as_deref(), Some("Station c (250m)"));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn only_drawable_lines_become_routes() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let lines = [
            line("shown", true, true, 2),
            line("hidden", false, true, 4),
            line("loading", true, false, 0),
            line("single-point", true, true, 1),
        ];

        let report = reconciler.reconcile(
            &mut surface,
            ReconcileInput {
                center: None,
                stations: &[],
                lines: &lines,
            },
        );

        let calls = surface.take();
        assert_eq!(count_draws(&calls), 3);
        assert_eq!(report.drawn, 3);
        assert!(matches!(&calls[0], Call::Draw(_, Overlay::Route { path, .. }) if path.len() == 2));
        match calls.last() {
            Some(Call::Fit(handles, padding)) => {
                assert_eq!(handles, &vec![1, 2, 3]);
                assert_eq!(padding.left, 400);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn hydration_redraws_routes_only() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let stations = [station("a", Category::Rail)];
        let mut lines = vec![line("L1", true, false, 0)];

        reconciler.reconcile(
            &mut surface,
            ReconcileInput {
                center: Some(pt(120.15, 30.27)),
                stations: &stations,
                lines: &lines,
            },
        );
        surface.take();

        lines[0] = line("L1", true, true, 3);
        let report = reconciler.reconcile(
            &mut surface,
            ReconcileInput {
                center: Some(pt(120.15, 30.27)),
                stations: &stations,
                lines: &lines,
            },
        );

        assert_eq!(report.removed, 0);
        assert_eq!(report.drawn, 4);
        assert!(report.fitted);
    }

    #[test]
    fn hiding_last_route_removes_without_fit() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let mut lines = vec![line("L1", true, true, 2)];

        reconciler.reconcile(&mut surface, lines_only(&lines));
        surface.take();

        lines[0].visible = false;
        let report = reconciler.reconcile(&mut surface, lines_only(&lines));

        assert_eq!(report.removed, 3);
        assert!(!report.fitted);
        assert!(surface.live.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let mut surface = RecordingSurface::default();
        let mut reconciler = OverlayReconciler::new();
        let stations = [station("a", Category::Rail)];
        let input = ReconcileInput {
            center: Some(pt(120.15, 30.27)),
            stations: &stations,
            lines: &[],
        };
        reconciler.reconcile(&mut surface, input);

        assert_eq!(reconciler.clear(&mut surface), 2);
        assert!(surface.live.is_empty());

        // Everything is drawn again after a clear.
        let report = reconciler.reconcile(&mut surface, input);
        assert_eq!(report.drawn, 2);
    }
}
