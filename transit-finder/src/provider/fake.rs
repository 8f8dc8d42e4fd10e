//! Scripted in-memory provider for tests.
//!
//! Each lookup can be given a delay, a failure, or a hang, so tests can
//! force any completion order under tokio's paused clock.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::{Category, Point};

use super::{GeoProvider, LineDetail, Poi, ProviderError, RawLine, RawStop};

enum Outcome<T> {
    Ready(T),
    Fail,
    Hang,
}

struct Scripted<T> {
    outcome: Outcome<T>,
    delay: Duration,
}

impl<T: Clone> Scripted<T> {
    async fn resolve(&self) -> Result<T, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.outcome {
            Outcome::Ready(value) => Ok(value.clone()),
            Outcome::Fail => Err(ProviderError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            }),
            Outcome::Hang => std::future::pending().await,
        }
    }
}

/// Fake provider serving scripted responses.
#[derive(Default)]
pub(crate) struct FakeProvider {
    geocodes: HashMap<String, Point>,
    nearby: HashMap<Category, Scripted<Vec<Poi>>>,
    lines: HashMap<String, Scripted<Vec<RawLine>>>,
    details: HashMap<String, Scripted<LineDetail>>,
    unavailable: bool,
    line_lookups: AtomicUsize,
    detail_lookups: AtomicUsize,
    keywords: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `Unauthorized`.
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_geocode(mut self, address: &str, point: Point) -> Self {
        self.geocodes.insert(address.to_string(), point);
        self
    }

    pub(crate) fn with_nearby(mut self, category: Category, pois: Vec<Poi>, delay_ms: u64) -> Self {
        self.nearby.insert(category, ready(pois, delay_ms));
        self
    }

    pub(crate) fn with_failing_nearby(mut self, category: Category) -> Self {
        self.nearby.insert(category, failing(0));
        self
    }

    pub(crate) fn with_lines(mut self, keyword: &str, lines: Vec<RawLine>, delay_ms: u64) -> Self {
        self.lines.insert(keyword.to_string(), ready(lines, delay_ms));
        self
    }

    pub(crate) fn with_failing_lines(mut self, keyword: &str, delay_ms: u64) -> Self {
        self.lines.insert(keyword.to_string(), failing(delay_ms));
        self
    }

    pub(crate) fn with_hanging_lines(mut self, keyword: &str) -> Self {
        self.lines.insert(
            keyword.to_string(),
            Scripted {
                outcome: Outcome::Hang,
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub(crate) fn with_detail(mut self, line_id: &str, detail: LineDetail, delay_ms: u64) -> Self {
        self.details
            .insert(line_id.to_string(), ready(detail, delay_ms));
        self
    }

    pub(crate) fn with_failing_detail(mut self, line_id: &str) -> Self {
        self.details.insert(line_id.to_string(), failing(0));
        self
    }

    pub(crate) fn line_lookups(&self) -> usize {
        self.line_lookups.load(Ordering::SeqCst)
    }

    pub(crate) fn detail_lookups(&self) -> usize {
        self.detail_lookups.load(Ordering::SeqCst)
    }

    /// Keywords passed to `search_lines_by_station`, in call order.
    pub(crate) fn keywords(&self) -> Vec<String> {
        self.keywords.lock().unwrap().clone()
    }
}

impl GeoProvider for FakeProvider {
    async fn geocode(&self, address: &str, _city: &str) -> Result<Option<Point>, ProviderError> {
        if self.unavailable {
            return Err(ProviderError::Unauthorized);
        }
        Ok(self.geocodes.get(address).copied())
    }

    async fn search_nearby(
        &self,
        _center: Point,
        _radius_m: u32,
        category: Category,
        _city: &str,
    ) -> Result<Vec<Poi>, ProviderError> {
        if self.unavailable {
            return Err(ProviderError::Unauthorized);
        }
        match self.nearby.get(&category) {
            Some(scripted) => scripted.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn search_lines_by_station(
        &self,
        keyword: &str,
        _city: &str,
    ) -> Result<Vec<RawLine>, ProviderError> {
        self.line_lookups.fetch_add(1, Ordering::SeqCst);
        self.keywords.lock().unwrap().push(keyword.to_string());
        if self.unavailable {
            return Err(ProviderError::Unauthorized);
        }
        match self.lines.get(keyword) {
            Some(scripted) => scripted.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn line_detail(
        &self,
        line_id: &str,
        _city: &str,
    ) -> Result<Option<LineDetail>, ProviderError> {
        self.detail_lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(ProviderError::Unauthorized);
        }
        match self.details.get(line_id) {
            Some(scripted) => scripted.resolve().await.map(Some),
            None => Ok(None),
        }
    }
}

fn ready<T>(value: T, delay_ms: u64) -> Scripted<T> {
    Scripted {
        outcome: Outcome::Ready(value),
        delay: Duration::from_millis(delay_ms),
    }
}

fn failing<T>(delay_ms: u64) -> Scripted<T> {
    Scripted {
        outcome: Outcome::Fail,
        delay: Duration::from_millis(delay_ms),
    }
}

pub(crate) fn pt(lng: f64, lat: f64) -> Point {
    Point::new(lng, lat).unwrap()
}

pub(crate) fn poi(id: &str, name: &str, point: Point) -> Poi {
    Poi {
        id: id.to_string(),
        name: name.to_string(),
        point,
    }
}

pub(crate) fn raw_line(id: &str, name: &str, hint: Option<Category>) -> RawLine {
    RawLine {
        id: id.to_string(),
        name: name.to_string(),
        start_stop: format!("{name} start"),
        end_stop: format!("{name} end"),
        category_hint: hint,
    }
}

pub(crate) fn detail(path: &[(f64, f64)], stops: &[&str], schedule_blob: Option<&str>) -> LineDetail {
    LineDetail {
        path: path.iter().map(|&(lng, lat)| pt(lng, lat)).collect(),
        stops: stops
            .iter()
            .zip(path.iter())
            .map(|(name, &(lng, lat))| RawStop {
                name: name.to_string(),
                point: Some(pt(lng, lat)),
            })
            .collect(),
        schedule_blob: schedule_blob.map(str::to_string),
    }
}
