//! Lazy line detail loading.

use tracing::debug;

use crate::domain::{LinePatch, OperatingWindow, Stop};
use crate::provider::GeoProvider;

use super::schedule::parse_schedule;

/// Fetch geometry, stops and schedule for one line.
///
/// Always resolves to a patch. A failed or empty lookup gives
/// [`LinePatch::placeholder`], so the caller can mark the line hydrated
/// either way. Stops are numbered by position, starting at 1.
pub async fn hydrate<P: GeoProvider>(provider: &P, line_id: &str, city: &str) -> LinePatch {
    let detail = match provider.line_detail(line_id, city).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            debug!(line = %line_id, "No detail for line");
            return LinePatch::placeholder();
        }
        Err(e) => {
            debug!(line = %line_id, error = %e, "Line detail lookup failed");
            return LinePatch::placeholder();
        }
    };

    let operating_window = detail
        .schedule_blob
        .as_deref()
        .map(parse_schedule)
        .unwrap_or_else(OperatingWindow::placeholder);

    LinePatch {
        path: detail.path,
        stops: Stop::sequence(detail.stops.into_iter().map(|s| (s.name, s.point))),
        operating_window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fake::{FakeProvider, detail, pt};

    const SCHEDULE: &str = "%7B%22allRemark%22%3A%2206%3A00-22%3A30%22%7D";

    #[tokio::test]
    async fn fills_path_stops_and_window() {
        let provider = FakeProvider::new().with_detail(
            "L1",
            detail(
                &[(120.1, 30.1), (120.2, 30.2), (120.3, 30.3)],
                &["First", "Middle", "Last"],
                Some(SCHEDULE),
            ),
            0,
        );

        let patch = hydrate(&provider, "L1", "杭州").await;

        assert_eq!(patch.path.len(), 3);
        let seq: Vec<u32> = patch.stops.iter().map(|s| s.sequence_index).collect();
        assert_eq!(seq, vec![1, 2, 3]);
        assert_eq!(patch.stops[2].name, "Last");
        assert_eq!(patch.stops[0].point, Some(pt(120.1, 30.1)));
        assert_eq!(patch.operating_window.start, "06:00");
        assert_eq!(patch.operating_window.end, "22:30");
    }

    #[tokio::test]
    async fn unparseable_schedule_keeps_geometry() {
        let provider = FakeProvider::new().with_detail(
            "L1",
            detail(&[(120.1, 30.1), (120.2, 30.2)], &["A", "B"], Some("%7Bbroken")),
            0,
        );

        let patch = hydrate(&provider, "L1", "杭州").await;
        assert_eq!(patch.path.len(), 2);
        assert_eq!(patch.operating_window, OperatingWindow::placeholder());
    }

    #[tokio::test]
    async fn failure_gives_placeholder() {
        let provider = FakeProvider::new().with_failing_detail("L1");
        assert_eq!(hydrate(&provider, "L1", "杭州").await, LinePatch::placeholder());
    }

    #[tokio::test]
    async fn unknown_line_gives_placeholder() {
        let provider = FakeProvider::new();
        assert_eq!(hydrate(&provider, "nope", "杭州").await, LinePatch::placeholder());
        assert_eq!(provider.detail_lookups(), 1);
    }
}
