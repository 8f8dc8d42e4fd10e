//! Operating window parsing.
//!
//! AMap ships a line's schedule as a URL-encoded JSON blob. The useful part
//! is a free-text remark, found either at the top level (`allRemark`) or in
//! the first rule group (`rule_group[0].remark`), e.g.
//! `"首班车06:00\r\n末班车22:30"`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::OperatingWindow;

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}:\d{2}").expect("valid regex"));

/// Separator shown in place of the provider's line breaks.
const NOTE_SEPARATOR: &str = " | ";

/// Parse a schedule blob into an operating window.
///
/// Never fails: anything unexpected gives [`OperatingWindow::placeholder`].
pub fn parse_schedule(blob: &str) -> OperatingWindow {
    match remark(blob) {
        Some(remark) => window_from_remark(&remark),
        None => OperatingWindow::placeholder(),
    }
}

fn remark(blob: &str) -> Option<String> {
    let decoded = urlencoding::decode(blob)
        .map_err(|e| debug!(error = %e, "Schedule blob is not valid UTF-8"))
        .ok()?;

    let value: Value = serde_json::from_str(&decoded)
        .map_err(|e| debug!(error = %e, "Schedule blob is not JSON"))
        .ok()?;

    let top = value
        .get("allRemark")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    top.or_else(|| value.pointer("/rule_group/0/remark").and_then(Value::as_str))
        .map(str::to_string)
}

/// First and last clock times become the window; the whole remark the note.
///
/// A remark with fewer than two times is not trusted.
fn window_from_remark(remark: &str) -> OperatingWindow {
    let times: Vec<&str> = CLOCK_TIME.find_iter(remark).map(|m| m.as_str()).collect();

    match (times.first(), times.last()) {
        (Some(start), Some(end)) if times.len() >= 2 => OperatingWindow {
            start: start.to_string(),
            end: end.to_string(),
            note: remark
                .replace("\\r\\n", NOTE_SEPARATOR)
                .replace("\r\n", NOTE_SEPARATOR),
        },
        _ => OperatingWindow::placeholder(),
    }
}
