//! Station name normalization.
//!
//! Providers publish one physical stop under several names: each exit,
//! each direction, and each category (subway vs bus) gets its own POI.
//! [`normalize`] reduces a name to a grouping key so those records collapse
//! to a single stop. The key doubles as the keyword for line lookups.
//!
//! Rules, applied repeatedly until the name stops changing:
//! 1. Drop parentheticals, ASCII `(...)` or full-width `（...）`.
//! 2. Drop a trailing exit designator (`西直门站A口`, `Central Station Exit 2`).
//! 3. Drop a trailing category word (`地铁站`, `地铁`, `站`, `Bus Stop`).
//! 4. Drop a trailing compass exit (`B东北口`, `North Exit`).
//!
//! Iterating to a fixed point makes the function idempotent. If the rules
//! consume the whole name, the original name is the key.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(（][^()（）]*[)）]").expect("valid regex"));

static EXIT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:站[^站]*口|\s*\bstation\b.*\bexit(?:\s+[a-z0-9]{1,3})?)$")
        .expect("valid regex")
});

static CATEGORY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:地铁站|公交站|轻轨站|公交车站|地铁|公交|站|\s+(?:(?:subway|metro|bus|rail|train)\s+)?(?:station|stop))$",
    )
    .expect("valid regex")
});

static COMPASS_EXIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:[a-z0-9]?(?:东北|东南|西北|西南|东|西|南|北)口|\s*(?:\b[a-z0-9]\s+)?\b(?:north|south|east|west|northeast|northwest|southeast|southwest|north-east|north-west|south-east|south-west)\s+exit)$",
    )
    .expect("valid regex")
});

/// A canonical grouping key derived from a station name.
///
/// Never shown to users; the representative station's own name is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Apply every rule once.
fn strip_once(name: &str) -> String {
    let name = PARENTHETICAL.replace_all(name, "");
    let name = EXIT_SUFFIX.replace(name.trim(), "");
    let name = CATEGORY_SUFFIX.replace(name.trim(), "");
    let name = COMPASS_EXIT.replace(name.trim(), "");
    name.trim().to_string()
}

/// Derive the grouping key for a raw station name.
///
/// Pure and deterministic. Only an empty input yields an empty key.
pub fn normalize(raw_name: &str) -> NormalizedKey {
    let mut current = raw_name.trim().to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            break;
        }
        current = next;
    }

    if current.is_empty() {
        NormalizedKey(raw_name.to_string())
    } else {
        NormalizedKey(current)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Names built from the fragments real station names are made of.
    fn station_name() -> impl Strategy<Value = String> {
        let fragment = prop_oneof![
            Just("西直门".to_string()),
            Just("Central".to_string()),
            Just("站".to_string()),
            Just("地铁站".to_string()),
            Just("(地铁站)".to_string()),
            Just("（公交站）".to_string()),
            Just("A口".to_string()),
            Just("东北口".to_string()),
            Just(" Station".to_string()),
            Just(" Exit 2".to_string()),
            Just(" North Exit".to_string()),
            Just("(".to_string()),
            Just(" ".to_string()),
            "[a-zA-Z0-9]{1,4}",
        ];
        proptest::collection::vec(fragment, 1..6).prop_map(|parts| parts.concat())
    }

    proptest! {
        /// Normalizing twice is the same as normalizing once
        #[test]
        fn idempotent(name in station_name()) {
            let once = normalize(&name);
            prop_assert_eq!(normalize(once.as_str()), once);
        }

        /// Arbitrary printable text is handled idempotently too
        #[test]
        fn idempotent_arbitrary(name in "\\PC{1,24}") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(once.as_str()), once);
        }

        /// Non-empty input never produces an empty key
        #[test]
        fn never_empty(name in "\\PC{1,24}") {
            prop_assert!(!normalize(&name).as_str().is_empty());
        }
    }
}
