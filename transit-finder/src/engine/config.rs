//! Engine configuration.

use std::fmt;
use std::str::FromStr;

use crate::domain::Category;

use super::error::EngineError;

/// Validated search radius in meters.
///
/// Accepts 500 to 2000 inclusive, in steps of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchRadius(u32);

impl SearchRadius {
    pub const MIN: u32 = 500;
    pub const MAX: u32 = 2000;
    pub const STEP: u32 = 100;

    /// Create a radius, rejecting values outside the recognized range.
    pub fn new(meters: u32) -> Result<Self, EngineError> {
        if (Self::MIN..=Self::MAX).contains(&meters) && meters % Self::STEP == 0 {
            Ok(Self(meters))
        } else {
            Err(EngineError::InvalidRadius(meters))
        }
    }

    /// Radius in meters.
    pub fn meters(&self) -> u32 {
        self.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(1000)
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl FromStr for SearchRadius {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let meters = s
            .trim()
            .parse::<u32>()
            .map_err(|_| EngineError::InvalidRadius(0))?;
        Self::new(meters)
    }
}

/// Initial `visible` flag for newly discovered lines, per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityDefaults {
    pub rail: bool,
    pub surface: bool,
}

impl VisibilityDefaults {
    pub fn for_category(&self, category: Category) -> bool {
        match category {
            Category::Rail => self.rail,
            Category::Surface => self.surface,
        }
    }
}

impl Default for VisibilityDefaults {
    /// Rail lines are shown by default; surface lines are too numerous.
    fn default() -> Self {
        Self {
            rail: true,
            surface: false,
        }
    }
}

/// Configuration for one user's discovery cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Region scope passed to every provider call.
    pub city: String,
    pub radius: SearchRadius,
    pub visibility: VisibilityDefaults,
}

impl EngineConfig {
    /// Create a configuration for `city` with default radius and visibility.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            radius: SearchRadius::default(),
            visibility: VisibilityDefaults::default(),
        }
    }

    pub fn with_radius(mut self, radius: SearchRadius) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityDefaults) -> Self {
        self.visibility = visibility;
        self
    }
}
