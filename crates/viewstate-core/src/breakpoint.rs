#![forbid(unsafe_code)]

//! Responsive breakpoint classification.
//!
//! [`Breakpoints`] partitions `[0, ∞)` into five contiguous, non-overlapping
//! ranges. Each threshold is an inclusive upper bound, so a width that sits
//! exactly on a boundary belongs to the lower category.
//!
//! | Breakpoint     | Default range     | Marker          |
//! |----------------|-------------------|-----------------|
//! | `Mobile`       | `0..=480`         | `mobile`        |
//! | `LargeMobile`  | `481..=800`       | `large-mobile`  |
//! | `Tablet`       | `801..=1000`      | `tablet`        |
//! | `Desktop`      | `1001..=1300`     | `desktop`       |
//! | `LargeDesktop` | `1301..`          | `large-desktop` |
//!
//! ```
//! use viewstate_core::{Breakpoint, Breakpoints};
//!
//! let bp = Breakpoints::DEFAULT;
//! assert_eq!(bp.classify_width(480), Breakpoint::Mobile);
//! assert_eq!(bp.classify_width(481), Breakpoint::LargeMobile);
//! assert!(bp.is(Breakpoint::Tablet, 900));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewstateError};

/// Responsive breakpoint tiers, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Breakpoint {
    /// Phones in portrait.
    Mobile,
    /// Large phones and small tablets.
    LargeMobile,
    /// Tablets.
    Tablet,
    /// Laptops and standard desktops.
    Desktop,
    /// Wide desktops.
    LargeDesktop,
}

impl Breakpoint {
    /// All breakpoints in priority order (also ascending width).
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Mobile,
        Breakpoint::LargeMobile,
        Breakpoint::Tablet,
        Breakpoint::Desktop,
        Breakpoint::LargeDesktop,
    ];

    /// Ordinal index (0–4).
    #[inline]
    const fn index(self) -> u8 {
        match self {
            Breakpoint::Mobile => 0,
            Breakpoint::LargeMobile => 1,
            Breakpoint::Tablet => 2,
            Breakpoint::Desktop => 3,
            Breakpoint::LargeDesktop => 4,
        }
    }

    /// Document marker label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::LargeMobile => "large-mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
            Breakpoint::LargeDesktop => "large-desktop",
        }
    }

    /// Inverse of [`label`](Self::label).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bp| bp.label() == label)
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive width range covered by one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointRange {
    /// Smallest width in the range.
    pub min: u32,
    /// Largest width in the range; `None` means unbounded.
    pub max: Option<u32>,
}

impl BreakpointRange {
    /// Whether `width` falls inside this range.
    #[inline]
    pub const fn contains(self, width: u32) -> bool {
        if width < self.min {
            return false;
        }
        match self.max {
            Some(max) => width <= max,
            None => true,
        }
    }

    /// True when sanitised thresholds collapsed this range to nothing.
    #[inline]
    pub const fn is_empty(self) -> bool {
        match self.max {
            Some(max) => max < self.min,
            None => false,
        }
    }
}

/// Breakpoint thresholds.
///
/// Each field is the inclusive upper bound of the named category;
/// `LargeDesktop` is everything above `desktop_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Widest `Mobile` width.
    pub mobile_max: u32,
    /// Widest `LargeMobile` width.
    pub large_mobile_max: u32,
    /// Widest `Tablet` width.
    pub tablet_max: u32,
    /// Widest `Desktop` width.
    pub desktop_max: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Breakpoints {
    /// Default thresholds: 480 / 800 / 1000 / 1300.
    pub const DEFAULT: Self = Self {
        mobile_max: 480,
        large_mobile_max: 800,
        tablet_max: 1000,
        desktop_max: 1300,
    };

    /// Create thresholds, sanitised to be monotonically non-decreasing.
    pub const fn new(
        mobile_max: u32,
        large_mobile_max: u32,
        tablet_max: u32,
        desktop_max: u32,
    ) -> Self {
        let large_mobile_max = if large_mobile_max < mobile_max {
            mobile_max
        } else {
            large_mobile_max
        };
        let tablet_max = if tablet_max < large_mobile_max {
            large_mobile_max
        } else {
            tablet_max
        };
        let desktop_max = if desktop_max < tablet_max {
            tablet_max
        } else {
            desktop_max
        };
        Self {
            mobile_max,
            large_mobile_max,
            tablet_max,
            desktop_max,
        }
    }

    /// Classify a width into a breakpoint.
    #[inline]
    pub const fn classify_width(self, width: u32) -> Breakpoint {
        if width <= self.mobile_max {
            Breakpoint::Mobile
        } else if width <= self.large_mobile_max {
            Breakpoint::LargeMobile
        } else if width <= self.tablet_max {
            Breakpoint::Tablet
        } else if width <= self.desktop_max {
            Breakpoint::Desktop
        } else {
            Breakpoint::LargeDesktop
        }
    }

    /// Classify a raw signed width.
    ///
    /// Negative widths are a caller bug and fail with
    /// [`ViewstateError::InvalidInput`]. Widths beyond `u32::MAX` are
    /// classified as the widest category.
    pub fn classify(self, width: i64) -> Result<Breakpoint> {
        if width < 0 {
            return Err(ViewstateError::invalid_input(format!(
                "breakpoint width must be non-negative, got {width}"
            )));
        }
        let width = u32::try_from(width).unwrap_or(u32::MAX);
        Ok(self.classify_width(width))
    }

    /// Whether `width` classifies as `bp`.
    #[inline]
    pub const fn is(self, bp: Breakpoint, width: u32) -> bool {
        self.classify_width(width).index() == bp.index()
    }

    /// Check if width is at least a given breakpoint.
    #[inline]
    pub const fn at_least(self, width: u32, min: Breakpoint) -> bool {
        self.classify_width(width).index() >= min.index()
    }

    /// Width range covered by `bp`.
    #[must_use]
    pub const fn range(self, bp: Breakpoint) -> BreakpointRange {
        match bp {
            Breakpoint::Mobile => BreakpointRange {
                min: 0,
                max: Some(self.mobile_max),
            },
            Breakpoint::LargeMobile => BreakpointRange {
                min: self.mobile_max.saturating_add(1),
                max: Some(self.large_mobile_max),
            },
            Breakpoint::Tablet => BreakpointRange {
                min: self.large_mobile_max.saturating_add(1),
                max: Some(self.tablet_max),
            },
            Breakpoint::Desktop => BreakpointRange {
                min: self.tablet_max.saturating_add(1),
                max: Some(self.desktop_max),
            },
            Breakpoint::LargeDesktop => BreakpointRange {
                min: self.desktop_max.saturating_add(1),
                max: None,
            },
        }
    }
}

/// Classify with the default thresholds.
///
/// ```
/// use viewstate_core::{Breakpoint, classify};
///
/// assert_eq!(classify(1301), Ok(Breakpoint::LargeDesktop));
/// assert!(classify(-1).is_err());
/// ```
pub fn classify(width: i64) -> Result<Breakpoint> {
    Breakpoints::DEFAULT.classify(width)
}
