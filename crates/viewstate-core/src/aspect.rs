#![forbid(unsafe_code)]

//! Aspect-ratio classes for the outer window frame.
//!
//! The ratio is `outer_height / outer_width`, so tall frames have large
//! ratios. Ranges are half-open: Landscape `[0, 0.75)`, Portrait
//! `[0.75, 1.5)`, SuperPortrait `[1.5, ∞)`.

use serde::{Deserialize, Serialize};

/// Orientation class derived from the frame's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectClass {
    /// Wider than tall.
    Landscape,
    /// Roughly square to moderately tall.
    Portrait,
    /// Very tall (phones held upright).
    SuperPortrait,
}

impl AspectClass {
    /// All classes in ascending ratio order.
    pub const ALL: [AspectClass; 3] = [
        AspectClass::Landscape,
        AspectClass::Portrait,
        AspectClass::SuperPortrait,
    ];

    /// Document marker label for this class.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AspectClass::Landscape => "landscape",
            AspectClass::Portrait => "portrait",
            AspectClass::SuperPortrait => "super-portrait",
        }
    }
}

impl std::fmt::Display for AspectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bounds of the Portrait and SuperPortrait ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectThresholds {
    /// Smallest ratio classified as Portrait.
    pub portrait_min: f64,
    /// Smallest ratio classified as SuperPortrait.
    pub super_portrait_min: f64,
}

impl Default for AspectThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl AspectThresholds {
    /// Default thresholds: 0.75 and 1.5.
    pub const DEFAULT: Self = Self {
        portrait_min: 0.75,
        super_portrait_min: 1.5,
    };

    /// Create thresholds; `super_portrait_min` is raised to `portrait_min`
    /// if given lower.
    #[must_use]
    pub fn new(portrait_min: f64, super_portrait_min: f64) -> Self {
        Self {
            portrait_min,
            super_portrait_min: super_portrait_min.max(portrait_min),
        }
    }

    /// Classify a ratio.
    ///
    /// Negative and NaN ratios match no class and return `None`.
    #[must_use]
    pub fn classify(self, ratio: f64) -> Option<AspectClass> {
        if ratio.is_nan() || ratio < 0.0 {
            None
        } else if ratio < self.portrait_min {
            Some(AspectClass::Landscape)
        } else if ratio < self.super_portrait_min {
            Some(AspectClass::Portrait)
        } else {
            Some(AspectClass::SuperPortrait)
        }
    }

    /// Rendered panel height for a frame of `outer_height` at `ratio`.
    ///
    /// SuperPortrait frames get `outer_height / ratio` (which is the frame
    /// width); everything else gets the full outer height.
    #[must_use]
    pub fn panel_height(self, outer_height: f64, ratio: f64) -> f64 {
        if ratio >= self.super_portrait_min {
            outer_height / ratio
        } else {
            outer_height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_reference_ratios() {
        let t = AspectThresholds::DEFAULT;
        assert_eq!(t.classify(0.5), Some(AspectClass::Landscape));
        assert_eq!(t.classify(1.0), Some(AspectClass::Portrait));
        assert_eq!(t.classify(2.0), Some(AspectClass::SuperPortrait));
    }

    #[test]
    fn classify_is_half_open() {
        let t = AspectThresholds::DEFAULT;
        assert_eq!(t.classify(0.0), Some(AspectClass::Landscape));
        assert_eq!(t.classify(0.75), Some(AspectClass::Portrait));
        assert_eq!(t.classify(1.5), Some(AspectClass::SuperPortrait));
        assert_eq!(t.classify(f64::INFINITY), Some(AspectClass::SuperPortrait));
    }

    #[test]
    fn classify_rejects_undefined_ratios() {
        let t = AspectThresholds::DEFAULT;
        assert_eq!(t.classify(f64::NAN), None);
        assert_eq!(t.classify(-0.2), None);
    }

    #[test]
    fn panel_height_divides_only_for_super_portrait() {
        let t = AspectThresholds::DEFAULT;
        assert_eq!(t.panel_height(800.0, 0.5), 800.0);
        assert_eq!(t.panel_height(800.0, 1.0), 800.0);
        assert_eq!(t.panel_height(800.0, 2.0), 400.0);
    }

    #[test]
    fn new_keeps_ranges_ordered() {
        let t = AspectThresholds::new(1.0, 0.5);
        assert_eq!(t.super_portrait_min, 1.0);
        assert_eq!(t.classify(0.9), Some(AspectClass::Landscape));
        assert_eq!(t.classify(1.0), Some(AspectClass::SuperPortrait));
    }
}
