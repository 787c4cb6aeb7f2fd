#![forbid(unsafe_code)]

//! Document marker labels.
//!
//! Markers fall into three orthogonal groups. Within the breakpoint and
//! aspect groups at most one marker is present at a time; the sticky-footer
//! group is a single boolean marker.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectClass;
use crate::breakpoint::Breakpoint;

/// Label of the sticky-footer marker.
pub const STICKY_FOOTER: &str = "sticky-footer";

/// Group a marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerGroup {
    /// One of the five breakpoint categories.
    Breakpoint,
    /// The sticky-footer flag.
    StickyFooter,
    /// One of the three aspect classes.
    Aspect,
}

/// Every marker the reconciler may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Breakpoint category marker.
    Breakpoint(Breakpoint),
    /// Sticky-footer marker.
    StickyFooter,
    /// Aspect class marker.
    Aspect(AspectClass),
}

impl Marker {
    /// All nine markers, grouped.
    pub const ALL: [Marker; 9] = [
        Marker::Breakpoint(Breakpoint::Mobile),
        Marker::Breakpoint(Breakpoint::LargeMobile),
        Marker::Breakpoint(Breakpoint::Tablet),
        Marker::Breakpoint(Breakpoint::Desktop),
        Marker::Breakpoint(Breakpoint::LargeDesktop),
        Marker::StickyFooter,
        Marker::Aspect(AspectClass::Landscape),
        Marker::Aspect(AspectClass::Portrait),
        Marker::Aspect(AspectClass::SuperPortrait),
    ];

    /// Label written to the document.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Marker::Breakpoint(bp) => bp.label(),
            Marker::StickyFooter => STICKY_FOOTER,
            Marker::Aspect(class) => class.label(),
        }
    }

    /// Group this marker belongs to.
    #[must_use]
    pub const fn group(self) -> MarkerGroup {
        match self {
            Marker::Breakpoint(_) => MarkerGroup::Breakpoint,
            Marker::StickyFooter => MarkerGroup::StickyFooter,
            Marker::Aspect(_) => MarkerGroup::Aspect,
        }
    }

    /// Parse a label written by the reconciler. Unknown labels return `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = Marker::ALL.iter().map(|m| m.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Marker::ALL.len());
    }

    #[test]
    fn from_label_resolves_groups() {
        assert_eq!(
            Marker::from_label("large-mobile").map(Marker::group),
            Some(MarkerGroup::Breakpoint)
        );
        assert_eq!(
            Marker::from_label("super-portrait"),
            Some(Marker::Aspect(AspectClass::SuperPortrait))
        );
        assert_eq!(Marker::from_label("sticky-footer"), Some(Marker::StickyFooter));
        assert_eq!(Marker::from_label("panel-hero"), None);
    }
}
