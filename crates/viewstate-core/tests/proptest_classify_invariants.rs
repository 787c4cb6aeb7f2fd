//! Property-based invariant tests for breakpoint and aspect classification.
//!
//! 1. Every width classifies into exactly one breakpoint.
//! 2. Classification is monotone in width.
//! 3. Ranges agree with classification, for default and custom thresholds.
//! 4. Negative widths are always rejected.
//! 5. Every non-negative ratio maps to exactly one aspect class.
//! 6. Panel height never exceeds the outer height.

use proptest::prelude::*;
use viewstate_core::{AspectClass, AspectThresholds, Breakpoint, Breakpoints, classify};

fn thresholds_strategy() -> impl Strategy<Value = Breakpoints> {
    (0u32..3000, 0u32..3000, 0u32..3000, 0u32..3000)
        .prop_map(|(a, b, c, d)| Breakpoints::new(a, b, c, d))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Partition: exactly one category per width
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exactly_one_category_holds(width in any::<u32>()) {
        let bp = Breakpoints::DEFAULT;
        let hits = Breakpoint::ALL
            .iter()
            .filter(|cat| bp.is(**cat, width))
            .count();
        prop_assert_eq!(hits, 1, "width {} matched {} categories", width, hits);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Monotone in width
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classification_is_monotone(a in 0u32..5000, b in 0u32..5000, bp in thresholds_strategy()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(bp.classify_width(lo) <= bp.classify_width(hi));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Ranges agree with classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ranges_partition_widths(width in 0u32..5000, bp in thresholds_strategy()) {
        let containing: Vec<_> = Breakpoint::ALL
            .into_iter()
            .filter(|cat| bp.range(*cat).contains(width))
            .collect();
        prop_assert_eq!(containing, vec![bp.classify_width(width)]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Negative widths rejected, non-negative accepted
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn negative_widths_rejected(width in i64::MIN..0) {
        prop_assert!(classify(width).is_err());
    }

    #[test]
    fn non_negative_widths_accepted(width in 0i64..=i64::MAX) {
        prop_assert!(classify(width).is_ok());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5–6. Aspect classes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn aspect_total_on_non_negative(ratio in 0.0f64..100.0) {
        let class = AspectThresholds::DEFAULT.classify(ratio);
        prop_assert!(class.is_some());
        let expected = if ratio < 0.75 {
            AspectClass::Landscape
        } else if ratio < 1.5 {
            AspectClass::Portrait
        } else {
            AspectClass::SuperPortrait
        };
        prop_assert_eq!(class, Some(expected));
    }

    #[test]
    fn panel_height_bounded_by_outer(height in 0.0f64..4000.0, ratio in 0.0f64..10.0) {
        let px = AspectThresholds::DEFAULT.panel_height(height, ratio);
        prop_assert!(px <= height, "panel {} > outer {}", px, height);
    }
}
