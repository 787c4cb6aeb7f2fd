#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! Defaults reproduce the stock responsive behaviour: 480 / 800 / 1000 / 1300
//! breakpoints, 0.75 / 1.5 aspect thresholds, a 50 ms trailing-only
//! debounce, and the `[class*="panel-"]` panel selector.
//!
//! | Variable                     | Effect                           |
//! |------------------------------|----------------------------------|
//! | `VIEWSTATE_DEBOUNCE_MS`      | Debounce delay in milliseconds   |
//! | `VIEWSTATE_DEBOUNCE_LEADING` | `1`/`true` enables leading edge  |
//! | `VIEWSTATE_LOG`              | `1`/`true` enables decision logs |

use core::time::Duration;

use viewstate_core::{AspectThresholds, Breakpoints, Result, Selector, ViewstateError};

use crate::debounce::DebounceConfig;

/// Environment variable overriding the debounce delay.
pub const ENV_DEBOUNCE_MS: &str = "VIEWSTATE_DEBOUNCE_MS";
/// Environment variable enabling the debounce leading edge.
pub const ENV_DEBOUNCE_LEADING: &str = "VIEWSTATE_DEBOUNCE_LEADING";
/// Environment variable enabling reconcile decision logs.
pub const ENV_LOG: &str = "VIEWSTATE_LOG";

/// Configuration for a [`StateReconciler`](crate::reconciler::StateReconciler)
/// and the resize handler it installs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewstateConfig {
    /// Breakpoint thresholds.
    pub breakpoints: Breakpoints,
    /// Aspect-ratio thresholds.
    pub aspect: AspectThresholds,
    /// Resize debounce settings.
    pub debounce: DebounceConfig,
    /// Elements whose height follows the frame aspect.
    pub panel_selector: Selector,
    /// Record a [`ReconcileLog`](crate::decision_log::ReconcileLog) per recompute.
    pub enable_logging: bool,
}

impl ViewstateConfig {
    /// Replace the breakpoint thresholds.
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Replace the aspect thresholds.
    #[must_use]
    pub fn with_aspect(mut self, aspect: AspectThresholds) -> Self {
        self.aspect = aspect;
        self
    }

    /// Replace the debounce settings.
    #[must_use]
    pub fn with_debounce(mut self, debounce: DebounceConfig) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the debounce delay.
    #[must_use]
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce.delay = delay;
        self
    }

    /// Use a different panel selector.
    pub fn with_panel_selector(mut self, selector: &str) -> Result<Self> {
        self.panel_selector = Selector::parse(selector)?;
        Ok(self)
    }

    /// Enable or disable decision logging.
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                ViewstateError::invalid_input(format!("{ENV_DEBOUNCE_MS}={raw:?} is not a number"))
            })?;
            config.debounce.delay = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_DEBOUNCE_LEADING) {
            config.debounce.leading = is_truthy(&raw);
        }
        if let Some(raw) = lookup(ENV_LOG) {
            config.enable_logging = is_truthy(&raw);
        }
        Ok(config)
    }
}

fn is_truthy(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true")
}
