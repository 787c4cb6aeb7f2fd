#![forbid(unsafe_code)]

//! Time-based debouncing.
//!
//! [`Debouncer`] is a two-state machine, `Idle` or `Pending { deadline, args }`,
//! driven by host-supplied monotonic time. [`Debounced`] pairs it with the
//! action it guards.
//!
//! # Semantics
//!
//! - Every call re-arms the trailing deadline at `now + delay`; a pending
//!   call is superseded and never runs.
//! - A pending call whose deadline has already passed is not superseded. The
//!   next call hands it back first, then treats the debouncer as idle, so a
//!   late host timer never loses a due execution.
//! - The trailing execution receives the arguments of the last call.
//! - With `leading`, a call arriving while idle also runs the action
//!   immediately. The trailing deadline is armed regardless, so one isolated
//!   call runs the action twice: now, and again after `delay`. Set
//!   `trailing = false` for the immediate-only variant.
//!
//! # Usage
//!
//! ```
//! use core::time::Duration;
//! use viewstate_runtime::debounce::debounce;
//!
//! let mut seen = Vec::new();
//! let mut on_resize = debounce(|w: u32| seen.push(w), Duration::from_millis(50), false);
//!
//! for (i, w) in [300, 400, 500].into_iter().enumerate() {
//!     on_resize.call(w, Duration::from_millis(i as u64 * 5));
//! }
//! assert!(!on_resize.tick(Duration::from_millis(59)));
//! assert!(on_resize.tick(Duration::from_millis(60)));
//! drop(on_resize);
//! assert_eq!(seen, vec![500]);
//! ```

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default quiet period before the trailing call fires.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Configuration for a [`Debouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period after the last call before the trailing execution.
    pub delay: Duration,
    /// Run the action immediately when a call arrives while idle.
    pub leading: bool,
    /// Run the action when the quiet period elapses.
    pub trailing: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            leading: false,
            trailing: true,
        }
    }
}

impl DebounceConfig {
    /// Set the quiet period.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Enable or disable the leading edge.
    #[must_use]
    pub fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Enable or disable the trailing edge.
    #[must_use]
    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }
}

/// Scheduler state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState<A> {
    /// Nothing scheduled.
    Idle,
    /// A trailing execution is armed.
    Pending {
        /// Monotonic time at which the trailing execution becomes due.
        deadline: Duration,
        /// Arguments of the most recent call.
        args: A,
    },
}

/// Counters for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DebounceStats {
    /// Calls received.
    pub calls: u64,
    /// Calls that replaced an armed trailing execution.
    pub superseded: u64,
    /// Leading-edge executions.
    pub leading_fires: u64,
    /// Trailing-edge executions.
    pub trailing_fires: u64,
}

/// Executions owed by one [`Debouncer::call_at`].
///
/// Iterating yields the overdue trailing arguments first, then the leading
/// ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFires<A> {
    /// Trailing execution whose deadline had passed before this call.
    pub overdue: Option<A>,
    /// Leading-edge execution for this call.
    pub leading: Option<A>,
}

impl<A> CallFires<A> {
    /// Whether the caller has nothing to run.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.overdue.is_none() && self.leading.is_none()
    }
}

impl<A> IntoIterator for CallFires<A> {
    type Item = A;
    type IntoIter = core::iter::Chain<core::option::IntoIter<A>, core::option::IntoIter<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.overdue.into_iter().chain(self.leading)
    }
}

/// Debounce state machine.
///
/// Holds no action of its own: [`call_at`](Self::call_at) and
/// [`poll_at`](Self::poll_at) hand back the arguments the caller should run
/// the action with. Not thread-safe; drive it from one event loop.
#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    config: DebounceConfig,
    state: DebounceState<A>,
    stats: DebounceStats,
}

impl<A> Debouncer<A> {
    /// Create an idle debouncer.
    #[must_use]
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            state: DebounceState::Idle,
            stats: DebounceStats::default(),
        }
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &DebounceState<A> {
        &self.state
    }

    /// Counters since creation.
    #[inline]
    pub fn stats(&self) -> DebounceStats {
        self.stats
    }

    /// Whether a trailing execution is armed.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Deadline of the armed trailing execution.
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.state {
            DebounceState::Pending { deadline, .. } => Some(deadline),
            DebounceState::Idle => None,
        }
    }

    /// Time left until the trailing execution is due; zero if overdue.
    pub fn time_until_fire(&self, now: Duration) -> Option<Duration> {
        self.next_deadline().map(|deadline| deadline.saturating_sub(now))
    }

    /// Fire the trailing execution if its deadline has passed.
    ///
    /// Returns the arguments to run the action with. When `trailing` is
    /// disabled the state still returns to idle but nothing is returned.
    pub fn poll_at(&mut self, now: Duration) -> Option<A> {
        match self.state {
            DebounceState::Pending { deadline, .. } if now >= deadline => {}
            _ => return None,
        }
        self.take_pending()
    }

    /// Fire the trailing execution now, ignoring its deadline.
    pub fn flush(&mut self) -> Option<A> {
        self.take_pending()
    }

    /// Drop the armed trailing execution. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = DebounceState::Idle;
        was_pending
    }

    fn take_pending(&mut self) -> Option<A> {
        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::Pending { args, .. } if self.config.trailing => {
                self.stats.trailing_fires += 1;
                Some(args)
            }
            _ => None,
        }
    }
}

impl<A: Clone> Debouncer<A> {
    /// Register a call at `now`.
    ///
    /// Settles an overdue trailing execution first, then fires the leading
    /// edge if the debouncer is idle. The trailing deadline is re-armed
    /// either way. Run the returned arguments in iteration order.
    pub fn call_at(&mut self, args: A, now: Duration) -> CallFires<A> {
        self.stats.calls += 1;
        let overdue = self.poll_at(now);
        let was_pending = self.is_pending();
        if was_pending {
            self.stats.superseded += 1;
        }

        // Evaluated before re-arming: only an idle debouncer fires leading.
        let leading = if self.config.leading && !was_pending {
            self.stats.leading_fires += 1;
            Some(args.clone())
        } else {
            None
        };

        let deadline = now.saturating_add(self.config.delay);
        trace!(
            deadline_ms = deadline.as_millis() as u64,
            superseded = was_pending,
            overdue = overdue.is_some(),
            leading = leading.is_some(),
            "debounce armed"
        );
        self.state = DebounceState::Pending { deadline, args };
        CallFires { overdue, leading }
    }
}

/// A debounced action: a [`Debouncer`] that owns what it schedules.
pub struct Debounced<A, F> {
    debouncer: Debouncer<A>,
    action: F,
}

impl<A, F> fmt::Debug for Debounced<A, F>
where
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl<A, F> Debounced<A, F>
where
    A: Clone,
    F: FnMut(A),
{
    /// Wrap `action`.
    pub fn new(config: DebounceConfig, action: F) -> Self {
        Self {
            debouncer: Debouncer::new(config),
            action,
        }
    }

    /// Invoke the wrapper at `now`. Returns `true` if the action ran, either
    /// for an overdue trailing execution or on the leading edge.
    pub fn call(&mut self, args: A, now: Duration) -> bool {
        let mut ran = false;
        for args in self.debouncer.call_at(args, now) {
            (self.action)(args);
            ran = true;
        }
        ran
    }

    /// Run the trailing execution if due. Returns `true` if the action ran.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.debouncer.poll_at(now) {
            Some(args) => {
                (self.action)(args);
                true
            }
            None => false,
        }
    }

    /// Run the armed trailing execution immediately.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(args) => {
                (self.action)(args);
                true
            }
            None => false,
        }
    }

    /// Drop the armed trailing execution.
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    /// Whether a trailing execution is armed.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Deadline of the armed trailing execution.
    #[inline]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.next_deadline()
    }

    /// Underlying state machine.
    #[inline]
    pub fn debouncer(&self) -> &Debouncer<A> {
        &self.debouncer
    }
}

/// Wrap `action` so bursts of calls collapse into one execution `delay`
/// after the last call, optionally also running on the leading edge.
pub fn debounce<A, F>(action: F, delay: Duration, leading: bool) -> Debounced<A, F>
where
    A: Clone,
    F: FnMut(A),
{
    Debounced::new(
        DebounceConfig::default()
            .with_delay(delay)
            .with_leading(leading),
        action,
    )
}
