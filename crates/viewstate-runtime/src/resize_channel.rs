#![forbid(unsafe_code)]

//! Single-subscriber resize notification channel.
//!
//! The host calls [`ResizeChannel::notify`] whenever the viewport changes and
//! [`ResizeChannel::tick`] when a timer it armed for
//! [`ResizeChannel::next_deadline`] expires. Exactly one handler is
//! registered at a time: [`set_resize_handler`](ResizeChannel::set_resize_handler)
//! replaces the previous one and hands it back, dropping its pending timer
//! state unless the caller keeps it.

use core::fmt;
use core::time::Duration;

use tracing::debug;

use crate::debounce::Debounced;

/// Receiver of resize notifications.
pub trait ResizeHandler {
    /// The viewport changed at `now`.
    fn on_resize(&mut self, now: Duration);

    /// Host timer callback. Returns `true` if work was performed.
    fn on_tick(&mut self, now: Duration) -> bool;

    /// When the handler next needs [`on_tick`](Self::on_tick), if ever.
    fn next_deadline(&self) -> Option<Duration>;
}

impl<F: FnMut(())> ResizeHandler for Debounced<(), F> {
    fn on_resize(&mut self, now: Duration) {
        self.call((), now);
    }

    fn on_tick(&mut self, now: Duration) -> bool {
        self.tick(now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        Debounced::next_deadline(self)
    }
}

/// Resize notification slot with at most one subscriber.
#[derive(Default)]
pub struct ResizeChannel {
    handler: Option<Box<dyn ResizeHandler>>,
    notifications: u64,
    replacements: u64,
}

impl fmt::Debug for ResizeChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeChannel")
            .field("has_handler", &self.handler.is_some())
            .field("notifications", &self.notifications)
            .field("replacements", &self.replacements)
            .finish()
    }
}

impl ResizeChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` as the sole subscriber, returning the one it
    /// replaced.
    pub fn set_resize_handler(
        &mut self,
        handler: Box<dyn ResizeHandler>,
    ) -> Option<Box<dyn ResizeHandler>> {
        let previous = self.handler.replace(handler);
        if previous.is_some() {
            self.replacements += 1;
            debug!(
                replacements = self.replacements,
                "resize handler replaced"
            );
        }
        previous
    }

    /// Remove the subscriber.
    pub fn clear_resize_handler(&mut self) -> Option<Box<dyn ResizeHandler>> {
        self.handler.take()
    }

    /// Whether a subscriber is installed.
    #[inline]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Deliver a resize notification. Returns `false` if nobody listens.
    ///
    /// A deadline that passed before `now` is ticked first, so a host timer
    /// that fired late never swallows the work it was armed for.
    pub fn notify(&mut self, now: Duration) -> bool {
        self.notifications += 1;
        match self.handler.as_mut() {
            Some(handler) => {
                if handler.next_deadline().is_some_and(|deadline| deadline <= now) {
                    handler.on_tick(now);
                }
                handler.on_resize(now);
                true
            }
            None => false,
        }
    }

    /// Forward a timer callback. Returns `true` if the handler did work.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.handler
            .as_mut()
            .is_some_and(|handler| handler.on_tick(now))
    }

    /// Next time the host should call [`tick`](Self::tick).
    pub fn next_deadline(&self) -> Option<Duration> {
        self.handler.as_ref().and_then(|h| h.next_deadline())
    }

    /// Notifications received since creation, delivered or not.
    #[inline]
    pub fn notification_count(&self) -> u64 {
        self.notifications
    }

    /// Times a handler has been replaced.
    #[inline]
    pub fn replacement_count(&self) -> u64 {
        self.replacements
    }
}
