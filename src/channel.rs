//! Notification channels for error events.
//!
//! A channel is anything implementing [`Notifier`]: it keeps an ordered list
//! of subscribers and delivers every published [`ErrorEvent`] to each of them,
//! synchronously, in subscription order.
//!
//! Two variants ship with the crate:
//! - [`ErrorNotifier`] delivers events unchanged.
//! - [`PrefixedNotifier`] owns a separate subscriber list and rewrites the
//!   detail text with a `[<label> HH:MM:SS]` prefix before delivery.
//!
//! Callers that hold a `Box<dyn Notifier>` observe whichever behaviour the
//! concrete variant implements.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};

use crate::event::{ErrorCategory, ErrorEvent};

/// Subscriber callback: receives the raising entity and the event.
pub type Handler = Arc<dyn Fn(&dyn EventSource, &ErrorEvent) + Send + Sync>;

/// Wrap a closure as a [`Handler`].
///
/// Keep the returned value (or a clone of it) to unsubscribe later:
/// handlers are matched by identity, not by behaviour.
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&dyn EventSource, &ErrorEvent) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A handler that routes events to `tracing` at warn level.
pub fn tracing_handler() -> Handler {
    handler(|source, event| {
        warn!(
            source = source.source_name(),
            category = event.category().as_str(),
            kind = event.kind(),
            time = %event.time().format("%H:%M:%S"),
            "{}",
            event.text()
        );
    })
}

/// An entity that can raise error events.
pub trait EventSource {
    /// Human-readable name of the raising entity.
    fn source_name(&self) -> &str;

    /// Downcast to concrete type inside a handler.
    fn as_any(&self) -> &dyn Any;
}

/// Extension trait for source type checking.
pub trait EventSourceExt: EventSource {
    /// Check if this source is of type T.
    fn is<T: 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to type T.
    fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl<S: EventSource + ?Sized> EventSourceExt for S {}

/// Subscribe/unsubscribe/publish contract shared by all channel variants.
///
/// # Example
///
/// ```rust
/// use institute_records::{handler, ErrorCategory, ErrorNotifier, EventSource, Notifier};
/// use std::any::Any;
/// use std::sync::{Arc, Mutex};
///
/// struct Clock;
///
/// impl EventSource for Clock {
///     fn source_name(&self) -> &str { "clock" }
///     fn as_any(&self) -> &dyn Any { self }
/// }
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
///
/// let mut notifier: Box<dyn Notifier> = Box::new(ErrorNotifier::new());
/// notifier.subscribe(handler(move |_, event| {
///     sink.lock().unwrap().push(event.kind().to_string());
/// }));
///
/// notifier.raise_error(&Clock, ErrorCategory::Overflow, "Overflow", "tick overflowed");
/// assert_eq!(*seen.lock().unwrap(), vec!["Overflow"]);
/// ```
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Append a handler. Duplicate subscriptions are kept and each one is
    /// invoked.
    fn subscribe(&mut self, handler: Handler);

    /// Remove the most recently added occurrence of `handler`.
    ///
    /// Returns `false` when the handler was not subscribed.
    fn unsubscribe(&mut self, handler: &Handler) -> bool;

    /// Deliver `event` to every subscriber in subscription order.
    ///
    /// A panicking handler is not caught.
    fn publish(&self, source: &dyn EventSource, event: ErrorEvent);

    /// Number of current subscriptions.
    fn subscriber_count(&self) -> usize;

    /// Build an event and hand it to [`Notifier::publish`].
    fn raise_error(
        &self,
        source: &dyn EventSource,
        category: ErrorCategory,
        kind: &str,
        text: &str,
    ) {
        self.publish(source, ErrorEvent::new(category, kind, text));
    }
}

/// Ordered handler storage used by the channel variants.
#[derive(Clone, Default)]
pub struct SubscriberList {
    handlers: Vec<Handler>,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    /// Remove the last occurrence of `handler`, compared by identity.
    pub fn remove_last(&mut self, handler: &Handler) -> bool {
        let target = Arc::as_ptr(handler);
        match self
            .handlers
            .iter()
            .rposition(|h| std::ptr::addr_eq(Arc::as_ptr(h), target))
        {
            Some(index) => {
                self.handlers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn dispatch(&self, source: &dyn EventSource, event: &ErrorEvent) {
        for handler in &self.handlers {
            handler(source, event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for SubscriberList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Base channel: delivers events unchanged.
#[derive(Debug, Default)]
pub struct ErrorNotifier {
    subscribers: SubscriberList,
}

impl ErrorNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for ErrorNotifier {
    fn source_name(&self) -> &str {
        "ErrorNotifier"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Notifier for ErrorNotifier {
    fn subscribe(&mut self, handler: Handler) {
        self.subscribers.push(handler);
    }

    fn unsubscribe(&mut self, handler: &Handler) -> bool {
        self.subscribers.remove_last(handler)
    }

    fn publish(&self, source: &dyn EventSource, event: ErrorEvent) {
        debug!(
            kind = event.kind(),
            subscribers = self.subscribers.len(),
            "publishing error event"
        );
        self.subscribers.dispatch(source, &event);
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Overriding channel: its own subscriber list, and every delivered text is
/// rewritten to `[<label> HH:MM:SS] <text>`.
#[derive(Debug)]
pub struct PrefixedNotifier {
    label: String,
    backing: SubscriberList,
}

impl PrefixedNotifier {
    /// Default prefix label.
    pub const DEFAULT_LABEL: &'static str = "DerivedEvent";

    pub fn new() -> Self {
        Self::with_label(Self::DEFAULT_LABEL)
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            backing: SubscriberList::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for PrefixedNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for PrefixedNotifier {
    fn source_name(&self) -> &str {
        &self.label
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Notifier for PrefixedNotifier {
    fn subscribe(&mut self, handler: Handler) {
        self.backing.push(handler);
    }

    fn unsubscribe(&mut self, handler: &Handler) -> bool {
        self.backing.remove_last(handler)
    }

    fn publish(&self, source: &dyn EventSource, event: ErrorEvent) {
        if self.backing.is_empty() {
            return;
        }
        let text = format!(
            "[{} {}] {}",
            self.label,
            Local::now().format("%H:%M:%S"),
            event.text()
        );
        let event = ErrorEvent::new(event.category(), event.kind(), text);
        debug!(
            kind = event.kind(),
            subscribers = self.backing.len(),
            label = %self.label,
            "publishing prefixed error event"
        );
        self.backing.dispatch(source, &event);
    }

    fn subscriber_count(&self) -> usize {
        self.backing.len()
    }
}
