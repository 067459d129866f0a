//! Async stream sinks for error events.
//!
//! Channels dispatch synchronously, so a stream sink never waits: the
//! handler uses `try_send` and drops the event (with a warning) when the
//! buffer is full or the stream has been dropped.

use std::pin::Pin;

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;

use crate::channel::{handler, Handler};
use crate::event::ErrorEvent;

/// Type alias for a boxed async stream of events.
pub type EventStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// Default buffer size of stream sinks.
pub const DEFAULT_BUFFER: usize = 100;

/// Builder for stream sinks.
///
/// # Example
///
/// ```rust
/// use institute_records::{ErrorNotifier, Notifier, StreamBuilder};
///
/// let (sink, _events) = StreamBuilder::new().buffer_size(16).build();
///
/// let mut notifier = ErrorNotifier::new();
/// notifier.subscribe(sink);
/// ```
pub struct StreamBuilder {
    buffer_size: usize,
}

impl StreamBuilder {
    /// Create a new stream builder with default settings.
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER,
        }
    }

    /// Set the buffer size for the underlying channel.
    ///
    /// Default is 100. A size of 0 is raised to 1.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Build the handler and the stream it feeds.
    pub fn build(self) -> (Handler, EventStream<ErrorEvent>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let sink = handler(move |source, event| {
            if let Err(err) = tx.try_send(event.clone()) {
                let reason = match err {
                    mpsc::error::TrySendError::Full(_) => "buffer full",
                    mpsc::error::TrySendError::Closed(_) => "stream closed",
                };
                warn!(
                    source = source.source_name(),
                    kind = event.kind(),
                    reason,
                    "dropping error event"
                );
            }
        });
        let stream: EventStream<ErrorEvent> = Box::pin(ReceiverStream::new(rx));
        (sink, stream)
    }
}

impl Default for StreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a stream sink with the default buffer size.
pub fn stream_handler() -> (Handler, EventStream<ErrorEvent>) {
    StreamBuilder::new().build()
}

/// Create a stream sink with a specific buffer size.
pub fn stream_handler_with_buffer(buffer_size: usize) -> (Handler, EventStream<ErrorEvent>) {
    StreamBuilder::new().buffer_size(buffer_size).build()
}
