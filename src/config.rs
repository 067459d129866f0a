//! Configuration for record keeping.
//!
//! Controls how student identifiers are generated, which label the prefixed
//! notifier stamps on rewritten events, and how large stream sinks buffer.

use crate::channel::PrefixedNotifier;
use crate::error::{RecordsError, RecordsResult};

/// Base trait for configuration types.
///
/// # Example
///
/// ```rust
/// use institute_records::Config;
///
/// struct Quiet;
///
/// impl Config for Quiet {}
///
/// assert!(Quiet.validate().is_ok());
/// assert!(!Quiet.is_verbose());
/// ```
pub trait Config: Send + Sync {
    /// Returns whether every error event should also be traced.
    fn is_verbose(&self) -> bool {
        false
    }

    /// Validates the configuration.
    fn validate(&self) -> RecordsResult<()> {
        Ok(())
    }
}

/// Default configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordsConfig {
    /// Prefix of generated student ids
    pub id_prefix: String,
    /// Zero-padded width of the numeric part of student ids
    pub id_width: usize,
    /// Label stamped by the prefixed notifier
    pub derived_label: String,
    /// Buffer size of stream sinks
    pub stream_buffer: usize,
    /// Trace events published on the shared notifier
    pub verbose: bool,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            id_prefix: "S".to_string(),
            id_width: 3,
            derived_label: PrefixedNotifier::DEFAULT_LABEL.to_string(),
            stream_buffer: 100,
            verbose: false,
        }
    }
}

impl RecordsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_id_width(mut self, width: usize) -> Self {
        self.id_width = width;
        self
    }

    pub fn with_derived_label(mut self, label: impl Into<String>) -> Self {
        self.derived_label = label.into();
        self
    }

    pub fn with_stream_buffer(mut self, size: usize) -> Self {
        self.stream_buffer = size;
        self
    }

    /// Trace every event published on a registry's shared notifier.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Format the `n`-th student id, e.g. `S007`.
    pub fn student_id(&self, n: u32) -> String {
        format!("{}{:0width$}", self.id_prefix, n, width = self.id_width)
    }

    /// A prefixed notifier carrying this configuration's label.
    pub fn prefixed_notifier(&self) -> PrefixedNotifier {
        PrefixedNotifier::with_label(self.derived_label.clone())
    }
}

impl Config for RecordsConfig {
    fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn validate(&self) -> RecordsResult<()> {
        if self.id_prefix.trim().is_empty() {
            return Err(RecordsError::InvalidConfig("id_prefix must not be empty".into()));
        }
        if self.id_width == 0 {
            return Err(RecordsError::InvalidConfig("id_width must be greater than 0".into()));
        }
        if self.derived_label.trim().is_empty() {
            return Err(RecordsError::InvalidConfig("derived_label must not be empty".into()));
        }
        if self.stream_buffer == 0 {
            return Err(RecordsError::InvalidConfig(
                "stream_buffer must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
