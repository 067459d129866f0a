//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! from the crate for convenient glob imports.
//!
//! # Example
//!
//! ```rust
//! use institute_records::prelude::*;
//! ```

// Configuration
pub use crate::config::{Config, RecordsConfig};

// Capabilities
pub use crate::capability::{FinancialOperations, HasId, MarkEditable, Notifiable, Printable};

// Channels and events
pub use crate::channel::{
    handler, tracing_handler, ErrorNotifier, EventSource, EventSourceExt, Handler, Notifier,
    PrefixedNotifier,
};
pub use crate::event::{ErrorCategory, ErrorEvent};
pub use crate::stream::{stream_handler, EventStream, StreamBuilder};

// Entities
pub use crate::model::{Course, Group, Institute};
pub use crate::money::Money;
pub use crate::registry::{Registry, RegistryBuilder};
pub use crate::student::{Notification, Recipient, Student};

// Operations and queries
pub use crate::actions::{capability_probe, ActionChain};
pub use crate::faults::FaultDemo;
pub use crate::query::{best_institute, count_excellent, ExcellenceReport};

// Errors
pub use crate::error::{OperationError, OperationResult, RecordsError, RecordsResult};
