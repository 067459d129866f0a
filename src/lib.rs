//! # Institute Records
//!
//! Academic records for institutes (institutes → courses → groups →
//! students) with an overridable error-notification channel.
//!
//! ## Overview
//!
//! Student operations validate their input and never fail loudly. A
//! rejected call publishes an [`ErrorEvent`] on the student's channel and
//! leaves the student unchanged:
//! - **Errors as events**: invalid marks, non-positive amounts, overdrafts
//!   and blank messages become `{kind, text, time}` events
//! - **Overridable dispatch**: any [`Notifier`] can stand behind a channel;
//!   [`PrefixedNotifier`] rewrites event text with its own label
//! - **One handler shape**: demonstrated runtime faults ([`FaultDemo`]) use
//!   the same event type as operation failures
//!
//! ## Quick Start
//!
//! ```rust
//! use institute_records::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let mut registry = Registry::new();
//! let mut student = registry.enroll("Ada").unwrap();
//!
//! let kinds = Arc::new(Mutex::new(Vec::new()));
//! let sink = kinds.clone();
//! student.subscribe(handler(move |_, event| {
//!     sink.lock().unwrap().push(event.kind().to_string());
//! }));
//!
//! student.put_mark("Math", 7);
//! student.withdraw(Money::from_units(10));
//!
//! assert!(student.marks().is_empty());
//! assert_eq!(*kinds.lock().unwrap(), vec!["PutMarkError", "WithdrawError"]);
//! ```

mod actions;
mod capability;
mod channel;
mod config;
mod error;
mod event;
mod faults;
mod model;
mod money;
mod query;
mod registry;
mod student;
pub mod stream;

pub mod prelude;

// Re-export core types
pub use actions::{capability_probe, ActionChain, StudentAction, PROBE_SUBJECT};
pub use capability::{FinancialOperations, HasId, MarkEditable, Notifiable, Printable};
pub use channel::{
    handler, tracing_handler, ErrorNotifier, EventSource, EventSourceExt, Handler, Notifier,
    PrefixedNotifier, SubscriberList,
};
pub use config::{Config, RecordsConfig};
pub use error::{OperationError, OperationResult, RecordsError, RecordsResult};
pub use event::{ErrorCategory, ErrorEvent};
pub use faults::{FaultDemo, FaultOrigin, ALL_FAULTS};
pub use model::{Course, Group, Institute, MAX_COURSE, MIN_COURSE};
pub use money::Money;
pub use query::{best_institute, count_excellent, ExcellenceReport};
pub use registry::{Registry, RegistryBuilder};
pub use stream::{stream_handler, EventStream, StreamBuilder};
pub use student::{
    Notification, Recipient, Student, DEPOSIT_ERROR, IS_EXCELLENT_ERROR, MAX_MARK, MIN_MARK,
    PUT_MARK_ERROR, SEND_NOTIFICATION_ERROR, WITHDRAW_ERROR,
};
