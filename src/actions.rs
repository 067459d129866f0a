//! Ordered chains of student actions.
//!
//! An [`ActionChain`] is a list of closures run one after another against
//! the same student, in the order they were added.

use std::fmt;

use crate::capability::{FinancialOperations, HasId, MarkEditable, Notifiable, Printable};
use crate::money::Money;
use crate::student::Student;

/// One step of a chain. Steps append lines to the shared transcript.
pub type StudentAction = Box<dyn Fn(&mut Student, &mut Vec<String>) + Send + Sync>;

/// Subject used by the capability probe.
pub const PROBE_SUBJECT: &str = "Probe subject";

/// An ordered list of actions run against one student.
#[derive(Default)]
pub struct ActionChain {
    actions: Vec<StudentAction>,
}

impl ActionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn push<F>(&mut self, action: F)
    where
        F: Fn(&mut Student, &mut Vec<String>) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
    }

    /// Builder form of [`ActionChain::push`].
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Student, &mut Vec<String>) + Send + Sync + 'static,
    {
        self.push(action);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run every action in order and return the transcript.
    pub fn run(&self, student: &mut Student) -> Vec<String> {
        let mut transcript = Vec::new();
        for action in &self.actions {
            action(student, &mut transcript);
        }
        transcript
    }
}

impl fmt::Debug for ActionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionChain")
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// Exercise every capability of a student in one pass.
///
/// Identification, printing, mark editing, deposit of 1000, withdrawal of
/// 300 and a notification. Failures surface on the student's channel.
pub fn capability_probe() -> ActionChain {
    ActionChain::new()
        .then(|s, out| out.push(format!("Student id: {}", s.id())))
        .then(|s, out| out.push(format!("Student: {}", s.summary())))
        .then(|s, out| {
            s.put_mark(PROBE_SUBJECT, 5);
            out.push(format!("Mark added for '{}': 5", PROBE_SUBJECT));
        })
        .then(|s, out| out.push(format!("After adding mark: {}", s.summary())))
        .then(|s, out| {
            s.clear_marks();
            out.push("Marks cleared".to_string());
        })
        .then(|s, out| out.push(format!("After clearing marks: {}", s.summary())))
        .then(|s, out| {
            s.deposit(Money::from_units(1000));
            out.push(format!("Balance after deposit: {}", s.balance()));
        })
        .then(|s, out| {
            s.withdraw(Money::from_units(300));
            out.push(format!("Balance after withdrawal: {}", s.balance()));
        })
        .then(|s, out| out.push(format!("After financial operations: {}", s.summary())))
        .then(|s, out| {
            s.send_notification("Probe notification about academic progress");
            if let Some(sent) = s.outbox().last() {
                out.push(sent.to_string());
            }
        })
}
