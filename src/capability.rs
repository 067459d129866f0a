//! Small capability contracts implemented by [`Student`](crate::Student).
//!
//! Each trait covers one concern so callers can depend on exactly the
//! behaviour they use: identification, printing, mark editing, finances and
//! notifications.

use crate::money::Money;

/// Entities with a system-assigned identifier.
pub trait HasId {
    fn id(&self) -> &str;
}

/// Entities that can render a one-line summary.
pub trait Printable {
    /// Returns the summary line.
    fn summary(&self) -> String;

    /// Log the summary at info level.
    fn print(&self) {
        tracing::info!("{}", self.summary());
    }
}

/// Entities holding subject marks.
pub trait MarkEditable {
    /// Set or replace the mark for `subject`.
    ///
    /// Invalid input is reported through the entity's notification channel
    /// and leaves the marks unchanged.
    fn put_mark(&mut self, subject: &str, mark: u8);

    /// Remove every mark.
    fn clear_marks(&mut self);
}

/// Entities with a non-negative balance.
///
/// # Example
///
/// ```rust
/// use institute_records::{FinancialOperations, Money, Student};
///
/// let mut student = Student::new("S001", "Ada");
/// student.deposit(Money::from_units(100));
/// student.withdraw(Money::from_units(500)); // rejected, balance unchanged
/// assert_eq!(student.balance(), Money::from_units(100));
/// ```
pub trait FinancialOperations {
    fn balance(&self) -> Money;

    /// Increase the balance by a positive amount.
    fn deposit(&mut self, amount: Money);

    /// Decrease the balance by a positive amount not exceeding it.
    fn withdraw(&mut self, amount: Money);
}

/// Entities that can receive notifications.
pub trait Notifiable {
    /// Contact address, if one is configured.
    fn email(&self) -> Option<&str>;

    /// Set or clear the contact address. Blank addresses clear it.
    fn set_email(&mut self, email: Option<String>);

    /// Deliver a non-blank message.
    fn send_notification(&mut self, message: &str);
}
