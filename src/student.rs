//! Students and their validated operations.
//!
//! Every mutator validates its input first. A rejected call publishes an
//! [`ErrorEvent`](crate::ErrorEvent) on the student's own channel and returns
//! normally with the student unchanged; it never returns an error to the
//! caller. Callers that care about outcomes subscribe to the channel or
//! inspect the resulting state.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use tracing::info;

use crate::capability::{FinancialOperations, HasId, MarkEditable, Notifiable, Printable};
use crate::channel::{ErrorNotifier, EventSource, Handler, Notifier};
use crate::error::{OperationError, OperationResult};
use crate::money::Money;

/// Kind code for rejected mark assignments.
pub const PUT_MARK_ERROR: &str = "PutMarkError";
/// Kind code for rejected deposits.
pub const DEPOSIT_ERROR: &str = "DepositError";
/// Kind code for rejected withdrawals.
pub const WITHDRAW_ERROR: &str = "WithdrawError";
/// Kind code for rejected notifications.
pub const SEND_NOTIFICATION_ERROR: &str = "SendNotificationError";
/// Kind code for marks that could not be evaluated.
pub const IS_EXCELLENT_ERROR: &str = "IsExcellentError";

/// Lowest valid mark.
pub const MIN_MARK: u8 = 2;
/// Highest valid mark, also the only mark an excellent student holds.
pub const MAX_MARK: u8 = 5;

/// Where a notification was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Address(String),
    /// No contact address was configured.
    Unaddressed,
}

/// A delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub student: String,
    pub recipient: Recipient,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.recipient {
            Recipient::Address(address) => write!(
                f,
                "Notification for {} ({}): {}",
                self.student, address, self.message
            ),
            Recipient::Unaddressed => write!(
                f,
                "Notification for {} (no email): {}",
                self.student, self.message
            ),
        }
    }
}

/// A student with marks, a balance and an error channel.
#[derive(Debug)]
pub struct Student {
    id: String,
    name: String,
    marks: BTreeMap<String, u8>,
    balance: Money,
    email: Option<String>,
    outbox: Vec<Notification>,
    channel: Box<dyn Notifier>,
}

impl Student {
    /// Create a student with an empty record and a base [`ErrorNotifier`].
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            marks: BTreeMap::new(),
            balance: Money::ZERO,
            email: None,
            outbox: Vec::new(),
            channel: Box::new(ErrorNotifier::new()),
        }
    }

    /// Replace the student's channel. Existing subscriptions are dropped
    /// with the old channel.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.channel = notifier;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn marks(&self) -> &BTreeMap<String, u8> {
        &self.marks
    }

    /// Raw access to the mark table, bypassing validation.
    ///
    /// Used for bulk loading; [`Student::is_excellent`] reports any value
    /// outside 2..=5 found here.
    pub fn marks_mut(&mut self) -> &mut BTreeMap<String, u8> {
        &mut self.marks
    }

    /// Notifications delivered so far, oldest first.
    pub fn outbox(&self) -> &[Notification] {
        &self.outbox
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.channel.as_ref()
    }

    pub fn notifier_mut(&mut self) -> &mut dyn Notifier {
        self.channel.as_mut()
    }

    pub fn subscribe(&mut self, handler: Handler) {
        self.channel.subscribe(handler);
    }

    pub fn unsubscribe(&mut self, handler: &Handler) -> bool {
        self.channel.unsubscribe(handler)
    }

    /// `true` iff there is at least one mark and every mark is 5.
    ///
    /// A mark outside 2..=5 is reported as `IsExcellentError` and the
    /// student is treated as not excellent.
    pub fn is_excellent(&self) -> bool {
        match self.evaluate_excellence() {
            Ok(excellent) => excellent,
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    fn evaluate_excellence(&self) -> OperationResult<bool> {
        if let Some((subject, mark)) = self
            .marks
            .iter()
            .find(|(_, mark)| !(MIN_MARK..=MAX_MARK).contains(*mark))
        {
            return Err(OperationError::evaluation(
                IS_EXCELLENT_ERROR,
                format!("Mark {} for '{}' is outside {}..{}", mark, subject, MIN_MARK, MAX_MARK),
            ));
        }
        Ok(!self.marks.is_empty() && self.marks.values().all(|&mark| mark == MAX_MARK))
    }

    fn report(&self, err: OperationError) {
        self.channel.publish(self, err.into_event());
    }

    fn validate_mark(subject: &str, mark: u8) -> OperationResult<()> {
        if subject.trim().is_empty() {
            return Err(OperationError::invalid_argument(
                PUT_MARK_ERROR,
                "Subject name must not be empty",
            ));
        }
        if !(MIN_MARK..=MAX_MARK).contains(&mark) {
            return Err(OperationError::invalid_argument(
                PUT_MARK_ERROR,
                format!("Mark must be between {} and {}, got {}", MIN_MARK, MAX_MARK, mark),
            ));
        }
        Ok(())
    }

    /// Returns the balance after the deposit.
    fn validate_deposit(&self, amount: Money) -> OperationResult<Money> {
        if !amount.is_positive() {
            return Err(OperationError::invalid_argument(
                DEPOSIT_ERROR,
                format!("Deposit amount must be positive, got {}", amount),
            ));
        }
        self.balance.checked_add(amount).ok_or_else(|| {
            OperationError::invalid_argument(
                DEPOSIT_ERROR,
                format!("Deposit of {} would overflow balance {}", amount, self.balance),
            )
        })
    }

    /// Returns the balance after the withdrawal.
    fn validate_withdraw(&self, amount: Money) -> OperationResult<Money> {
        if !amount.is_positive() {
            return Err(OperationError::invalid_argument(
                WITHDRAW_ERROR,
                format!("Withdrawal amount must be positive, got {}", amount),
            ));
        }
        if amount > self.balance {
            return Err(OperationError::insufficient_funds(
                WITHDRAW_ERROR,
                format!("Balance {} is less than {}", self.balance, amount),
            ));
        }
        self.balance.checked_sub(amount).ok_or_else(|| {
            OperationError::invalid_argument(
                WITHDRAW_ERROR,
                format!("Withdrawal of {} cannot be applied to {}", amount, self.balance),
            )
        })
    }

    fn validate_message(message: &str) -> OperationResult<()> {
        if message.trim().is_empty() {
            return Err(OperationError::invalid_argument(
                SEND_NOTIFICATION_ERROR,
                "Message must not be empty",
            ));
        }
        Ok(())
    }
}

impl EventSource for Student {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl HasId for Student {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Printable for Student {
    fn summary(&self) -> String {
        self.to_string()
    }
}

impl MarkEditable for Student {
    fn put_mark(&mut self, subject: &str, mark: u8) {
        match Self::validate_mark(subject, mark) {
            Ok(()) => {
                self.marks.insert(subject.to_string(), mark);
            }
            Err(err) => self.report(err),
        }
    }

    fn clear_marks(&mut self) {
        self.marks.clear();
    }
}

impl FinancialOperations for Student {
    fn balance(&self) -> Money {
        self.balance
    }

    fn deposit(&mut self, amount: Money) {
        match self.validate_deposit(amount) {
            Ok(balance) => {
                self.balance = balance;
                info!(student = %self.id, %amount, balance = %self.balance, "deposit");
            }
            Err(err) => self.report(err),
        }
    }

    fn withdraw(&mut self, amount: Money) {
        match self.validate_withdraw(amount) {
            Ok(balance) => {
                self.balance = balance;
                info!(student = %self.id, %amount, balance = %self.balance, "withdrawal");
            }
            Err(err) => self.report(err),
        }
    }
}

impl Notifiable for Student {
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn set_email(&mut self, email: Option<String>) {
        self.email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
    }

    fn send_notification(&mut self, message: &str) {
        if let Err(err) = Self::validate_message(message) {
            self.report(err);
            return;
        }
        let recipient = match &self.email {
            Some(address) => Recipient::Address(address.clone()),
            None => Recipient::Unaddressed,
        };
        let notification = Notification {
            student: self.name.clone(),
            recipient,
            message: message.to_string(),
        };
        info!(student = %self.id, "{}", notification);
        self.outbox.push(notification);
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID:{}), excellent: {}, balance: {}",
            self.name,
            self.id,
            self.is_excellent(),
            self.balance
        )
    }
}
