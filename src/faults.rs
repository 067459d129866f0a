//! Fault-category demonstration.
//!
//! Each method provokes one canonical fault, catches it where it happens and
//! reports it through the shared notifier in the usual [`ErrorEvent`] shape.
//! Out-of-memory and stack-overflow cannot be recovered from, so those two
//! are simulated: the event is built and raised directly.
//!
//! [`ErrorEvent`]: crate::ErrorEvent

use std::any::{type_name, Any};
use std::hint::black_box;

use crate::channel::{EventSource, Notifier};
use crate::event::ErrorCategory;
use crate::student::Student;

/// Raises the seven demonstration faults on a notifier.
#[derive(Debug)]
pub struct FaultDemo<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> FaultDemo<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        Self { notifier }
    }

    fn raise(&self, category: ErrorCategory, text: &str) {
        self.notifier
            .raise_error(&FaultOrigin, category, category.as_str(), text);
    }

    /// Run every demonstration, stack overflow first and overflow last.
    pub fn run_all(&self) {
        self.stack_overflow();
        self.array_type_mismatch();
        self.divide_by_zero();
        self.index_out_of_range();
        self.invalid_cast();
        self.out_of_memory();
        self.overflow();
    }

    pub fn divide_by_zero(&self) {
        let dividend: i32 = black_box(1);
        let divisor: i32 = black_box(0);
        if dividend.checked_div(divisor).is_none() {
            self.raise(ErrorCategory::DivideByZero, "Attempted to divide by zero.");
        }
    }

    pub fn index_out_of_range(&self) {
        let values = [0i32; 2];
        let index = black_box(5usize);
        if values.get(index).is_none() {
            self.raise(
                ErrorCategory::IndexOutOfRange,
                &format!(
                    "Index {} was outside the bounds of the array of length {}.",
                    index,
                    values.len()
                ),
            );
        }
    }

    pub fn array_type_mismatch(&self) {
        let mut slots = vec![String::new(); 2];
        let value: Box<dyn Any> = Box::new(123i32);
        if let Err(message) = store_element(&mut slots, 0, value) {
            self.raise(ErrorCategory::ArrayTypeMismatch, &message);
        }
    }

    pub fn invalid_cast(&self) {
        let object: Box<dyn Any> = Box::new("hello");
        if object.downcast_ref::<Student>().is_none() {
            self.raise(
                ErrorCategory::InvalidCast,
                &format!(
                    "Unable to cast object of type '{}' to type '{}'.",
                    type_name::<&str>(),
                    type_name::<Student>()
                ),
            );
        }
    }

    pub fn overflow(&self) {
        let big: i32 = black_box(i32::MAX);
        if big.checked_add(1).is_none() {
            self.raise(
                ErrorCategory::Overflow,
                "Arithmetic operation resulted in an overflow.",
            );
        }
    }

    /// Simulated: no memory is actually exhausted.
    pub fn out_of_memory(&self) {
        self.raise(ErrorCategory::OutOfMemory, "Simulated out-of-memory condition");
    }

    /// Simulated: no recursion actually takes place.
    pub fn stack_overflow(&self) {
        self.raise(ErrorCategory::StackOverflow, "Simulated stack overflow");
    }
}

/// Source passed to handlers for demonstrated faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultOrigin;

impl EventSource for FaultOrigin {
    fn source_name(&self) -> &str {
        "FaultDemo"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Every demonstrated category, in [`FaultDemo::run_all`] order.
pub const ALL_FAULTS: [ErrorCategory; 7] = [
    ErrorCategory::StackOverflow,
    ErrorCategory::ArrayTypeMismatch,
    ErrorCategory::DivideByZero,
    ErrorCategory::IndexOutOfRange,
    ErrorCategory::InvalidCast,
    ErrorCategory::OutOfMemory,
    ErrorCategory::Overflow,
];

/// Store a type-erased value into a typed slot array.
fn store_element(slots: &mut [String], index: usize, value: Box<dyn Any>) -> Result<(), String> {
    let value = value.downcast::<String>().map_err(|_| {
        format!(
            "Attempted to store an element of an incompatible type into an array of {}.",
            type_name::<String>()
        )
    })?;
    let slot = slots
        .get_mut(index)
        .ok_or_else(|| format!("Index {} was outside the bounds of the array.", index))?;
    *slot = *value;
    Ok(())
}
