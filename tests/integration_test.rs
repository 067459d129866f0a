//! Integration tests for institute records
//!
//! These tests drive the public API the way a console front end would:
//! build the tree, subscribe to channels, run operations and queries.

use institute_records::prelude::*;
use institute_records::{
    DEPOSIT_ERROR, IS_EXCELLENT_ERROR, PUT_MARK_ERROR, SEND_NOTIFICATION_ERROR, WITHDRAW_ERROR,
};
use std::sync::{Arc, Mutex};

// =============================================================================
// Helpers
// =============================================================================

type Log = Arc<Mutex<Vec<ErrorEvent>>>;

fn recorder() -> (Handler, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let h = handler(move |_, event| sink.lock().unwrap().push(event.clone()));
    (h, log)
}

fn kinds(log: &Log) -> Vec<String> {
    log.lock()
        .unwrap()
        .iter()
        .map(|e| e.kind().to_string())
        .collect()
}

/// Two institutes shaped like the console program's starting data.
fn seeded_registry() -> Registry {
    let mut registry = Registry::new();

    let it = registry.add_institute("IT Institute").unwrap();
    it.add_subject("Programming").unwrap();
    it.add_subject("Mathematics").unwrap();
    let group = it.course_or_insert(1).unwrap().add_group("FI22").unwrap();

    let mut first = Student::new("S001", "Maxim Kozlov");
    first.put_mark("Programming", 5);
    first.put_mark("Mathematics", 5);
    first.set_email(Some("kozlov@edu.example".to_string()));
    group.add_student(first);

    let mut second = Student::new("S002", "Marmok");
    second.put_mark("Programming", 4);
    second.put_mark("Mathematics", 5);
    group.add_student(second);

    let eng = registry.add_institute("Engineering Institute").unwrap();
    eng.add_subject("Physics").unwrap();
    let group = eng.course_or_insert(1).unwrap().add_group("FI21").unwrap();
    let mut third = Student::new("S003", "Armen Records");
    third.put_mark("Physics", 5);
    group.add_student(third);

    registry.reserve_ids_until(4);
    registry
}

// =============================================================================
// Operation Layer
// =============================================================================

#[test]
fn test_invalid_marks_never_change_state() {
    let (h, log) = recorder();
    let mut student = Student::new("S001", "Ada");
    student.subscribe(h);
    student.put_mark("Math", 4);

    for (subject, mark) in [("Math", 1u8), ("Math", 6), ("", 5), ("  ", 3), ("Phys", 0)] {
        let before = student.marks().clone();
        let events_before = log.lock().unwrap().len();

        student.put_mark(subject, mark);

        assert_eq!(student.marks(), &before);
        let events = log.lock().unwrap();
        assert_eq!(events.len(), events_before + 1);
        let last = events.last().unwrap();
        assert_eq!(last.kind(), PUT_MARK_ERROR);
        assert_eq!(last.category(), ErrorCategory::InvalidArgument);
    }
}

#[test]
fn test_deposit_amounts() {
    let (h, log) = recorder();
    let mut student = Student::new("S001", "Ada");
    student.subscribe(h);

    for cents in [-500i64, -1, 0] {
        student.deposit(Money::from_cents(cents));
    }
    assert_eq!(student.balance(), Money::ZERO);
    assert_eq!(kinds(&log), vec![DEPOSIT_ERROR; 3]);

    student.deposit(Money::from_cents(1));
    student.deposit(Money::from_cents(999));
    assert_eq!(student.balance(), Money::from_units(10));
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[test]
fn test_deposit_past_balance_limit() {
    let (h, log) = recorder();
    let mut student = Student::new("S001", "Ada");
    student.subscribe(h);

    student.deposit(Money::from_cents(i64::MAX));
    student.deposit(Money::from_cents(1));

    assert_eq!(student.balance(), Money::from_cents(i64::MAX));
    assert_eq!(kinds(&log), vec![DEPOSIT_ERROR]);
    assert_eq!(log.lock().unwrap()[0].category(), ErrorCategory::InvalidArgument);
}

#[test]
fn test_balance_never_negative() {
    let mut student = Student::new("S001", "Ada");
    let steps: [(bool, i64); 8] = [
        (true, 100),
        (false, 50),
        (false, 60),
        (true, -20),
        (false, 50),
        (false, 1),
        (true, 5),
        (false, 5),
    ];

    for (is_deposit, units) in steps {
        let amount = Money::from_units(units);
        if is_deposit {
            student.deposit(amount);
        } else {
            student.withdraw(amount);
        }
        assert!(student.balance() >= Money::ZERO);
    }
    assert_eq!(student.balance(), Money::ZERO);
}

#[test]
fn test_withdraw_failure_kinds() {
    let (h, log) = recorder();
    let mut student = Student::new("S001", "Ada");
    student.subscribe(h);

    student.deposit(Money::from_units(1500));
    student.withdraw(Money::from_units(500));
    student.withdraw(Money::from_units(1200));
    student.withdraw(Money::from_units(-1));

    assert_eq!(student.balance(), Money::from_units(1000));
    let events = log.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].category(), ErrorCategory::InsufficientFunds);
    assert_eq!(events[0].kind(), WITHDRAW_ERROR);
    assert_eq!(events[1].category(), ErrorCategory::InvalidArgument);
}

#[test]
fn test_notification_delivery() {
    let (h, log) = recorder();
    let mut student = Student::new("S010", "Ada");
    student.subscribe(h);

    student.send_notification("");
    assert_eq!(kinds(&log), vec![SEND_NOTIFICATION_ERROR]);

    student.send_notification("Balance changed");
    student.set_email(Some("ada@edu.example".to_string()));
    student.send_notification("Balance changed");

    let delivered: Vec<&Recipient> = student.outbox().iter().map(|n| &n.recipient).collect();
    assert_eq!(
        delivered,
        vec![
            &Recipient::Unaddressed,
            &Recipient::Address("ada@edu.example".to_string())
        ]
    );
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_excellence_examples() {
    let mut student = Student::new("S001", "Ada");
    assert!(!student.is_excellent());

    student.put_mark("Math", 5);
    assert!(student.is_excellent());

    student.put_mark("Phys", 4);
    assert!(!student.is_excellent());
}

#[test]
fn test_malformed_marks_reported_once_per_evaluation() {
    let (h, log) = recorder();
    let mut student = Student::new("S001", "Ada");
    student.subscribe(h);
    student.marks_mut().insert("Math".to_string(), 0);

    assert!(!student.is_excellent());
    assert_eq!(kinds(&log), vec![IS_EXCELLENT_ERROR]);
}

// =============================================================================
// Notification Channel
// =============================================================================

#[test]
fn test_handlers_invoked_in_subscription_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let (first, second) = (order.clone(), order.clone());

    let mut student = Student::new("S001", "Ada");
    student.subscribe(handler(move |_, _| first.lock().unwrap().push("H1")));
    student.subscribe(handler(move |_, _| second.lock().unwrap().push("H2")));

    student.deposit(Money::ZERO);

    assert_eq!(*order.lock().unwrap(), vec!["H1", "H2"]);
}

#[test]
fn test_events_arrive_in_publish_order() {
    let (h, log) = recorder();
    let mut student = Student::new("S001", "Ada");
    student.subscribe(h);

    student.put_mark("Math", 9);
    student.deposit(Money::ZERO);
    student.withdraw(Money::from_units(1));
    student.send_notification(" ");

    assert_eq!(
        kinds(&log),
        vec![PUT_MARK_ERROR, DEPOSIT_ERROR, WITHDRAW_ERROR, SEND_NOTIFICATION_ERROR]
    );
}

#[test]
fn test_handler_sees_raising_student() {
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = names.clone();
    let mut student = Student::new("S007", "Ada");
    student.subscribe(handler(move |source, _| {
        let student = source.downcast_ref::<Student>().unwrap();
        sink.lock().unwrap().push(student.id().to_string());
    }));

    student.put_mark("", 5);
    assert_eq!(*names.lock().unwrap(), vec!["S007"]);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let (h, log) = recorder();
    let mut student = Student::new("S001", "Ada");
    student.subscribe(h.clone());
    student.deposit(Money::ZERO);

    assert!(student.unsubscribe(&h));
    assert!(!student.unsubscribe(&h));
    student.deposit(Money::ZERO);

    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_override_visible_through_base_contract() {
    let (h, log) = recorder();
    let mut notifier: Box<dyn Notifier> = Box::new(ErrorNotifier::new());
    notifier.subscribe(h.clone());
    FaultDemo::new(notifier.as_ref()).divide_by_zero();

    notifier = Box::new(PrefixedNotifier::new());
    notifier.subscribe(h);
    FaultDemo::new(notifier.as_ref()).divide_by_zero();

    let events = log.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert!(!events[0].text().starts_with("[DerivedEvent"));
    assert!(events[1].text().starts_with("[DerivedEvent "));
    assert!(events[1].text().ends_with(events[0].text()));
}

#[test]
fn test_tracing_handler_is_a_plain_subscriber() {
    let mut student = Student::new("S001", "Ada");
    student.subscribe(tracing_handler());
    student.put_mark("Math", 1);
    assert_eq!(student.notifier().subscriber_count(), 1);
}

// =============================================================================
// Fault Demonstration
// =============================================================================

#[test]
fn test_shared_notifier_fault_demo() {
    let (h, log) = recorder();
    let mut registry = seeded_registry();
    registry.notifier_mut().subscribe(h);

    registry.fault_demo().run_all();

    assert_eq!(
        kinds(&log),
        vec![
            "StackOverflow",
            "ArrayTypeMismatch",
            "DivideByZero",
            "IndexOutOfRange",
            "InvalidCast",
            "OutOfMemory",
            "Overflow",
        ]
    );
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .all(|e| e.text().starts_with("[DerivedEvent ")));
}

// =============================================================================
// Query Engine
// =============================================================================

#[test]
fn test_count_excellent_two_groups() {
    let mut institute = Institute::new("IT");
    let course = institute.course_or_insert(2).unwrap();
    course
        .add_group("A")
        .unwrap()
        .add_student(Student::new("S001", "Ada"))
        .put_mark("Math", 5);
    course
        .add_group("B")
        .unwrap()
        .add_student(Student::new("S002", "Bob"))
        .put_mark("Math", 4);

    assert_eq!(count_excellent(&institute), 1);
}

#[test]
fn test_best_institute_tie_goes_to_first() {
    let institutes: Vec<Institute> = [2usize, 3, 3]
        .iter()
        .enumerate()
        .map(|(i, &excellent)| {
            let mut institute = Institute::new(format!("inst-{}", i));
            let group = institute
                .course_or_insert(1)
                .unwrap()
                .add_group("G")
                .unwrap();
            for n in 0..excellent {
                group
                    .add_student(Student::new(format!("S{}{}", i, n), "x"))
                    .put_mark("Math", 5);
            }
            institute
        })
        .collect();

    let (best, count) = best_institute(&institutes).unwrap();
    assert_eq!(best.name(), "inst-1");
    assert_eq!(count, 3);
}

#[test]
fn test_seeded_report() {
    let mut registry = seeded_registry();
    assert_eq!(
        registry.excellence_report().to_string(),
        "Institute with the most excellent students: IT Institute. Count: 1."
    );

    let next = registry.enroll("New Student").unwrap();
    assert_eq!(next.id(), "S004");

    registry.remove_institute("IT Institute");
    registry.remove_institute("Engineering Institute");
    assert_eq!(registry.excellence_report(), ExcellenceReport::NoData);
}

// =============================================================================
// Action Chains
// =============================================================================

#[test]
fn test_capability_probe_on_seeded_student() {
    let (h, log) = recorder();
    let mut registry = seeded_registry();
    let student = registry
        .get_mut("IT Institute")
        .unwrap()
        .course_mut(1)
        .unwrap()
        .group_mut("fi22")
        .unwrap()
        .student_mut("S001")
        .unwrap();
    student.subscribe(h);

    let transcript = capability_probe().run(student);

    assert_eq!(transcript.len(), 10);
    assert!(transcript[9].contains("kozlov@edu.example"));
    assert!(log.lock().unwrap().is_empty());
    assert!(student.marks().is_empty());
}
