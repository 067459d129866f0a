//! Registry of institutes.
//!
//! The `Registry` owns every institute under a unique name, hands out
//! system-assigned student identifiers and carries the shared notifier used
//! by cross-cutting fault reporting.

use std::collections::HashMap;

use tracing::debug;

use crate::channel::{tracing_handler, Notifier};
use crate::config::{Config, RecordsConfig};
use crate::error::{RecordsError, RecordsResult};
use crate::event::ErrorEvent;
use crate::faults::FaultDemo;
use crate::model::Institute;
use crate::query::{best_institute, ExcellenceReport};
use crate::stream::{stream_handler_with_buffer, EventStream};
use crate::student::Student;

/// Ordered, name-unique collection of institutes.
///
/// # Example
///
/// ```rust
/// use institute_records::{HasId, Registry};
///
/// let mut registry = Registry::new();
/// registry.add_institute("IT").unwrap();
///
/// let student = registry.enroll("Ada").unwrap();
/// assert_eq!(student.id(), "S001");
///
/// let group = registry
///     .get_mut("IT")
///     .unwrap()
///     .course_or_insert(1)
///     .unwrap()
///     .add_group("FI22")
///     .unwrap();
/// group.add_student(student);
///
/// assert_eq!(registry.get("IT").unwrap().students().count(), 1);
/// ```
#[derive(Debug)]
pub struct Registry {
    institutes: HashMap<String, Institute>,
    ordered: Vec<String>,
    next_id: u32,
    notifier: Box<dyn Notifier>,
    config: RecordsConfig,
}

impl Registry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config_unchecked(RecordsConfig::default())
    }

    /// Create an empty registry, validating `config` first.
    pub fn with_config(config: RecordsConfig) -> RecordsResult<Self> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: RecordsConfig) -> Self {
        let mut notifier: Box<dyn Notifier> = Box::new(config.prefixed_notifier());
        if config.is_verbose() {
            notifier.subscribe(tracing_handler());
        }
        Self {
            institutes: HashMap::new(),
            ordered: Vec::new(),
            next_id: 1,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &RecordsConfig {
        &self.config
    }

    /// Add an empty institute, returning an error if the name is taken.
    pub fn add_institute(&mut self, name: &str) -> RecordsResult<&mut Institute> {
        self.insert(Institute::new(name.trim()))
    }

    /// Register a prepared institute, returning an error if the name is taken.
    pub fn insert(&mut self, institute: Institute) -> RecordsResult<&mut Institute> {
        let name = institute.name().to_string();
        if name.trim().is_empty() {
            return Err(RecordsError::EmptyName("institute"));
        }
        if self.institutes.contains_key(&name) {
            return Err(RecordsError::DuplicateInstitute(name));
        }
        debug!(institute = %name, "registering institute");
        self.ordered.push(name.clone());
        Ok(self.institutes.entry(name).or_insert(institute))
    }

    /// Rename an institute, keeping its position.
    pub fn rename_institute(&mut self, old: &str, new: &str) -> RecordsResult<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(RecordsError::EmptyName("institute"));
        }
        if old != new && self.institutes.contains_key(new) {
            return Err(RecordsError::DuplicateInstitute(new.to_string()));
        }
        let mut institute = self
            .institutes
            .remove(old)
            .ok_or_else(|| RecordsError::InstituteNotFound(old.to_string()))?;
        institute.set_name(new);
        if let Some(slot) = self.ordered.iter_mut().find(|n| n.as_str() == old) {
            *slot = new.to_string();
        }
        self.institutes.insert(new.to_string(), institute);
        Ok(())
    }

    /// Remove an institute by name.
    pub fn remove_institute(&mut self, name: &str) -> Option<Institute> {
        self.ordered.retain(|n| n != name);
        self.institutes.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Institute> {
        self.institutes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Institute> {
        self.institutes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.institutes.contains_key(name)
    }

    /// Institute names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.ordered.iter().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.institutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.institutes.is_empty()
    }

    /// Iterate over institutes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Institute> {
        self.ordered
            .iter()
            .filter_map(move |name| self.institutes.get(name))
    }

    /// Create a student with the next system-assigned id.
    ///
    /// The id counter only advances when the student is created.
    pub fn enroll(&mut self, name: &str) -> RecordsResult<Student> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordsError::EmptyName("student"));
        }
        let next = self.next_id.checked_add(1).ok_or(RecordsError::IdsExhausted)?;
        let id = self.config.student_id(self.next_id);
        self.next_id = next;
        debug!(student = %id, "enrolled student");
        Ok(Student::new(id, name))
    }

    /// Skip ahead so the next generated id is at least `n`.
    ///
    /// Used after bulk-loading students with pre-assigned ids.
    pub fn reserve_ids_until(&mut self, n: u32) {
        self.next_id = self.next_id.max(n);
    }

    /// The shared notifier for cross-cutting fault reports.
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn notifier_mut(&mut self) -> &mut dyn Notifier {
        self.notifier.as_mut()
    }

    /// Swap the shared notifier. Existing subscriptions go with the old one.
    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = notifier;
    }

    /// Subscribe a stream sink to the shared notifier.
    ///
    /// The buffer size comes from the configuration.
    pub fn event_stream(&mut self) -> EventStream<ErrorEvent> {
        let (sink, stream) = stream_handler_with_buffer(self.config.stream_buffer);
        self.notifier.subscribe(sink);
        stream
    }

    /// A fault demonstration reporting through the shared notifier.
    pub fn fault_demo(&self) -> FaultDemo<'_> {
        FaultDemo::new(self.notifier.as_ref())
    }

    /// The institute with the most excellent students.
    pub fn best_institute(&self) -> Option<(&Institute, usize)> {
        best_institute(self.iter())
    }

    pub fn excellence_report(&self) -> ExcellenceReport {
        ExcellenceReport::from_institutes(self.iter())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating registries with fluent API.
#[derive(Default)]
pub struct RegistryBuilder {
    config: RecordsConfig,
    institutes: Vec<Institute>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RecordsConfig) -> Self {
        self.config = config;
        self
    }

    /// Add an institute to the registry.
    pub fn with(mut self, institute: Institute) -> Self {
        self.institutes.push(institute);
        self
    }

    /// Build the registry, validating configuration and institute names.
    pub fn build(self) -> RecordsResult<Registry> {
        let mut registry = Registry::with_config(self.config)?;
        for institute in self.institutes {
            registry.insert(institute)?;
        }
        Ok(registry)
    }
}
