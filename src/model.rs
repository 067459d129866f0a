//! The owned entity tree: institutes hold courses, courses hold groups,
//! groups hold students.

use std::fmt;

use crate::capability::HasId;
use crate::error::{RecordsError, RecordsResult};
use crate::student::Student;

/// Lowest course number.
pub const MIN_COURSE: u8 = 1;
/// Highest course number.
pub const MAX_COURSE: u8 = 6;

/// A named group of students, kept in insertion order.
#[derive(Debug)]
pub struct Group {
    name: String,
    students: Vec<Student>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            students: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn students_mut(&mut self) -> &mut [Student] {
        &mut self.students
    }

    /// Append a student and return a handle to it.
    pub fn add_student(&mut self, student: Student) -> &mut Student {
        self.students.push(student);
        let last = self.students.len() - 1;
        &mut self.students[last]
    }

    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id() == id)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group {}, students: {}", self.name, self.students.len())
    }
}

/// A numbered course (1..=6) holding uniquely named groups.
#[derive(Debug)]
pub struct Course {
    number: u8,
    groups: Vec<Group>,
}

impl Course {
    pub fn new(number: u8) -> RecordsResult<Self> {
        if !(MIN_COURSE..=MAX_COURSE).contains(&number) {
            return Err(RecordsError::InvalidCourseNumber(number));
        }
        Ok(Self {
            number,
            groups: Vec::new(),
        })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [Group] {
        &mut self.groups
    }

    /// Look up a group by name, ignoring case.
    pub fn group(&self, name: &str) -> Option<&Group> {
        let lowered = name.to_lowercase();
        self.groups.iter().find(|g| g.name.to_lowercase() == lowered)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        let lowered = name.to_lowercase();
        self.groups
            .iter_mut()
            .find(|g| g.name.to_lowercase() == lowered)
    }

    /// Add a group. Names are trimmed and must be unique within the course,
    /// compared case-insensitively.
    pub fn add_group(&mut self, name: &str) -> RecordsResult<&mut Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordsError::EmptyName("group"));
        }
        if self.group(name).is_some() {
            return Err(RecordsError::DuplicateGroup(name.to_string()));
        }
        self.groups.push(Group::new(name));
        let last = self.groups.len() - 1;
        Ok(&mut self.groups[last])
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Course {}, groups: {}", self.number, self.groups.len())
    }
}

/// An institute with its subjects and courses.
#[derive(Debug)]
pub struct Institute {
    name: String,
    subjects: Vec<String>,
    courses: Vec<Course>,
}

impl Institute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subjects: Vec::new(),
            courses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Add a subject. Returns `Ok(false)` if it was already present.
    pub fn add_subject(&mut self, subject: &str) -> RecordsResult<bool> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(RecordsError::EmptyName("subject"));
        }
        if self.subjects.iter().any(|s| s == subject) {
            return Ok(false);
        }
        self.subjects.push(subject.to_string());
        Ok(true)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, number: u8) -> Option<&Course> {
        self.courses.iter().find(|c| c.number == number)
    }

    pub fn course_mut(&mut self, number: u8) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.number == number)
    }

    /// Return the course with `number`, creating it on first use.
    pub fn course_or_insert(&mut self, number: u8) -> RecordsResult<&mut Course> {
        match self.courses.iter().position(|c| c.number == number) {
            Some(index) => Ok(&mut self.courses[index]),
            None => {
                self.courses.push(Course::new(number)?);
                let last = self.courses.len() - 1;
                Ok(&mut self.courses[last])
            }
        }
    }

    /// Every student, course by course and group by group.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.courses
            .iter()
            .flat_map(|c| c.groups.iter())
            .flat_map(|g| g.students.iter())
    }
}

impl fmt::Display for Institute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Institute: {}, courses: {}, subjects: {}, excellent: {}",
            self.name,
            self.courses.len(),
            self.subjects.len(),
            crate::query::count_excellent(self)
        )
    }
}
