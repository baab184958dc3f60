//! JSON shapes returned to callers.
//!
//! Each entity nested inside another is rendered through a `*Ref` type that
//! leaves out its own back-reference collections, so payloads never recurse
//! along student <-> course or course <-> instructor.

use serde::{Deserialize, Serialize};

use models::{course, instructor, student};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorRef {
    pub id: i32,
    pub name: String,
}

impl From<instructor::Model> for InstructorRef {
    fn from(m: instructor::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

/// A course seen from a student or an instructor: no student list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<InstructorRef>,
}

impl CourseRef {
    pub fn new(course: course::Model, instructor: Option<instructor::Model>) -> Self {
        Self { id: course.id, name: course.name, instructor: instructor.map(InstructorRef::from) }
    }
}

/// A student seen from a course: no course list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    pub id: i32,
    pub name: String,
}

impl From<student::Model> for StudentRef {
    fn from(m: student::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentView {
    pub id: i32,
    pub name: String,
    pub courses: Vec<CourseRef>,
}

impl StudentView {
    pub fn new(student: student::Model, courses: Vec<(course::Model, Option<instructor::Model>)>) -> Self {
        Self {
            id: student.id,
            name: student.name,
            courses: courses.into_iter().map(|(c, i)| CourseRef::new(c, i)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseView {
    pub id: i32,
    pub name: String,
    pub instructor: Option<InstructorRef>,
    pub students: Vec<StudentRef>,
}

impl CourseView {
    pub fn new(course: course::Model, instructor: Option<instructor::Model>, students: Vec<student::Model>) -> Self {
        Self {
            id: course.id,
            name: course.name,
            instructor: instructor.map(InstructorRef::from),
            students: students.into_iter().map(StudentRef::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorView {
    pub id: i32,
    pub name: String,
    pub courses: Vec<CourseRef>,
}

impl InstructorView {
    pub fn new(instructor: instructor::Model, courses: Vec<course::Model>) -> Self {
        Self {
            id: instructor.id,
            name: instructor.name,
            courses: courses.into_iter().map(|c| CourseRef::new(c, None)).collect(),
        }
    }
}

/// Number of students enrolled in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStudentCount {
    pub id: i32,
    pub name: String,
    pub student_count: i64,
}
