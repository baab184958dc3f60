use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::student::domain::{
    normalize_course_ids, resolve_sort, EnrollOutcome, NameMatch, NewStudent, StudentChanges, StudentPayload,
};
use crate::student::repository::StudentRepository;
use crate::views::StudentView;

/// Application service for students.
/// Validates payloads and turns repository absence into `ServiceError::NotFound`.
pub struct StudentService<R: StudentRepository> {
    repo: Arc<R>,
    name_match: NameMatch,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, name_match: NameMatch::default() } }

    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    #[instrument(skip(self), fields(page = page.page, size = page.size))]
    pub async fn find_all(&self, page: &PageRequest) -> Result<Vec<StudentView>, ServiceError> {
        let order = resolve_sort(&page.sort)?;
        match page.offset() {
            Some(offset) => self.repo.find_page(offset, page.size, &order).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn find_student_by_id(&self, id: i32) -> Result<StudentView, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", id))
    }

    pub async fn find_student_by_name_like(&self, fragment: &str) -> Result<Vec<StudentView>, ServiceError> {
        self.repo.find_by_name_containing(fragment, self.name_match).await
    }

    /// Create a student. The store assigns the id; a supplied id is rejected
    /// so creation never turns into an update.
    #[instrument(skip(self, payload))]
    pub async fn save(&self, payload: StudentPayload) -> Result<StudentView, ServiceError> {
        if let Some(id) = payload.id {
            return Err(ServiceError::Validation(format!("id {id} must not be set when creating a student")));
        }
        let name = payload
            .name
            .as_deref()
            .ok_or_else(|| ServiceError::Validation("student name required".into()))?;
        let input = NewStudent {
            name: models::student::validate_name(name)?,
            course_ids: normalize_course_ids(payload.course_ids.as_deref().unwrap_or_default()),
        };
        let created = self.repo.insert(&input).await?;
        info!(id = created.id, courses = created.courses.len(), "student_created");
        Ok(created)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, payload: StudentPayload, id: i32) -> Result<StudentView, ServiceError> {
        if let Some(body_id) = payload.id {
            if body_id != id {
                return Err(ServiceError::Validation(format!("body id {body_id} does not match path id {id}")));
            }
        }
        let changes = StudentChanges {
            name: payload.name.as_deref().map(models::student::validate_name).transpose()?,
            course_ids: payload.course_ids.as_deref().map(normalize_course_ids),
        };
        let updated = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", id))?;
        info!(id, "student_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("student", id));
        }
        info!(id, "student_deleted");
        Ok(())
    }

    /// Enroll through the owning side. Enrolling twice is a no-op.
    #[instrument(skip(self))]
    pub async fn enroll(&self, student_id: i32, course_id: i32) -> Result<StudentView, ServiceError> {
        match self.repo.enroll(student_id, course_id).await? {
            EnrollOutcome::StudentMissing => return Err(ServiceError::not_found("student", student_id)),
            EnrollOutcome::CourseMissing => return Err(ServiceError::not_found("course", course_id)),
            EnrollOutcome::Linked => info!(student_id, course_id, "student_enrolled"),
            EnrollOutcome::AlreadyLinked => {}
        }
        self.find_student_by_id(student_id).await
    }

    #[instrument(skip(self))]
    pub async fn drop_course(&self, student_id: i32, course_id: i32) -> Result<StudentView, ServiceError> {
        if !self.repo.unenroll(student_id, course_id).await? {
            return Err(ServiceError::NotFound(format!(
                "student {student_id} is not enrolled in course {course_id}"
            )));
        }
        info!(student_id, course_id, "student_unenrolled");
        self.find_student_by_id(student_id).await
    }
}
