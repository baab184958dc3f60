use std::sync::Arc;
use tracing::{info, instrument};

use crate::course::domain::{CourseChanges, CoursePayload, NewCourse};
use crate::course::repository::CourseRepository;
use crate::errors::ServiceError;
use crate::instructor::repository::InstructorRepository;
use crate::views::{CourseStudentCount, CourseView};

/// Application service encapsulating course rules.
/// A course may only reference an instructor that exists.
pub struct CourseService<C: CourseRepository, I: InstructorRepository> {
    courses: Arc<C>,
    instructors: Arc<I>,
}

impl<C: CourseRepository, I: InstructorRepository> CourseService<C, I> {
    pub fn new(courses: Arc<C>, instructors: Arc<I>) -> Self { Self { courses, instructors } }

    pub async fn list_all(&self) -> Result<Vec<CourseView>, ServiceError> {
        self.courses.list().await
    }

    pub async fn find_course_by_id(&self, id: i32) -> Result<CourseView, ServiceError> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", id))
    }

    pub async fn student_counts(&self) -> Result<Vec<CourseStudentCount>, ServiceError> {
        self.courses.student_counts().await
    }

    async fn ensure_instructor(&self, instructor_id: Option<i32>) -> Result<(), ServiceError> {
        if let Some(id) = instructor_id {
            if !self.instructors.exists(id).await? {
                return Err(ServiceError::Conflict(format!("instructor {id} does not exist")));
            }
        }
        Ok(())
    }

    #[instrument(skip(self, payload))]
    pub async fn save(&self, payload: CoursePayload) -> Result<CourseView, ServiceError> {
        if let Some(id) = payload.id {
            return Err(ServiceError::Validation(format!("id {id} must not be set when creating a course")));
        }
        let name = payload
            .name
            .as_deref()
            .ok_or_else(|| ServiceError::Validation("course name required".into()))?;
        let input = NewCourse {
            name: models::course::validate_name(name)?,
            instructor_id: payload.instructor_id.flatten(),
        };
        self.ensure_instructor(input.instructor_id).await?;
        let created = self.courses.insert(&input).await?;
        info!(id = created.id, instructor_id = ?input.instructor_id, "course_created");
        Ok(created)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, payload: CoursePayload, id: i32) -> Result<CourseView, ServiceError> {
        if let Some(body_id) = payload.id {
            if body_id != id {
                return Err(ServiceError::Validation(format!("body id {body_id} does not match path id {id}")));
            }
        }
        let changes = CourseChanges {
            name: payload.name.as_deref().map(models::course::validate_name).transpose()?,
            instructor_id: payload.instructor_id,
        };
        if !self.courses.exists(id).await? {
            return Err(ServiceError::not_found("course", id));
        }
        self.ensure_instructor(changes.instructor_id.flatten()).await?;
        let updated = self
            .courses
            .update(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", id))?;
        info!(id, "course_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.courses.delete(id).await? {
            return Err(ServiceError::not_found("course", id));
        }
        info!(id, "course_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseConnection, EntityTrait};

    use models::{course, instructor, student, student_course};

    use crate::course::repository::SeaOrmCourseRepository;
    use crate::instructor::repository::SeaOrmInstructorRepository;
    use crate::test_support::get_db;

    fn service(db: &DatabaseConnection) -> CourseService<SeaOrmCourseRepository, SeaOrmInstructorRepository> {
        CourseService::new(
            Arc::new(SeaOrmCourseRepository::new(db.clone())),
            Arc::new(SeaOrmInstructorRepository::new(db.clone())),
        )
    }

    fn payload(name: &str, instructor_id: Option<i32>) -> CoursePayload {
        CoursePayload { id: None, name: Some(name.into()), instructor_id: Some(instructor_id) }
    }

    #[tokio::test]
    async fn create_with_instructor_and_read_back() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service(&db);
        let sally = instructor::create(&db, "Sally").await?;

        let created = svc.save(payload("Data Science", Some(sally.id))).await?;
        assert_eq!(created.instructor.as_ref().map(|i| i.name.as_str()), Some("Sally"));
        assert!(created.students.is_empty());

        let found = svc.find_course_by_id(created.id).await?;
        assert_eq!(found, created);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_instructor_is_a_conflict_and_persists_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service(&db);

        let res = svc.save(payload("Ghost Course", Some(999))).await;
        assert!(matches!(res, Err(ServiceError::Conflict(_))));
        assert!(course::Entity::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_name_and_instructor() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service(&db);
        let sally = instructor::create(&db, "Sally").await?;
        let lucy = instructor::create(&db, "Lucy").await?;
        let created = svc.save(payload("JavaScript", Some(sally.id))).await?;

        let moved = svc.update(payload("Advanced JavaScript", Some(lucy.id)), created.id).await?;
        assert_eq!(moved.name, "Advanced JavaScript");
        assert_eq!(moved.instructor.map(|i| i.id), Some(lucy.id));

        let cleared = svc.update(payload("Advanced JavaScript", None), created.id).await?;
        assert!(cleared.instructor.is_none());

        let untouched = svc
            .update(CoursePayload { id: None, name: Some("JS".into()), instructor_id: None }, created.id)
            .await?;
        assert!(untouched.instructor.is_none());
        assert_eq!(untouched.name, "JS");

        assert!(matches!(
            svc.update(payload("JS", Some(999)), created.id).await,
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            svc.update(payload("JS", None), created.id + 10).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn students_appear_on_inverse_side_and_counts() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service(&db);
        let ds = svc.save(payload("Data Science", None)).await?;
        let js = svc.save(payload("JavaScript", None)).await?;
        let john = student::create(&db, "John").await?;
        let mary = student::create(&db, "Mary").await?;
        student_course::link(&db, john.id, ds.id).await?;
        student_course::link(&db, mary.id, ds.id).await?;

        let view = svc.find_course_by_id(ds.id).await?;
        assert_eq!(view.students.iter().map(|s| s.id).collect::<Vec<_>>(), vec![john.id, mary.id]);

        let counts = svc.student_counts().await?;
        assert_eq!(
            counts,
            vec![
                CourseStudentCount { id: ds.id, name: "Data Science".into(), student_count: 2 },
                CourseStudentCount { id: js.id, name: "JavaScript".into(), student_count: 0 },
            ]
        );
        assert_eq!(svc.list_all().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_enrollments_but_keeps_students() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service(&db);
        let c = svc.save(payload("Mobile IOS", None)).await?;
        let s = student::create(&db, "Kim").await?;
        student_course::link(&db, s.id, c.id).await?;

        svc.delete(c.id).await?;
        assert!(matches!(svc.find_course_by_id(c.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(c.id).await, Err(ServiceError::NotFound(_))));
        assert!(student_course::Entity::find().all(&db).await?.is_empty());
        assert!(student::Entity::find_by_id(s.id).one(&db).await?.is_some());
        Ok(())
    }
}
