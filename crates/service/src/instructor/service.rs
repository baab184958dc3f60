use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::instructor::repository::InstructorRepository;
use crate::views::InstructorView;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstructorPayload {
    #[serde(default, alias = "instructid")]
    pub id: Option<i32>,
    #[serde(default, alias = "instructname")]
    pub name: Option<String>,
}

pub struct InstructorService<R: InstructorRepository> {
    repo: Arc<R>,
}

impl<R: InstructorRepository> InstructorService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_all(&self) -> Result<Vec<InstructorView>, ServiceError> {
        self.repo.list().await
    }

    pub async fn find_instructor_by_id(&self, id: i32) -> Result<InstructorView, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("instructor", id))
    }

    #[instrument(skip(self, payload))]
    pub async fn save(&self, payload: InstructorPayload) -> Result<InstructorView, ServiceError> {
        if let Some(id) = payload.id {
            return Err(ServiceError::Validation(format!("id {id} must not be set when creating an instructor")));
        }
        let name = payload
            .name
            .as_deref()
            .ok_or_else(|| ServiceError::Validation("instructor name required".into()))?;
        let created = self.repo.insert(name).await?;
        info!(id = created.id, "instructor_created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::course;

    use crate::instructor::repository::SeaOrmInstructorRepository;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn instructor_lifecycle_and_courses_view() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = InstructorService::new(Arc::new(SeaOrmInstructorRepository::new(db.clone())));

        let sally = svc.save(InstructorPayload { id: None, name: Some("Sally".into()) }).await?;
        let lucy = svc.save(InstructorPayload { id: None, name: Some("Lucy".into()) }).await?;
        let ds = course::create(&db, "Data Science", Some(sally.id)).await?;
        let js = course::create(&db, "JavaScript", Some(sally.id)).await?;

        let found = svc.find_instructor_by_id(sally.id).await?;
        assert_eq!(found.courses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![ds.id, js.id]);

        let all = svc.list_all().await?;
        assert_eq!(all.iter().map(|i| i.id).collect::<Vec<_>>(), vec![sally.id, lucy.id]);
        assert!(all[1].courses.is_empty());

        assert!(matches!(svc.find_instructor_by_id(lucy.id + 10).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn instructor_requires_name_and_no_id() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = InstructorService::new(Arc::new(SeaOrmInstructorRepository::new(db)));

        assert!(matches!(svc.save(InstructorPayload::default()).await, Err(ServiceError::Validation(_))));
        assert!(matches!(
            svc.save(InstructorPayload { id: Some(1), name: Some("Sally".into()) }).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.save(InstructorPayload { id: None, name: Some(" ".into()) }).await,
            Err(ServiceError::Validation(_))
        ));
        Ok(())
    }
}
