use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryOrder};

use models::{course, instructor};

use crate::errors::ServiceError;
use crate::views::InstructorView;

#[async_trait]
pub trait InstructorRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<InstructorView>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<InstructorView>, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn insert(&self, name: &str) -> Result<InstructorView, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmInstructorRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInstructorRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl InstructorRepository for SeaOrmInstructorRepository {
    async fn list(&self) -> Result<Vec<InstructorView>, ServiceError> {
        let rows = instructor::Entity::find()
            .find_with_related(course::Entity)
            .order_by_asc(instructor::Column::Id)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        Ok(rows.into_iter().map(|(i, courses)| InstructorView::new(i, courses)).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<InstructorView>, ServiceError> {
        let Some(found) = instructor::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)? else {
            return Ok(None);
        };
        let courses = found
            .find_related(course::Entity)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        Ok(Some(InstructorView::new(found, courses)))
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        let found = instructor::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)?;
        Ok(found.is_some())
    }

    async fn insert(&self, name: &str) -> Result<InstructorView, ServiceError> {
        let created = instructor::create(&self.db, name).await?;
        Ok(InstructorView::new(created, Vec::new()))
    }
}
