use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    ModelTrait, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use models::{course, instructor, student, student_course};

use crate::course::domain::{CourseChanges, NewCourse};
use crate::errors::ServiceError;
use crate::views::{CourseStudentCount, CourseView};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<CourseView>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<CourseView>, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn insert(&self, input: &NewCourse) -> Result<CourseView, ServiceError>;
    async fn update(&self, id: i32, changes: &CourseChanges) -> Result<Option<CourseView>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn student_counts(&self) -> Result<Vec<CourseStudentCount>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCourseRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    id: i32,
    name: String,
    student_count: i64,
}

async fn load_view<C: ConnectionTrait>(
    db: &C,
    c: course::Model,
    taught_by: Option<instructor::Model>,
) -> Result<CourseView, ServiceError> {
    let students = c
        .find_related(student::Entity)
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(CourseView::new(c, taught_by, students))
}

async fn find_with_instructor<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<(course::Model, Option<instructor::Model>)>, ServiceError> {
    course::Entity::find_by_id(id)
        .find_also_related(instructor::Entity)
        .one(db)
        .await
        .map_err(ServiceError::db)
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn list(&self) -> Result<Vec<CourseView>, ServiceError> {
        let rows = course::Entity::find()
            .find_also_related(instructor::Entity)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        let mut views = Vec::with_capacity(rows.len());
        for (c, taught_by) in rows {
            views.push(load_view(&self.db, c, taught_by).await?);
        }
        Ok(views)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CourseView>, ServiceError> {
        match find_with_instructor(&self.db, id).await? {
            Some((c, taught_by)) => Ok(Some(load_view(&self.db, c, taught_by).await?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        let found = course::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)?;
        Ok(found.is_some())
    }

    async fn insert(&self, input: &NewCourse) -> Result<CourseView, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let am = course::ActiveModel {
            name: Set(input.name.clone()),
            instructor_id: Set(input.instructor_id),
            ..Default::default()
        };
        // a vanished instructor surfaces here as a foreign-key conflict
        let created = am.insert(&txn).await.map_err(ServiceError::db)?;
        let (c, taught_by) = find_with_instructor(&txn, created.id)
            .await?
            .ok_or_else(|| ServiceError::Db(format!("course {} missing after insert", created.id)))?;
        let view = load_view(&txn, c, taught_by).await?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(view)
    }

    async fn update(&self, id: i32, changes: &CourseChanges) -> Result<Option<CourseView>, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let Some(found) = course::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)? else {
            return Ok(None);
        };
        let mut am: course::ActiveModel = found.into();
        if let Some(name) = &changes.name {
            am.name = Set(name.clone());
        }
        if let Some(instructor_id) = changes.instructor_id {
            am.instructor_id = Set(instructor_id);
        }
        if am.is_changed() {
            am.update(&txn).await.map_err(ServiceError::db)?;
        }
        let (c, taught_by) = find_with_instructor(&txn, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", id))?;
        let view = load_view(&txn, c, taught_by).await?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(Some(view))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        if course::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?.is_none() {
            return Ok(false);
        }
        student_course::unlink_course(&txn, id).await?;
        course::Entity::delete_by_id(id).exec(&txn).await.map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(true)
    }

    async fn student_counts(&self) -> Result<Vec<CourseStudentCount>, ServiceError> {
        let rows = course::Entity::find()
            .select_only()
            .column(course::Column::Id)
            .column(course::Column::Name)
            .column_as(student_course::Column::StudentId.count(), "student_count")
            .join(JoinType::LeftJoin, course::Relation::StudentCourse.def())
            .group_by(course::Column::Id)
            .group_by(course::Column::Name)
            .order_by_asc(course::Column::Id)
            .into_model::<CountRow>()
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        Ok(rows
            .into_iter()
            .map(|r| CourseStudentCount { id: r.id, name: r.name, student_count: r.student_count })
            .collect())
    }
}
