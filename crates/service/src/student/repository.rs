use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

use models::{course, instructor, student, student_course};

use crate::errors::ServiceError;
use crate::pagination::Direction;
use crate::student::domain::{EnrollOutcome, NameMatch, NewStudent, StudentChanges, StudentSort, StudentSortKey};
use crate::views::StudentView;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_page(&self, offset: u64, limit: u64, order: &[StudentSort]) -> Result<Vec<StudentView>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<StudentView>, ServiceError>;
    async fn find_by_name_containing(&self, fragment: &str, mode: NameMatch) -> Result<Vec<StudentView>, ServiceError>;
    async fn insert(&self, input: &NewStudent) -> Result<StudentView, ServiceError>;
    /// `None` when no student has `id`; nothing is written in that case.
    async fn update(&self, id: i32, changes: &StudentChanges) -> Result<Option<StudentView>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn enroll(&self, student_id: i32, course_id: i32) -> Result<EnrollOutcome, ServiceError>;
    async fn unenroll(&self, student_id: i32, course_id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

async fn load_view<C: ConnectionTrait>(db: &C, s: student::Model) -> Result<StudentView, ServiceError> {
    let courses = s
        .find_related(course::Entity)
        .find_also_related(instructor::Entity)
        .order_by_asc(course::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(StudentView::new(s, courses))
}

async fn load_views<C: ConnectionTrait>(db: &C, students: Vec<student::Model>) -> Result<Vec<StudentView>, ServiceError> {
    let mut views = Vec::with_capacity(students.len());
    for s in students {
        views.push(load_view(db, s).await?);
    }
    Ok(views)
}

/// Every id in `ids` must name an existing course.
async fn ensure_courses_exist<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<(), ServiceError> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: Vec<i32> = course::Entity::find()
        .select_only()
        .column(course::Column::Id)
        .filter(course::Column::Id.is_in(ids.iter().copied()))
        .into_tuple::<i32>()
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    match ids.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(ServiceError::Conflict(format!("course {missing} does not exist"))),
        None => Ok(()),
    }
}

async fn link_all<C: ConnectionTrait>(db: &C, student_id: i32, course_ids: &[i32]) -> Result<(), ServiceError> {
    for course_id in course_ids {
        student_course::link(db, student_id, *course_id).await?;
    }
    Ok(())
}

fn escape_like(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_page(&self, offset: u64, limit: u64, order: &[StudentSort]) -> Result<Vec<StudentView>, ServiceError> {
        let mut query = student::Entity::find();
        for s in order {
            let col = match s.key {
                StudentSortKey::Id => student::Column::Id,
                StudentSortKey::Name => student::Column::Name,
            };
            let ord = match s.direction {
                Direction::Asc => Order::Asc,
                Direction::Desc => Order::Desc,
            };
            query = query.order_by(col, ord);
        }
        let rows = query
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        load_views(&self.db, rows).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<StudentView>, ServiceError> {
        let found = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?;
        match found {
            Some(s) => Ok(Some(load_view(&self.db, s).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_name_containing(&self, fragment: &str, mode: NameMatch) -> Result<Vec<StudentView>, ServiceError> {
        // Case-sensitive LIKE only narrows the candidates (SQLite folds ASCII
        // case). Unicode case folding differs per backend, so case-insensitive
        // matching is left entirely to `NameMatch::matches`.
        let mut query = student::Entity::find();
        if mode == NameMatch::CaseSensitive {
            let pattern = format!("%{}%", escape_like(fragment));
            let name = Expr::col((student::Entity, student::Column::Name));
            query = query.filter(name.like(LikeExpr::new(pattern).escape('\\')));
        }
        let rows = query
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        let matching = rows.into_iter().filter(|s| mode.matches(&s.name, fragment)).collect();
        load_views(&self.db, matching).await
    }

    async fn insert(&self, input: &NewStudent) -> Result<StudentView, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        ensure_courses_exist(&txn, &input.course_ids).await?;
        let created = student::create(&txn, &input.name).await?;
        link_all(&txn, created.id, &input.course_ids).await?;
        let view = load_view(&txn, created).await?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(view)
    }

    async fn update(&self, id: i32, changes: &StudentChanges) -> Result<Option<StudentView>, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let Some(found) = student::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)? else {
            return Ok(None);
        };
        if let Some(course_ids) = &changes.course_ids {
            ensure_courses_exist(&txn, course_ids).await?;
        }
        let current = match &changes.name {
            Some(name) => student::rename(&txn, found, name).await?,
            None => found,
        };
        if let Some(course_ids) = &changes.course_ids {
            student_course::unlink_student(&txn, id).await?;
            link_all(&txn, id, course_ids).await?;
        }
        let view = load_view(&txn, current).await?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(Some(view))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        if student::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?.is_none() {
            return Ok(false);
        }
        student_course::unlink_student(&txn, id).await?;
        student::Entity::delete_by_id(id).exec(&txn).await.map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(true)
    }

    async fn enroll(&self, student_id: i32, course_id: i32) -> Result<EnrollOutcome, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        if student::Entity::find_by_id(student_id).one(&txn).await.map_err(ServiceError::db)?.is_none() {
            return Ok(EnrollOutcome::StudentMissing);
        }
        if course::Entity::find_by_id(course_id).one(&txn).await.map_err(ServiceError::db)?.is_none() {
            return Ok(EnrollOutcome::CourseMissing);
        }
        let linked = student_course::link(&txn, student_id, course_id).await?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(if linked { EnrollOutcome::Linked } else { EnrollOutcome::AlreadyLinked })
    }

    async fn unenroll(&self, student_id: i32, course_id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let removed = student_course::unlink(&txn, student_id, course_id).await?;
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Eri"), "Eri");
    }
}
