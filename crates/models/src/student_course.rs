use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{course, errors, student};

/// Enrollment link; `(student_id, course_id)` is the primary key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Course,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Student => Entity::belongs_to(student::Entity)
                .from(Column::StudentId)
                .to(student::Column::Id)
                .into(),
            Relation::Course => Entity::belongs_to(course::Entity)
                .from(Column::CourseId)
                .to(course::Column::Id)
                .into(),
        }
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert the link unless it already exists. Returns `true` when a row was written.
pub async fn link<C: ConnectionTrait>(db: &C, student_id: i32, course_id: i32) -> Result<bool, errors::ModelError> {
    let existing = Entity::find_by_id((student_id, course_id))
        .one(db)
        .await
        .map_err(errors::ModelError::Db)?;
    if existing.is_some() {
        return Ok(false);
    }
    let am = ActiveModel { student_id: Set(student_id), course_id: Set(course_id) };
    Entity::insert(am)
        .exec_without_returning(db)
        .await
        .map_err(errors::ModelError::Db)?;
    Ok(true)
}

pub async fn unlink<C: ConnectionTrait>(db: &C, student_id: i32, course_id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id((student_id, course_id))
        .exec(db)
        .await
        .map_err(errors::ModelError::Db)?;
    Ok(res.rows_affected > 0)
}

pub async fn unlink_student<C: ConnectionTrait>(db: &C, student_id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::StudentId.eq(student_id))
        .exec(db)
        .await
        .map_err(errors::ModelError::Db)?;
    Ok(res.rows_affected)
}

pub async fn unlink_course<C: ConnectionTrait>(db: &C, course_id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::CourseId.eq(course_id))
        .exec(db)
        .await
        .map_err(errors::ModelError::Db)?;
    Ok(res.rows_affected)
}
