use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, instructor, student, student_course, validation};

/// Inverse side of the student relation: enrollment rows are written only
/// through student operations.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub instructor_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Instructor,
    StudentCourse,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Instructor => Entity::belongs_to(instructor::Entity)
                .from(Column::InstructorId)
                .to(instructor::Column::Id)
                .into(),
            Relation::StudentCourse => Entity::has_many(student_course::Entity).into(),
        }
    }
}

impl Related<instructor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<student_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourse.def()
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        student_course::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(student_course::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    validation::validate_name("course", name)
}

/// Insert a course. The caller is responsible for checking that `instructor_id` exists.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    instructor_id: Option<i32>,
) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let am = ActiveModel {
        name: Set(name),
        instructor_id: Set(instructor_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::Db)
}
