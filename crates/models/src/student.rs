use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{course, errors, student_course, validation};

/// Owning side of the student <-> course relation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    StudentCourse,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::StudentCourse => Entity::has_many(student_course::Entity).into(),
        }
    }
}

impl Related<student_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourse.def()
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef {
        student_course::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(student_course::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    validation::validate_name("student", name)
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let am = ActiveModel { name: Set(name), ..Default::default() };
    am.insert(db).await.map_err(errors::ModelError::Db)
}

pub async fn rename<C: ConnectionTrait>(db: &C, found: Model, name: &str) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let mut am: ActiveModel = found.into();
    am.name = Set(name);
    am.update(db).await.map_err(errors::ModelError::Db)
}
