use std::fmt::Display;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    /// Classify a store error; constraint violations become `Conflict`.
    pub fn db(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Db(e.to_string()),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Db(e) => Self::db(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_kind() {
        let v: ServiceError = ModelError::Validation("student name required".into()).into();
        assert!(matches!(v, ServiceError::Validation(m) if m == "student name required"));
        let d: ServiceError = ModelError::Db(DbErr::Custom("connection reset".into())).into();
        assert!(matches!(d, ServiceError::Db(_)));
    }

    #[tokio::test]
    async fn constraint_violation_from_model_helper_is_a_conflict() -> Result<(), anyhow::Error> {
        let db = crate::test_support::get_db().await?;
        let s = models::student::create(&db, "Kim").await?;

        let err: ServiceError = models::student_course::link(&db, s.id, 999)
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("link to a missing course succeeded"))?
            .into();
        assert!(matches!(err, ServiceError::Conflict(_)), "{err:?}");
        Ok(())
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let e = ServiceError::not_found("student", 42);
        assert_eq!(e.to_string(), "not found: student 42 not found");
    }

    #[test]
    fn plain_db_errors_stay_db() {
        let e = ServiceError::db(DbErr::Custom("boom".into()));
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
