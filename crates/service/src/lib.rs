//! Service layer for the school backend.
//! - Repository traits separate data access from business rules.
//! - SeaORM implementations live next to each trait.
//! - Services validate input and translate absence into `ServiceError::NotFound`.

pub mod errors;
pub mod pagination;
pub mod views;
pub mod student;
pub mod course;
pub mod instructor;
#[cfg(test)]
pub mod test_support;
