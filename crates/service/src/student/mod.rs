//! Students: the owning side of enrollment.
pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{NameMatch, StudentPayload};
pub use repository::{SeaOrmStudentRepository, StudentRepository};
pub use service::StudentService;
