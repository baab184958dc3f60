pub mod repository;
pub mod service;

pub use repository::{InstructorRepository, SeaOrmInstructorRepository};
pub use service::{InstructorPayload, InstructorService};
