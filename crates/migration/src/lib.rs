//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_instructor;
mod m20240101_000002_create_course;
mod m20240101_000003_create_student;
mod m20240101_000004_create_student_course;
mod m20240101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_instructor::Migration),
            Box::new(m20240101_000002_create_course::Migration),
            Box::new(m20240101_000003_create_student::Migration),
            Box::new(m20240101_000004_create_student_course::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000005_add_indexes::Migration),
        ]
    }
}
