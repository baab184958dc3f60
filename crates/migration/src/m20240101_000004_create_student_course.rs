//! Create `student_course` join table.
//! Holds the student <-> course enrollment once; both sides read it by query.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentCourse::Table)
                    .if_not_exists()
                    .col(integer(StudentCourse::StudentId))
                    .col(integer(StudentCourse::CourseId))
                    .primary_key(
                        Index::create()
                            .name("pk_student_course")
                            .col(StudentCourse::StudentId)
                            .col(StudentCourse::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_course_student")
                            .from(StudentCourse::Table, StudentCourse::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_course_course")
                            .from(StudentCourse::Table, StudentCourse::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(StudentCourse::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum StudentCourse { Table, StudentId, CourseId }

#[derive(DeriveIden)]
enum Student { Table, Id }

#[derive(DeriveIden)]
enum Course { Table, Id }
