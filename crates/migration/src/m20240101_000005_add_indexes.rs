use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Course: lookups by instructor
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_instructor")
                    .table(Course::Table)
                    .col(Course::InstructorId)
                    .to_owned(),
            )
            .await?;

        // Student: name search and sort
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_name")
                    .table(Student::Table)
                    .col(Student::Name)
                    .to_owned(),
            )
            .await?;

        // StudentCourse: the primary key covers student_id; the course side needs its own
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_course_course")
                    .table(StudentCourse::Table)
                    .col(StudentCourse::CourseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_course_instructor").table(Course::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_name").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_course_course").table(StudentCourse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Course { Table, InstructorId }

#[derive(DeriveIden)]
enum Student { Table, Name }

#[derive(DeriveIden)]
enum StudentCourse { Table, CourseId }
