pub mod errors;
pub mod db;
pub mod validation;
pub mod instructor;
pub mod course;
pub mod student;
pub mod student_course;

#[cfg(test)]
mod tests;
