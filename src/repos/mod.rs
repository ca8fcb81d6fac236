pub mod assignment_repo;
pub mod error;
pub mod person_repo;
pub mod task_repo;
