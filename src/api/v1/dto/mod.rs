pub mod assignments;
pub mod people;
pub mod tasks;
