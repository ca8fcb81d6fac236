pub mod assignments;
pub mod health;
pub mod people;
pub mod tasks;
