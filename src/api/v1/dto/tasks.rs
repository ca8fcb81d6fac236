/*
 * Responsibility
 * - Task request/response DTOs
 */
use serde::{Deserialize, Serialize};

use crate::repos::task_repo::TaskRow;

/// Body for both `POST /tasks` and `POST /tasks/find`.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub description: String,
}

impl TaskRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.description.trim().is_empty() {
            return Err("description is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub description: String,
}

impl From<TaskRow> for TaskResponse {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksListResponse {
    pub success: bool,
    pub tasks: Vec<TaskResponse>,
    pub total_tasks: usize,
}

impl TasksListResponse {
    pub fn new(rows: Vec<TaskRow>) -> Self {
        let tasks: Vec<TaskResponse> = rows.into_iter().map(TaskResponse::from).collect();
        Self {
            success: true,
            total_tasks: tasks.len(),
            tasks,
        }
    }
}

/// Lookup result for the `/find` endpoints.
#[derive(Debug, Serialize)]
pub struct FoundResponse {
    pub success: bool,
    pub id: i32,
}

impl FoundResponse {
    pub fn new(id: i32) -> Self {
        Self { success: true, id }
    }
}
