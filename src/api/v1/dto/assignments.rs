/*
 * Responsibility
 * - person ↔ task assignment DTOs (camelCase on the wire)
 * - dates are naive UTC timestamps, e.g. "2024-05-01T09:00:00"
 */
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::repos::assignment_repo::AssignmentRow;

pub const DEFAULT_STATUS: &str = "Not_Started";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskRequest {
    pub person_id: i32,
    pub task_id: i32,
    pub start_date: NaiveDateTime,
    pub due_by: NaiveDateTime,
    pub status: Option<String>,
}

impl AssignTaskRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.due_by < self.start_date {
            return Err("dueBy must not be before startDate");
        }
        if let Some(status) = &self.status
            && status.trim().is_empty()
        {
            return Err("status cannot be empty");
        }
        Ok(())
    }

    /// Trimmed status, `Not_Started` when omitted.
    pub fn status(&self) -> &str {
        self.status.as_deref().map_or(DEFAULT_STATUS, str::trim)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusRequest {
    pub person_id: i32,
    pub task_id: i32,
    pub start_date: NaiveDateTime,
    pub status: String,
}

impl UpdateTaskStatusRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.status().is_empty() {
            return Err("status is required");
        }
        Ok(())
    }

    pub fn status(&self) -> &str {
        self.status.trim()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub person_id: i32,
    pub task_id: i32,
    pub start_date: NaiveDateTime,
    pub due_by: NaiveDateTime,
    pub status: String,
}

impl From<AssignmentRow> for AssignmentResponse {
    fn from(row: AssignmentRow) -> Self {
        Self {
            person_id: row.personid,
            task_id: row.taskid,
            start_date: row.startdate,
            due_by: row.dueby,
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserTasksResponse {
    pub success: bool,
    pub user: i32,
    pub user_tasks: Vec<AssignmentResponse>,
}
