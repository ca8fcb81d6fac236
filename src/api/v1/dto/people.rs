/*
 * Responsibility
 * - People request/response DTOs
 * - validate() for shape checks before touching the repo
 */
use serde::{Deserialize, Serialize};

use crate::repos::person_repo::PersonRow;

/// Body for both `POST /people` and `POST /people/find`.
#[derive(Debug, Deserialize)]
pub struct PersonRequest {
    pub name: String,
    pub ssn: String,
}

impl PersonRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.ssn.trim().is_empty() {
            return Err("ssn is required");
        }
        Ok(())
    }
}

/// SSN never leaves the service.
#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: i32,
    pub name: String,
}

impl From<PersonRow> for PersonResponse {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleListResponse {
    pub success: bool,
    pub people: Vec<PersonResponse>,
    pub total_people: usize,
}

impl PeopleListResponse {
    pub fn new(rows: Vec<PersonRow>) -> Self {
        let people: Vec<PersonResponse> = rows.into_iter().map(PersonResponse::from).collect();
        Self {
            success: true,
            total_people: people.len(),
            people,
        }
    }
}
