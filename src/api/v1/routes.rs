/*
 * Responsibility
 * - URL layout of v1
 * - /tasks, /people and the assignment routes under /people
 * - Permissions are declared per handler (Authorized<P>), not per router layer
 */
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    assignments::{assign_task, list_user_tasks, update_task_status},
    people::{create_person, delete_person, find_person, list_people},
    tasks::{create_task, delete_task, find_task, list_tasks},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/find", post(find_task))
        .route("/tasks/{task_id}/delete", delete(delete_task))
        .route("/people", get(list_people).post(create_person))
        .route("/people/find", post(find_person))
        .route("/people/assign_task", post(assign_task))
        .route("/people/update_task_status", patch(update_task_status))
        .route(
            "/people/{person_id}/tasks",
            get(list_user_tasks).post(list_user_tasks),
        )
        .route("/people/{person_id}/delete", delete(delete_person))
}
