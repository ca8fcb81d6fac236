/**
 * Responsibility
 *  - Declare one marker type per capability the API checks
 *  - New protected routes add their permission here
 *
 * Everything declared pub here is re-exported through ./mod.rs
 */
use super::core::Permission;

macro_rules! permission {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            pub enum $ty {}

            impl Permission for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

permission! {
    // any valid token with a permissions claim
    AnyPermission => "",

    // tasks
    ListAllTasks => "list_all_tasks",
    AddTask => "add_task",
    DeleteTask => "delete_task",

    // people
    ListAllPeople => "list_all_people",
    AddPerson => "add_person",
    DeletePerson => "delete_person",

    // assignments
    AssignTask => "assign_task",
    UpdateTaskStatus => "update_task_status",
    ListUserTasks => "list_user_tasks",
}
