//! Wire types for the subset of the Asana API the dashboard touches.
//!
//! Asana wraps every payload in a `{"data": ...}` envelope; the client
//! unwraps it before these types reach callers. Optional fields follow
//! the dashboard's task projection, not the full Asana schema.

use serde::{Deserialize, Serialize};

/// The authenticated user, from `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub gid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A workspace: the top-level container scoping projects and tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub gid: String,
    pub name: String,
}

/// A project within a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub gid: String,
    pub name: String,
}

/// Compact assignee reference embedded in a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub gid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Compact project reference embedded in a task's membership list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRef {
    pub gid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A task, shaped by [`crate::TASK_OPT_FIELDS`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub gid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<TaskRef>>,
}

/// Body for task creation. Serialized under the `data` envelope by the
/// client; `projects` and `due_on` are omitted entirely when absent.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub name: String,
    pub workspace: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}
