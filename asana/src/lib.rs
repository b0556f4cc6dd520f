//! Typed client for the Asana REST API (v1.0).
//!
//! This crate owns the remote half of the dashboard: a thin reqwest-based
//! client that authenticates with a personal access token and exposes the
//! handful of calls the adapter needs (identity, workspaces, projects,
//! tasks). The client is a pure function of its credential: construct one
//! per request with [`AsanaClient::new`] and drop it when done. There is
//! deliberately no shared client instance and no way to swap the token on
//! an existing handle.

mod client;
mod error;
mod models;

pub use client::AsanaClient;
pub use error::{AsanaError, AsanaResult};
pub use models::{NewTask, Project, Task, TaskRef, User, UserRef, Workspace};

/// Base URL of the production Asana API.
pub const ASANA_API_URL: &str = "https://app.asana.com/api/1.0";

/// Field projection requested when listing tasks for the dashboard.
pub const TASK_OPT_FIELDS: &str = "name,completed,due_on,assignee,assignee.name,projects,notes";
