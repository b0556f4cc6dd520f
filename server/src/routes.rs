//! The request adapter: one stateless handler per dashboard capability.
//!
//! Every handler follows the same shape: resolve a credential, build a
//! fresh [`AsanaClient`], issue the remote call(s), reshape the result.
//! Failures are logged with upstream detail and mapped to the fixed
//! status/message each endpoint documents; only the credential-test
//! endpoint echoes upstream detail back to the caller, since that is the
//! one failure the user can act on.

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use chimera_asana::{AsanaClient, NewTask, Project, Task, TASK_OPT_FIELDS, Workspace};

use crate::settings::{Settings, SettingsStore};
use crate::ui;

/// Dashboard task lists are a glanceable summary, not a task browser.
const MAX_DASHBOARD_TASKS: usize = 50;

/// Header carrying an explicit credential on the workspace/project
/// discovery endpoints used by the settings page.
const TOKEN_HEADER: &str = "x-asana-token";

/// Shared dependencies for all handlers.
#[derive(Clone)]
pub struct AppState {
    settings: SettingsStore,
    asana_base_url: String,
}

impl AppState {
    pub fn new(settings: SettingsStore, asana_base_url: impl Into<String>) -> Self {
        Self {
            settings,
            asana_base_url: asana_base_url.into(),
        }
    }

    /// Builds a client for one request. Pure: no shared handle, no
    /// credential mutation, nothing to race on across requests.
    fn client(&self, token: &str) -> AsanaClient {
        AsanaClient::with_base_url(token, &self.asana_base_url)
    }
}

/// Picks the request's explicit credential when one was supplied,
/// otherwise falls back to the stored one.
fn resolve_token<'a>(explicit: Option<&'a str>, stored: &'a str) -> &'a str {
    match explicit {
        Some(token) if !token.is_empty() => token,
        _ => stored,
    }
}

fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok())
}

/// Stable incomplete-first ordering, capped for the dashboard. Relative
/// order within each completion bucket is the upstream order.
fn order_for_dashboard(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|task| task.completed);
    tasks.truncate(MAX_DASHBOARD_TASKS);
    tasks
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct TaskStats {
    active: usize,
    completed: usize,
}

fn tally(tasks: &[Task]) -> TaskStats {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskStats {
        active: tasks.len() - completed,
        completed,
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Error reply carrying the fixed per-endpoint message. Upstream detail
/// goes to the log; `details` is populated only where the caller can act
/// on it.
struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error)
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.error,
                details: self.details,
            }),
        )
            .into_response()
    }
}

/// Builds the adapter's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::dashboard))
        .route("/api/settings", get(get_settings).post(save_settings))
        .route("/api/asana/test", post(test_connection))
        .route("/api/asana/workspaces", get(list_workspaces))
        .route("/api/asana/projects", get(list_workspace_projects))
        .route("/api/projects", get(list_dashboard_projects))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/stats", get(task_stats))
        .route(
            "/api/tasks/{task_id}",
            put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{task_id}/complete", put(complete_task))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct SettingsResponse {
    #[serde(flatten)]
    settings: Settings,
    configured: bool,
}

async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let settings = state.settings.snapshot().await;
    let configured = settings.configured();
    Json(SettingsResponse {
        settings,
        configured,
    })
}

async fn save_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Json<Value> {
    state.settings.replace(settings).await;
    Json(json!({ "success": true }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestConnectionRequest {
    #[serde(default)]
    asana_token: String,
}

async fn test_connection(
    State(state): State<AppState>,
    Json(request): Json<TestConnectionRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = request.asana_token.trim();
    if token.is_empty() {
        return Err(ApiError::bad_request("No token provided"));
    }

    let me = state.client(token).current_user().await.map_err(|e| {
        tracing::error!("asana connection test failed: {e}");
        ApiError::bad_request("Invalid Asana token or connection failed")
            .with_details(e.to_string())
    })?;

    tracing::info!(user = %me.name, "asana connection test succeeded");
    Ok(Json(json!({
        "success": true,
        "user": me.name,
        "email": me.email,
    })))
}

async fn list_workspaces(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Workspace>>, ApiError> {
    let Some(token) = header_token(&headers) else {
        return Err(ApiError::unauthorized("No Asana token provided"));
    };

    let workspaces = state.client(token).list_workspaces().await.map_err(|e| {
        tracing::error!("failed to fetch workspaces: {e}");
        ApiError::unauthorized("Invalid token or failed to fetch workspaces")
    })?;
    Ok(Json(workspaces))
}

#[derive(Debug, Deserialize)]
struct ProjectsQuery {
    #[serde(default)]
    workspace: String,
}

async fn list_workspace_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Project>>, ApiError> {
    let settings = state.settings.snapshot().await;
    let token = resolve_token(header_token(&headers), &settings.asana_token);

    let projects = state
        .client(token)
        .list_projects(&query.workspace)
        .await
        .map_err(|e| {
            tracing::error!("failed to fetch projects: {e}");
            ApiError::internal("Failed to fetch projects")
        })?;
    Ok(Json(projects))
}

async fn list_dashboard_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let settings = state.settings.snapshot().await;
    if settings.asana_workspace.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let projects = state
        .client(&settings.asana_token)
        .list_projects(&settings.asana_workspace)
        .await
        .map_err(|e| {
            tracing::error!("failed to fetch projects: {e}");
            ApiError::internal("Failed to fetch projects")
        })?;
    Ok(Json(projects))
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let settings = state.settings.snapshot().await;
    if settings.asana_workspace.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let client = state.client(&settings.asana_token);
    let tasks = async {
        let me = client.current_user().await?;
        client
            .list_tasks(&settings.asana_workspace, &me.gid, TASK_OPT_FIELDS)
            .await
    }
    .await
    .map_err(|e| {
        tracing::error!("failed to fetch tasks: {e}");
        ApiError::internal("Failed to fetch tasks")
    })?;

    Ok(Json(order_for_dashboard(tasks)))
}

async fn task_stats(State(state): State<AppState>) -> Result<Json<TaskStats>, ApiError> {
    let settings = state.settings.snapshot().await;
    if settings.asana_workspace.is_empty() {
        return Ok(Json(TaskStats::default()));
    }

    let client = state.client(&settings.asana_token);
    let tasks = async {
        let me = client.current_user().await?;
        client
            .list_tasks(&settings.asana_workspace, &me.gid, "completed")
            .await
    }
    .await
    .map_err(|e| {
        tracing::error!("failed to fetch task stats: {e}");
        ApiError::internal("Failed to fetch task stats")
    })?;

    Ok(Json(tally(&tasks)))
}

#[derive(Debug, Deserialize)]
struct CreateTaskRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    project: String,
    due_on: Option<String>,
}

async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let settings = state.settings.snapshot().await;

    // The remote API enforces name/workspace presence; the adapter only
    // fills in the defaults the UI relies on.
    let project = if request.project.is_empty() {
        settings.asana_project.clone()
    } else {
        request.project
    };
    let new_task = NewTask {
        name: request.name,
        workspace: settings.asana_workspace.clone(),
        notes: request.notes,
        projects: (!project.is_empty()).then(|| vec![project]),
        due_on: request.due_on,
    };

    let task = state
        .client(&settings.asana_token)
        .create_task(&new_task)
        .await
        .map_err(|e| {
            tracing::error!("failed to create task: {e}");
            ApiError::internal("Failed to create task")
        })?;
    Ok(Json(task))
}

async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let settings = state.settings.snapshot().await;
    let task = state
        .client(&settings.asana_token)
        .update_task(&task_id, &json!({ "completed": true }))
        .await
        .map_err(|e| {
            tracing::error!("failed to complete task {task_id}: {e}");
            ApiError::internal("Failed to complete task")
        })?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(updates): Json<Value>,
) -> Result<Json<Task>, ApiError> {
    let settings = state.settings.snapshot().await;
    let task = state
        .client(&settings.asana_token)
        .update_task(&task_id, &updates)
        .await
        .map_err(|e| {
            tracing::error!("failed to update task {task_id}: {e}");
            ApiError::internal("Failed to update task")
        })?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let settings = state.settings.snapshot().await;
    state
        .client(&settings.asana_token)
        .delete_task(&task_id)
        .await
        .map_err(|e| {
            tracing::error!("failed to delete task {task_id}: {e}");
            ApiError::internal("Failed to delete task")
        })?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    configured: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = state.settings.snapshot().await;
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        configured: settings.configured(),
    })
}
