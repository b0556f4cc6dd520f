use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AsanaResult, api_error};
use crate::models::{NewTask, Project, Task, User, Workspace};
use crate::{ASANA_API_URL, AsanaError};

/// Every Asana payload arrives wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Authenticated handle to the Asana API.
///
/// Construction is cheap and side-effect free; build one per request with
/// the credential that request resolved to. The token cannot be changed
/// after construction, so two in-flight requests with different
/// credentials can never observe each other's token.
pub struct AsanaClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl AsanaClient {
    /// Creates a client for the production API with the given bearer
    /// token. Surrounding whitespace is trimmed; pasted tokens often
    /// carry a trailing newline.
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, ASANA_API_URL)
    }

    /// Creates a client against an alternate base URL. Used by tests to
    /// point at a mock server.
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        }
    }

    /// The authenticated user's identity. Doubles as the credential
    /// check: an invalid token fails here with a 401.
    pub async fn current_user(&self) -> AsanaResult<User> {
        self.get(&format!("{}/users/me", self.base_url), &[]).await
    }

    /// All workspaces visible to the token.
    pub async fn list_workspaces(&self) -> AsanaResult<Vec<Workspace>> {
        self.get(&format!("{}/workspaces", self.base_url), &[]).await
    }

    /// Non-archived projects in a workspace.
    pub async fn list_projects(&self, workspace: &str) -> AsanaResult<Vec<Project>> {
        self.get(
            &format!("{}/projects", self.base_url),
            &[("workspace", workspace), ("archived", "false")],
        )
        .await
    }

    /// Tasks in `workspace` assigned to `assignee`, with the requested
    /// field projection. Upstream ordering is preserved.
    pub async fn list_tasks(
        &self,
        workspace: &str,
        assignee: &str,
        opt_fields: &str,
    ) -> AsanaResult<Vec<Task>> {
        self.get(
            &format!("{}/tasks", self.base_url),
            &[
                ("workspace", workspace),
                ("assignee", assignee),
                ("opt_fields", opt_fields),
            ],
        )
        .await
    }

    /// Creates a task and returns the created resource.
    pub async fn create_task(&self, task: &NewTask) -> AsanaResult<Task> {
        let url = format!("{}/tasks", self.base_url);
        let body = serde_json::json!({ "data": task });
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Applies a partial update to a task. `updates` is forwarded as-is
    /// under the `data` envelope; Asana ignores unknown fields.
    pub async fn update_task(&self, gid: &str, updates: &Value) -> AsanaResult<Task> {
        let url = format!("{}/tasks/{}", self.base_url, urlencoding::encode(gid));
        let body = serde_json::json!({ "data": updates });
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, gid: &str) -> AsanaResult<()> {
        let url = format!("{}/tasks/{}", self.base_url, urlencoding::encode(gid));
        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> AsanaResult<T> {
        let mut request = self.client.get(url).bearer_auth(&self.token);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Checks the status, then unwraps the `data` envelope.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AsanaResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "asana request rejected");
            return Err(api_error(status.as_u16(), &body));
        }
        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| AsanaError::Parse(format!("unexpected asana response: {e}")))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_trimmed() {
        let client = AsanaClient::new("  1/12345:abcdef \n");
        assert_eq!(client.token, "1/12345:abcdef");
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = AsanaClient::with_base_url("t", "http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_envelope_unwrap() {
        let envelope: Envelope<Vec<Workspace>> =
            serde_json::from_str(r#"{"data":[{"gid":"1","name":"Acme"}]}"#).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].name, "Acme");
    }
}
