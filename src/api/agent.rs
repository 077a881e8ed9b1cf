//! Agent surface of the task API
//!
//! An agent is an automation identity configured in the BrowserAct
//! console. Running one spawns a task; the returned id drives every
//! other call here.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use crate::api::client::{validate_page_params, BrowserActClient};
use crate::api::traits::TaskHandleOps;
use crate::api::types::{AgentSummary, Page, RunTaskResponse, StatusResponse, Task, TaskStatus};
use crate::core::Result;

/// Parameters for spawning a task from an agent
#[derive(Debug, Clone, Serialize)]
pub struct RunAgentTask {
    /// Agent that should execute the task
    pub agent_id: String,
    /// Natural-language instruction for the agent
    pub task: String,
    /// Login credentials keyed by the URL they apply to. Values are
    /// substituted during execution and never echoed back by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<HashMap<String, HashMap<String, String>>>,
    /// Ask the service to keep the browser profile and return its id
    pub save_browser_data: bool,
    /// Existing browser profile to reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}

impl RunAgentTask {
    /// Create a request with the required fields
    pub fn new(agent_id: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            task: task.into(),
            secrets: None,
            save_browser_data: false,
            profile_id: None,
        }
    }

    /// Attach one credential field for a login URL
    pub fn secret(
        mut self,
        url: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.secrets
            .get_or_insert_with(HashMap::new)
            .entry(url.into())
            .or_default()
            .insert(field.into(), value.into());
        self
    }

    /// Keep the browser profile after the run
    pub fn save_browser_data(mut self, save: bool) -> Self {
        self.save_browser_data = save;
        self
    }

    /// Reuse an existing browser profile
    pub fn profile_id(mut self, id: impl Into<String>) -> Self {
        self.profile_id = Some(id.into());
        self
    }
}

/// Operations under `/agent`, obtained from [`BrowserActClient::agent`]
#[derive(Clone, Copy)]
pub struct AgentApi<'a> {
    client: &'a BrowserActClient,
}

impl<'a> AgentApi<'a> {
    pub(crate) fn new(client: &'a BrowserActClient) -> Self {
        Self { client }
    }

    /// Spawn a new task and return its handle.
    ///
    /// Nothing about this call is idempotent: every successful call may
    /// create a new remote task, so a retry after an ambiguous failure can
    /// leave an orphan running.
    pub async fn run_task(&self, request: &RunAgentTask) -> Result<RunTaskResponse> {
        self.client.post_json("/agent/run-task", request).await
    }

    /// Permanently terminate a task. Cannot be undone; a task that already
    /// reached a terminal status answers code 10121.
    pub async fn stop_task(&self, task_id: &str) -> Result<()> {
        self.client
            .put_unit("/agent/stop-task", &[("task_id", task_id.to_string())])
            .await
    }

    /// Temporarily suspend a running task; continue it with
    /// [`AgentApi::resume_task`]. The service answers 200 even when the
    /// task is already terminal, in which case nothing changes.
    pub async fn pause_task(&self, task_id: &str) -> Result<()> {
        self.client
            .put_unit("/agent/pause-task", &[("task_id", task_id.to_string())])
            .await
    }

    /// Continue a paused task. Any other remote state answers code 10127.
    pub async fn resume_task(&self, task_id: &str) -> Result<()> {
        self.client
            .put_unit("/agent/resume-task", &[("task_id", task_id.to_string())])
            .await
    }

    /// Fetch a task's full detail: status, steps, output, live view
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.client
            .get_json("/agent/get-task", &[("task_id", task_id.to_string())])
            .await
    }

    /// Fetch only a task's status; the cheap call for polling
    pub async fn get_task_status(&self, task_id: &str) -> Result<TaskStatus> {
        let response: StatusResponse = self
            .client
            .get_json("/agent/get-task-status", &[("task_id", task_id.to_string())])
            .await?;
        Ok(response.status)
    }

    /// Page through tasks, newest first. Pass `None` to list tasks across
    /// all agents. `page` starts at 1 and `limit` must be within 1..=500;
    /// out-of-range values are rejected without issuing a request.
    pub async fn list_tasks(
        &self,
        agent_id: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<Page<Task>> {
        validate_page_params(page, limit)?;
        self.client
            .get_json(
                "/agent/list-tasks",
                &[
                    ("agent_id", agent_id.unwrap_or_default().to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
    }

    /// Page through the account's agents
    pub async fn list_agents(&self, page: u32, limit: u32) -> Result<Page<AgentSummary>> {
        validate_page_params(page, limit)?;
        self.client
            .get_json(
                "/agent/list-agents",
                &[("page", page.to_string()), ("size", limit.to_string())],
            )
            .await
    }
}

#[async_trait]
impl TaskHandleOps for AgentApi<'_> {
    async fn get_task(&self, task_id: &str) -> Result<Task> {
        AgentApi::get_task(self, task_id).await
    }

    async fn get_task_status(&self, task_id: &str) -> Result<TaskStatus> {
        AgentApi::get_task_status(self, task_id).await
    }

    async fn stop_task(&self, task_id: &str) -> Result<()> {
        AgentApi::stop_task(self, task_id).await
    }

    async fn resume_task(&self, task_id: &str) -> Result<()> {
        AgentApi::resume_task(self, task_id).await
    }

    fn surface_name(&self) -> &str {
        "agent"
    }
}
