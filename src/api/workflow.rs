//! Workflow surface of the task API
//!
//! A workflow is a published, parameterized automation. Spawning one
//! binds values to its declared inputs; the resulting task shares the
//! agent task lifecycle, except that workflow tasks cannot be paused.

use async_trait::async_trait;
use serde::Serialize;

use crate::api::client::{validate_page_params, BrowserActClient};
use crate::api::traits::TaskHandleOps;
use crate::api::types::{
    InputParameter, Page, RunTaskResponse, StatusResponse, Task, TaskStatus, WorkflowDetail,
    WorkflowSummary,
};
use crate::core::Result;

/// Parameters for spawning a task from a workflow
#[derive(Debug, Clone, Serialize)]
pub struct RunWorkflowTask {
    /// Workflow that should execute
    pub workflow_id: String,
    /// Values for the parameters the workflow declares
    pub input_parameters: Vec<InputParameter>,
    /// Ask the service to keep the browser profile and return its id
    pub save_browser_data: bool,
    /// Existing browser profile to reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}

impl RunWorkflowTask {
    /// Create a request with the required fields
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            input_parameters: Vec::new(),
            save_browser_data: false,
            profile_id: None,
        }
    }

    /// Bind a value to one declared parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.input_parameters.push(InputParameter::new(name, value));
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

/// Operations under `/workflow`, obtained from [`BrowserActClient::workflow`]
#[derive(Clone, Copy)]
pub struct WorkflowApi<'a> {
    client: &'a BrowserActClient,
}

impl<'a> WorkflowApi<'a> {
    pub(crate) fn new(client: &'a BrowserActClient) -> Self {
        Self { client }
    }

    /// Spawn a new task from a workflow and return its handle.
    ///
    /// As with agent tasks, every successful call may create a new remote
    /// task; nothing about this call is idempotent.
    pub async fn run_task(&self, request: &RunWorkflowTask) -> Result<RunTaskResponse> {
        self.client.post_json("/workflow/run-task", request).await
    }

    /// Permanently terminate a task. Cannot be undone; a task that already
    /// reached a terminal status answers code 10121.
    pub async fn stop_task(&self, task_id: &str) -> Result<()> {
        self.client
            .put_unit("/workflow/stop-task", &[("task_id", task_id.to_string())])
            .await
    }

    /// Continue a paused task. Any other remote state answers code 10127.
    pub async fn resume_task(&self, task_id: &str) -> Result<()> {
        self.client
            .put_unit("/workflow/resume-task", &[("task_id", task_id.to_string())])
            .await
    }

    /// Fetch a task's full detail, including the bound input parameters
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.client
            .get_json("/workflow/get-task", &[("task_id", task_id.to_string())])
            .await
    }

    /// Fetch only a task's status; the cheap call for polling
    pub async fn get_task_status(&self, task_id: &str) -> Result<TaskStatus> {
        let response: StatusResponse = self
            .client
            .get_json(
                "/workflow/get-task-status",
                &[("task_id", task_id.to_string())],
            )
            .await?;
        Ok(response.status)
    }

    /// Page through tasks, newest first. Pass `None` to list tasks across
    /// all workflows. `page` starts at 1 and `limit` must be within
    /// 1..=500; out-of-range values are rejected without issuing a request.
    pub async fn list_tasks(
        &self,
        workflow_id: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<Page<Task>> {
        validate_page_params(page, limit)?;
        self.client
            .get_json(
                "/workflow/list-tasks",
                &[
                    ("workflow_id", workflow_id.unwrap_or_default().to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
    }

    /// Page through the account's published workflows
    pub async fn list_workflows(&self, page: u32, limit: u32) -> Result<Page<WorkflowSummary>> {
        validate_page_params(page, limit)?;
        self.client
            .get_json(
                "/workflow/list-workflows",
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await
    }

    /// Fetch one workflow's definition, including its declared parameters
    pub async fn get_workflow(&self, workflow_id: &str) -> Result<WorkflowDetail> {
        self.client
            .get_json(
                "/workflow/get-workflow",
                &[("workflow_id", workflow_id.to_string())],
            )
            .await
    }
}

#[async_trait]
impl TaskHandleOps for WorkflowApi<'_> {
    async fn get_task(&self, task_id: &str) -> Result<Task> {
        WorkflowApi::get_task(self, task_id).await
    }

    async fn get_task_status(&self, task_id: &str) -> Result<TaskStatus> {
        WorkflowApi::get_task_status(self, task_id).await
    }

    async fn stop_task(&self, task_id: &str) -> Result<()> {
        WorkflowApi::stop_task(self, task_id).await
    }

    async fn resume_task(&self, task_id: &str) -> Result<()> {
        WorkflowApi::resume_task(self, task_id).await
    }

    fn surface_name(&self) -> &str {
        "workflow"
    }
}
