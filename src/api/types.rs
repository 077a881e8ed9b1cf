//! Wire types for the task API
//!
//! Field names and optionality mirror the service's JSON exactly. All of
//! this is remote-owned state; the client never synthesizes or mutates a
//! task record locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted page number for list endpoints
pub const MIN_PAGE: u32 = 1;
/// Smallest accepted page size for list endpoints
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted page size for list endpoints
pub const MAX_LIMIT: u32 = 500;

/// Lifecycle status of a task
///
/// The service reports exactly these five values. An unrecognized string
/// is a decode error rather than a silent fallback, so a new remote state
/// surfaces loudly instead of being misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Accepted by the service, not yet picked up
    Created,
    /// Actively executing
    Running,
    /// Suspended; can be resumed
    Paused,
    /// Completed successfully
    Finished,
    /// Stopped or errored; see task_failure_info
    Failed,
}

impl TaskStatus {
    /// Whether the task can no longer make progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Finished | TaskStatus::Failed)
    }

    /// The lowercase form used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Created => "created",
            TaskStatus::Running => "running",
            TaskStatus::Paused => "paused",
            TaskStatus::Finished => "finished",
            TaskStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Output of a finished task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Final answer text, when the task produced one
    #[serde(default)]
    pub string: Option<String>,
    /// URLs of files the task saved
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

/// One recorded action in a task's execution trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStep {
    pub id: String,
    /// 1-based position in the trace
    pub step: u32,
    /// Step verdict as reported by the service, e.g. "succeed"
    pub status: String,
    #[serde(default)]
    pub evaluation_previous_goal: Option<String>,
    #[serde(default)]
    pub step_goal: Option<String>,
    #[serde(default)]
    pub screenshots_url: Option<String>,
}

/// Failure detail attached to a failed task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFailureInfo {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Live view of the browser session executing a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveUrlInfo {
    pub width: u32,
    pub height: u32,
    pub live_url: String,
}

/// Full snapshot of a task as the service reports it
///
/// Agent- and workflow-spawned tasks share this shape. Agent tasks carry
/// `task` and `agent_id`; workflow tasks carry `workflow_id` and the
/// bound `input_parameters` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Natural-language instruction (agent tasks only)
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub output: Option<TaskOutput>,
    pub status: TaskStatus,
    #[serde(default)]
    pub steps: Vec<TaskStep>,
    #[serde(default)]
    pub live_url_info: Option<LiveUrlInfo>,
    /// Direct link to watch the session while it runs
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub task_failure_info: Option<TaskFailureInfo>,
    /// Recording of the finished run (agent tasks only)
    #[serde(default)]
    pub task_gif_url: Option<String>,
    /// Owning agent, for tasks spawned from an agent
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Owning workflow, for tasks spawned from a workflow
    #[serde(default)]
    pub workflow_id: Option<String>,
    /// Bound workflow inputs, rendered by the service as "name=value; ..."
    #[serde(default)]
    pub input_parameters: Option<String>,
}

impl Task {
    /// The live view URL, preferring the richer live_url_info block
    pub fn live_view_url(&self) -> Option<&str> {
        self.live_url_info
            .as_ref()
            .map(|info| info.live_url.as_str())
            .or(self.live_url.as_deref())
    }
}

/// Response to a run-task call: the handle for the new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTaskResponse {
    /// Task id used by every subsequent lifecycle call
    pub id: String,
    /// Browser profile kept for reuse when save_browser_data was set
    #[serde(default, rename = "profileId")]
    pub profile_id: Option<String>,
}

/// Pagination envelope for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// 1-based page number that was served
    pub page: u32,
    /// Page size; the agents listing names this field `size`
    #[serde(alias = "size")]
    pub limit: u32,
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_count: u64,
}

/// One agent in the account's agent list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One workflow in the account's workflow list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
}

/// Full workflow definition including its declared parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    /// Inputs the workflow declares; values are bound at run time
    #[serde(default)]
    pub input_parameters: Vec<WorkflowInputParam>,
}

/// A parameter a workflow declares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowInputParam {
    pub name: String,
    /// Whether the parameter is pre-enabled in the run dialog
    pub default_enabled: bool,
}

/// A name/value pair bound when spawning a workflow task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputParameter {
    pub name: String,
    pub value: String,
}

impl InputParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Status-only payload from the get-task-status endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub status: TaskStatus,
}
