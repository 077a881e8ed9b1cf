//! Task handle trait shared by the agent and workflow surfaces
//!
//! Both surfaces take the same task id for the lifecycle calls, so code
//! like the CLI's watch loop can stay agnostic about which surface
//! spawned a task.

use async_trait::async_trait;

use crate::api::types::{Task, TaskStatus};
use crate::core::Result;

/// Lifecycle operations common to agent and workflow tasks
#[async_trait]
pub trait TaskHandleOps: Send + Sync {
    /// Fetch the full task snapshot
    async fn get_task(&self, task_id: &str) -> Result<Task>;

    /// Fetch only the status; the cheap call for polling
    async fn get_task_status(&self, task_id: &str) -> Result<TaskStatus>;

    /// Permanently terminate the task. Cannot be undone.
    async fn stop_task(&self, task_id: &str) -> Result<()>;

    /// Continue a paused task. The service rejects any other state.
    async fn resume_task(&self, task_id: &str) -> Result<()>;

    /// Which surface this is, "agent" or "workflow"
    fn surface_name(&self) -> &str;
}
