//! API module - typed surfaces over the BrowserAct HTTP endpoints
//!
//! The client exposes two parallel namespaces, agents and workflows,
//! which share one task lifecycle model.

pub mod agent;
pub mod client;
pub mod traits;
pub mod types;
pub mod workflow;

pub use agent::{AgentApi, RunAgentTask};
pub use client::BrowserActClient;
pub use traits::TaskHandleOps;
pub use types::{
    AgentSummary, InputParameter, LiveUrlInfo, Page, RunTaskResponse, Task, TaskFailureInfo,
    TaskOutput, TaskStatus, TaskStep, WorkflowDetail, WorkflowInputParam, WorkflowSummary,
};
pub use workflow::{RunWorkflowTask, WorkflowApi};
