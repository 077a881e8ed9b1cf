//! BrowserAct API client
//!
//! A typed async client for the BrowserAct cloud browser-automation API,
//! plus a small CLI wrapping every operation. All execution happens in
//! BrowserAct's cloud; this crate only spawns tasks, inspects them, and
//! steers their lifecycle over HTTPS.
//!
//! # Architecture
//!
//! - **Core**: Configuration, credentials, and error handling
//! - **API**: The `BrowserActClient` with its agent and workflow surfaces
//! - **CLI**: Command-line interface over the same operations
//!
//! # Usage
//!
//! ```rust,no_run
//! use browseract::api::{BrowserActClient, RunAgentTask};
//!
//! #[tokio::main]
//! async fn main() -> browseract::Result<()> {
//!     let client = BrowserActClient::new("app-your-api-key");
//!
//!     let request = RunAgentTask::new("1946464403177422850", "Open github.com and search for LLM");
//!     let created = client.agent().run_task(&request).await?;
//!
//!     let status = client.agent().get_task_status(&created.id).await?;
//!     println!("task {} is {}", created.id, status);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod core;

// Re-export commonly used items
pub use api::{AgentApi, BrowserActClient, TaskHandleOps, WorkflowApi};
pub use core::{ApiKey, BrowserActError, Config, Result};
