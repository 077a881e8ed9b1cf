//! Output rendering for CLI results
//!
//! Every printer has a JSON mode that re-serializes what the API
//! returned, for piping into jq and scripts.

use serde::Serialize;

use crate::api::types::{
    AgentSummary, Page, RunTaskResponse, Task, WorkflowDetail, WorkflowSummary,
};
use crate::core::Result;

/// Print any payload as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the handle returned by run-task
pub fn print_run_response(created: &RunTaskResponse, json: bool) -> Result<()> {
    if json {
        return print_json(created);
    }
    println!("Task id: {}", created.id);
    if let Some(ref profile_id) = created.profile_id {
        println!("Profile id: {}", profile_id);
    }
    Ok(())
}

/// Print a full task snapshot
pub fn print_task(task: &Task, json: bool) -> Result<()> {
    if json {
        return print_json(task);
    }

    println!("Task {} [{}]", task.id, task.status);
    if let Some(ref description) = task.task {
        println!("  task:      {}", description);
    }
    if let Some(ref agent_id) = task.agent_id {
        println!("  agent:     {}", agent_id);
    }
    if let Some(ref workflow_id) = task.workflow_id {
        println!("  workflow:  {}", workflow_id);
    }
    if let Some(ref params) = task.input_parameters {
        println!("  inputs:    {}", params);
    }
    if let Some(created_at) = task.created_at {
        println!("  created:   {}", created_at.to_rfc3339());
    }
    if let Some(finished_at) = task.finished_at {
        println!("  finished:  {}", finished_at.to_rfc3339());
    }
    if let Some(live_url) = task.live_view_url() {
        println!("  live view: {}", live_url);
    }
    if let Some(ref gif) = task.task_gif_url {
        println!("  recording: {}", gif);
    }

    if !task.steps.is_empty() {
        println!("  steps:");
        for step in &task.steps {
            println!(
                "    {:>3} [{}] {}",
                step.step,
                step.status,
                step.step_goal.as_deref().unwrap_or("-")
            );
        }
    }

    if let Some(ref output) = task.output {
        if let Some(ref text) = output.string {
            if !text.is_empty() {
                println!("  output:");
                for line in text.lines() {
                    println!("    {}", line);
                }
            }
        }
        if let Some(ref files) = output.files {
            for file in files {
                println!("  file: {}", file);
            }
        }
    }

    if let Some(ref failure) = task.task_failure_info {
        let code = failure
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        let message = failure.message.as_deref().unwrap_or("no detail");
        println!("  failure [{}]: {}", code, message);
    }

    Ok(())
}

/// Print one page of tasks, one line per task
pub fn print_task_page(page: &Page<Task>, json: bool) -> Result<()> {
    if json {
        return print_json(page);
    }
    println!("{}", page_header("tasks", page));
    for task in &page.items {
        let label = task
            .task
            .as_deref()
            .or(task.input_parameters.as_deref())
            .unwrap_or("");
        println!("  {}  {:<8} {}", task.id, task.status, label);
    }
    Ok(())
}

/// Print one page of agents
pub fn print_agent_page(page: &Page<AgentSummary>, json: bool) -> Result<()> {
    if json {
        return print_json(page);
    }
    println!("{}", page_header("agents", page));
    for agent in &page.items {
        println!("  {}  {}", agent.id, agent.name.as_deref().unwrap_or(""));
    }
    Ok(())
}

/// Print one page of workflows
pub fn print_workflow_page(page: &Page<WorkflowSummary>, json: bool) -> Result<()> {
    if json {
        return print_json(page);
    }
    println!("{}", page_header("workflows", page));
    for workflow in &page.items {
        println!(
            "  {}  {}  {}",
            workflow.id,
            workflow.name,
            workflow.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// Print one workflow's definition
pub fn print_workflow_detail(detail: &WorkflowDetail, json: bool) -> Result<()> {
    if json {
        return print_json(detail);
    }
    println!("Workflow {} ({})", detail.name, detail.id);
    if let Some(ref description) = detail.description {
        println!("  {}", description);
    }
    if let Some(publish_at) = detail.publish_at {
        println!("  published: {}", publish_at.to_rfc3339());
    }
    if detail.input_parameters.is_empty() {
        println!("  no declared parameters");
    } else {
        println!("  parameters:");
        for param in &detail.input_parameters {
            let flag = if param.default_enabled {
                "enabled"
            } else {
                "optional"
            };
            println!("    {} ({})", param.name, flag);
        }
    }
    Ok(())
}

/// One line summarizing where a listing stands
fn page_header<T>(noun: &str, page: &Page<T>) -> String {
    format!(
        "Page {}/{} ({} of {} {})",
        page.page,
        page.total_pages,
        page.items.len(),
        page.total_count,
        noun
    )
}
