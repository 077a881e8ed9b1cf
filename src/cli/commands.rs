//! CLI commands
//!
//! One subcommand per API operation, plus `watch` for polling a task to
//! completion and `open` for jumping into its live browser view.

use clap::{Args, Subcommand};
use std::time::{Duration, Instant};
use tokio::time::sleep;

use crate::api::types::TaskStatus;
use crate::api::{BrowserActClient, RunAgentTask, RunWorkflowTask, TaskHandleOps};
use crate::cli::output;
use crate::core::{ApiKey, BrowserActError, Config, Result};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Operations on agents and their tasks
    #[command(subcommand)]
    Agent(AgentCommand),
    /// Operations on workflows and their tasks
    #[command(subcommand)]
    Workflow(WorkflowCommand),
    /// Poll a task until it reaches a terminal status, then print it
    Watch(WatchArgs),
    /// Open a task's live browser view locally
    Open(OpenArgs),
    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Start a new task on an agent
    RunTask(RunAgentTaskArgs),
    /// Permanently terminate a task (cannot be undone)
    StopTask { task_id: String },
    /// Temporarily pause a running task
    PauseTask { task_id: String },
    /// Resume a paused task
    ResumeTask { task_id: String },
    /// Show a task's full detail
    GetTask { task_id: String },
    /// Show only a task's status
    Status { task_id: String },
    /// List tasks, newest first
    ListTasks(ListAgentTasksArgs),
    /// List the account's agents
    ListAgents(PageArgs),
}

#[derive(Subcommand, Debug)]
pub enum WorkflowCommand {
    /// Start a new task from a workflow
    RunTask(RunWorkflowTaskArgs),
    /// Permanently terminate a task (cannot be undone)
    StopTask { task_id: String },
    /// Resume a paused task
    ResumeTask { task_id: String },
    /// Show a task's full detail
    GetTask { task_id: String },
    /// Show only a task's status
    Status { task_id: String },
    /// List tasks, newest first
    ListTasks(ListWorkflowTasksArgs),
    /// List the account's published workflows
    ListWorkflows(PageArgs),
    /// Show one workflow's definition and parameters
    GetWorkflow { workflow_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the active configuration with the API key masked
    Show,
    /// Write a starter config file if none exists
    Init,
    /// Print the config file path
    Path,
}

#[derive(Args, Debug)]
pub struct RunAgentTaskArgs {
    /// Agent that should execute the task
    #[arg(long)]
    agent_id: String,
    /// Natural-language instruction for the agent
    #[arg(long)]
    task: String,
    /// Login secret as url:field=value (repeatable)
    #[arg(long = "secret", value_name = "URL:FIELD=VALUE")]
    secrets: Vec<String>,
    /// Keep the browser profile and print its id
    #[arg(long)]
    save_browser_data: bool,
    /// Reuse an existing browser profile
    #[arg(long)]
    profile_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct RunWorkflowTaskArgs {
    /// Workflow that should execute
    #[arg(long)]
    workflow_id: String,
    /// Parameter binding as name=value (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,
    /// Keep the browser profile and print its id
    #[arg(long)]
    save_browser_data: bool,
    /// Reuse an existing browser profile
    #[arg(long)]
    profile_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Results per page (1-500)
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

#[derive(Args, Debug)]
pub struct ListAgentTasksArgs {
    /// Only tasks spawned from this agent
    #[arg(long)]
    agent_id: Option<String>,
    #[command(flatten)]
    page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ListWorkflowTasksArgs {
    /// Only tasks spawned from this workflow
    #[arg(long)]
    workflow_id: Option<String>,
    #[command(flatten)]
    page: PageArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Task to watch
    task_id: String,
    /// The task was spawned from a workflow
    #[arg(long)]
    workflow: bool,
    /// Seconds between polls (default from config)
    #[arg(long)]
    interval: Option<u64>,
    /// Give up after this many seconds (default from config)
    #[arg(long)]
    max_wait: Option<u64>,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Task whose live view to open
    task_id: String,
    /// The task was spawned from a workflow
    #[arg(long)]
    workflow: bool,
}

/// Execute a parsed command
pub async fn run(command: Command, config: Config, json: bool) -> Result<()> {
    match command {
        Command::Config(command) => run_config(command, &config),
        Command::Agent(command) => {
            let client = BrowserActClient::from_config(&config)?;
            run_agent(command, &client, json).await
        }
        Command::Workflow(command) => {
            let client = BrowserActClient::from_config(&config)?;
            run_workflow(command, &client, json).await
        }
        Command::Watch(args) => {
            let client = BrowserActClient::from_config(&config)?;
            run_watch(args, &client, &config, json).await
        }
        Command::Open(args) => {
            let client = BrowserActClient::from_config(&config)?;
            run_open(args, &client).await
        }
    }
}

async fn run_agent(command: AgentCommand, client: &BrowserActClient, json: bool) -> Result<()> {
    let api = client.agent();
    match command {
        AgentCommand::RunTask(args) => {
            let mut request = RunAgentTask::new(args.agent_id, args.task)
                .save_browser_data(args.save_browser_data);
            for raw in &args.secrets {
                let (url, field, value) = parse_secret(raw)?;
                request = request.secret(url, field, value);
            }
            if let Some(profile_id) = args.profile_id {
                request = request.profile_id(profile_id);
            }
            let created = api.run_task(&request).await?;
            output::print_run_response(&created, json)
        }
        AgentCommand::StopTask { task_id } => {
            api.stop_task(&task_id).await?;
            println!("Stopped task {}", task_id);
            Ok(())
        }
        AgentCommand::PauseTask { task_id } => {
            api.pause_task(&task_id).await?;
            println!("Paused task {}", task_id);
            Ok(())
        }
        AgentCommand::ResumeTask { task_id } => {
            api.resume_task(&task_id).await?;
            println!("Resumed task {}", task_id);
            Ok(())
        }
        AgentCommand::GetTask { task_id } => {
            let task = api.get_task(&task_id).await?;
            output::print_task(&task, json)
        }
        AgentCommand::Status { task_id } => {
            let status = api.get_task_status(&task_id).await?;
            println!("{}", status);
            Ok(())
        }
        AgentCommand::ListTasks(args) => {
            let page = api
                .list_tasks(args.agent_id.as_deref(), args.page.page, args.page.limit)
                .await?;
            output::print_task_page(&page, json)
        }
        AgentCommand::ListAgents(args) => {
            let page = api.list_agents(args.page, args.limit).await?;
            output::print_agent_page(&page, json)
        }
    }
}

async fn run_workflow(
    command: WorkflowCommand,
    client: &BrowserActClient,
    json: bool,
) -> Result<()> {
    let api = client.workflow();
    match command {
        WorkflowCommand::RunTask(args) => {
            let mut request =
                RunWorkflowTask::new(args.workflow_id).save_browser_data(args.save_browser_data);
            for raw in &args.params {
                let (name, value) = parse_param(raw)?;
                request = request.param(name, value);
            }
            if let Some(profile_id) = args.profile_id {
                request = request.profile_id(profile_id);
            }
            let created = api.run_task(&request).await?;
            output::print_run_response(&created, json)
        }
        WorkflowCommand::StopTask { task_id } => {
            api.stop_task(&task_id).await?;
            println!("Stopped task {}", task_id);
            Ok(())
        }
        WorkflowCommand::ResumeTask { task_id } => {
            api.resume_task(&task_id).await?;
            println!("Resumed task {}", task_id);
            Ok(())
        }
        WorkflowCommand::GetTask { task_id } => {
            let task = api.get_task(&task_id).await?;
            output::print_task(&task, json)
        }
        WorkflowCommand::Status { task_id } => {
            let status = api.get_task_status(&task_id).await?;
            println!("{}", status);
            Ok(())
        }
        WorkflowCommand::ListTasks(args) => {
            let page = api
                .list_tasks(args.workflow_id.as_deref(), args.page.page, args.page.limit)
                .await?;
            output::print_task_page(&page, json)
        }
        WorkflowCommand::ListWorkflows(args) => {
            let page = api.list_workflows(args.page, args.limit).await?;
            output::print_workflow_page(&page, json)
        }
        WorkflowCommand::GetWorkflow { workflow_id } => {
            let detail = api.get_workflow(&workflow_id).await?;
            output::print_workflow_detail(&detail, json)
        }
    }
}

async fn run_watch(
    args: WatchArgs,
    client: &BrowserActClient,
    config: &Config,
    json: bool,
) -> Result<()> {
    let interval =
        Duration::from_secs(args.interval.unwrap_or(config.polling.interval_secs).max(1));
    let max_wait = Duration::from_secs(args.max_wait.unwrap_or(config.polling.max_wait_secs));

    if args.workflow {
        watch_task(&client.workflow(), &args.task_id, interval, max_wait, json).await
    } else {
        watch_task(&client.agent(), &args.task_id, interval, max_wait, json).await
    }
}

/// Poll a task's status until it is terminal, then print the full detail.
/// Progress lines go to stderr so JSON output stays pipeable.
async fn watch_task<A: TaskHandleOps>(
    api: &A,
    task_id: &str,
    interval: Duration,
    max_wait: Duration,
    json: bool,
) -> Result<()> {
    let started = Instant::now();
    let mut last: Option<TaskStatus> = None;

    loop {
        let status = api.get_task_status(task_id).await?;
        if last != Some(status) {
            eprintln!("{} task {}: {}", api.surface_name(), task_id, status);
            last = Some(status);
        }

        if status.is_terminal() {
            let task = api.get_task(task_id).await?;
            return output::print_task(&task, json);
        }

        if started.elapsed() >= max_wait {
            return Err(BrowserActError::Other(format!(
                "Task {} still {} after {}s",
                task_id,
                status,
                max_wait.as_secs()
            )));
        }

        sleep(interval).await;
    }
}

async fn run_open(args: OpenArgs, client: &BrowserActClient) -> Result<()> {
    let task = if args.workflow {
        client.workflow().get_task(&args.task_id).await?
    } else {
        client.agent().get_task(&args.task_id).await?
    };

    let live_url = task.live_view_url().ok_or_else(|| {
        BrowserActError::Other(format!("Task {} has no live view URL", args.task_id))
    })?;

    println!("Opening live view: {}", live_url);
    if webbrowser::open(live_url).is_err() {
        println!("Failed to open a browser. Please visit the URL above.");
    }
    Ok(())
}

fn run_config(command: ConfigCommand, config: &Config) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            if let Some(key) = shown.auth.api_key.take() {
                shown.auth.api_key = Some(ApiKey::new(key).masked());
            }
            let rendered = toml::to_string_pretty(&shown)
                .map_err(|e| BrowserActError::config(format!("Failed to render config: {}", e)))?;
            println!("{}", rendered);
            Ok(())
        }
        ConfigCommand::Init => {
            if Config::config_exists() {
                println!(
                    "Config already exists at {}",
                    Config::config_file().display()
                );
            } else {
                Config::default().save()?;
                println!("Wrote {}", Config::config_file().display());
            }
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", Config::config_file().display());
            Ok(())
        }
    }
}

/// Parse a `url:field=value` secret argument.
/// Splits on the first `=` and the last `:` before it, so URLs with
/// scheme colons and values with `=` both survive.
fn parse_secret(raw: &str) -> Result<(String, String, String)> {
    let err =
        || BrowserActError::invalid(format!("Secret '{}' is not in url:field=value form", raw));
    let (prefix, value) = raw.split_once('=').ok_or_else(err)?;
    let (url, field) = prefix.rsplit_once(':').ok_or_else(err)?;
    if url.is_empty() || field.is_empty() {
        return Err(err());
    }
    Ok((url.to_string(), field.to_string(), value.to_string()))
}

/// Parse a `name=value` workflow parameter argument
fn parse_param(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw.split_once('=').ok_or_else(|| {
        BrowserActError::invalid(format!("Parameter '{}' is not in name=value form", raw))
    })?;
    if name.is_empty() {
        return Err(BrowserActError::invalid(format!(
            "Parameter '{}' has an empty name",
            raw
        )));
    }
    Ok((name.to_string(), value.to_string()))
}
