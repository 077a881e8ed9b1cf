//! In-process mock of the BrowserAct API for integration tests.
//!
//! The mock keeps tasks in shared state and exposes a handle so tests can
//! play the remote executor: finishing or failing tasks between polls.
//! All wire shapes are built by hand here so the client's serde layer is
//! checked against raw JSON, not against itself.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use browseract::api::BrowserActClient;

/// Bearer token the mock accepts
pub const API_KEY: &str = "app-test-key-0123456789";
/// Seeded agent available in every test
pub const AGENT_ID: &str = "1946464403177422850";
/// Second seeded agent, for listing filters
pub const AGENT_ID_SECONDARY: &str = "1946464403177422851";
/// Seeded workflow available in every test
pub const WORKFLOW_ID: &str = "1952511968291168257";

const CREATED_AT: &str = "2025-10-08T09:47:02Z";
const FINISHED_AT: &str = "2025-10-08T09:54:10Z";

#[derive(Clone)]
struct MockTask {
    id: String,
    status: String,
    description: Option<String>,
    agent_id: Option<String>,
    workflow_id: Option<String>,
    input_parameters: Option<String>,
    profile_id: Option<String>,
    output: Option<String>,
    failure: Option<(i64, String)>,
    finished_at: Option<String>,
    steps: Vec<(u32, String)>,
}

struct MockState {
    tasks: Vec<MockTask>,
    agents: Vec<(String, String)>,
    task_counter: u64,
    quota_exceeded: bool,
}

impl MockState {
    fn next_task_id(&mut self) -> String {
        self.task_counter += 1;
        format!("1642903474253{:04}", self.task_counter)
    }

    fn task_mut(&mut self, task_id: &str) -> Option<&mut MockTask> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}

type Shared = Arc<Mutex<MockState>>;

/// A running mock API bound to an ephemeral port
pub struct MockApi {
    pub base_url: String,
    state: Shared,
}

impl MockApi {
    /// Start the mock and return its handle
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state: Shared = Arc::new(Mutex::new(MockState {
            tasks: Vec::new(),
            agents: vec![
                (AGENT_ID.to_string(), "Demo agent".to_string()),
                (AGENT_ID_SECONDARY.to_string(), "Search agent".to_string()),
            ],
            task_counter: 0,
            quota_exceeded: false,
        }));

        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// A client authenticated with the accepted key
    pub fn client(&self) -> BrowserActClient {
        BrowserActClient::with_base_url(self.base_url.clone(), API_KEY).unwrap()
    }

    /// A client carrying an arbitrary key
    pub fn client_with_key(&self, key: &str) -> BrowserActClient {
        BrowserActClient::with_base_url(self.base_url.clone(), key).unwrap()
    }

    /// Complete a task successfully, as the remote executor would
    pub fn finish_task(&self, task_id: &str, output: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(task) = state.task_mut(task_id) {
            task.status = "finished".to_string();
            task.output = Some(output.to_string());
            task.finished_at = Some(FINISHED_AT.to_string());
            let next = task.steps.len() as u32 + 1;
            task.steps.push((next, "Extract the final answer".to_string()));
        }
    }

    /// Fail a task remotely with the given failure detail
    pub fn fail_task(&self, task_id: &str, code: i64, message: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(task) = state.task_mut(task_id) {
            task.status = "failed".to_string();
            task.failure = Some((code, message.to_string()));
            task.finished_at = Some(FINISHED_AT.to_string());
        }
    }

    /// Toggle the running-tasks quota rejection for run-task calls
    pub fn set_quota_exceeded(&self, exceeded: bool) {
        self.state.lock().unwrap().quota_exceeded = exceeded;
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/agent/run-task", post(agent_run_task))
        .route("/agent/stop-task", put(stop_task))
        .route("/agent/pause-task", put(pause_task))
        .route("/agent/resume-task", put(resume_task))
        .route("/agent/get-task", get(get_task))
        .route("/agent/get-task-status", get(get_task_status))
        .route("/agent/list-tasks", get(agent_list_tasks))
        .route("/agent/list-agents", get(list_agents))
        .route("/workflow/run-task", post(workflow_run_task))
        .route("/workflow/stop-task", put(stop_task))
        .route("/workflow/resume-task", put(resume_task))
        .route("/workflow/get-task", get(get_task))
        .route("/workflow/get-task-status", get(get_task_status))
        .route("/workflow/list-tasks", get(workflow_list_tasks))
        .route("/workflow/list-workflows", get(list_workflows))
        .route("/workflow/get-workflow", get(get_workflow))
        .with_state(state)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", API_KEY))
        .unwrap_or(false)
}

fn api_error(status: StatusCode, code: i64, msg: &str) -> Response {
    let body = json!({
        "code": code,
        "msg": msg,
        "data": null,
        "ts": 1759917250113i64,
        "time": "2025-10-08 09:54:10",
        "traceId": "mock-trace-0001"
    });
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    api_error(StatusCode::UNAUTHORIZED, 401, "Invalid authorization")
}

fn task_not_found() -> Response {
    api_error(StatusCode::BAD_REQUEST, 10112, "Task is not exist.")
}

fn is_terminal(status: &str) -> bool {
    status == "finished" || status == "failed"
}

fn task_json(task: &MockTask) -> Value {
    let steps: Vec<Value> = task
        .steps
        .iter()
        .map(|(number, goal)| {
            json!({
                "id": format!("{}-step-{}", task.id, number),
                "step": number,
                "status": "succeed",
                "evaluation_previous_goal": "Succeeded",
                "step_goal": goal,
                "screenshots_url":
                    format!("https://file.browseract.com/screenshots/{}/{}.png", task.id, number)
            })
        })
        .collect();

    let mut body = json!({
        "id": task.id,
        "output": {
            "string": task.output,
            "files": []
        },
        "status": task.status,
        "steps": steps,
        "live_url_info": {
            "width": 1280,
            "height": 960,
            "live_url": format!("https://live.browseract.com/session/{}", task.id)
        },
        "live_url": format!("https://live.browseract.com/session/{}", task.id),
        "profile_id": task.profile_id,
        "created_at": CREATED_AT,
        "finished_at": task.finished_at,
        "task_failure_info": task.failure.as_ref().map(|(code, message)| {
            json!({"code": code, "message": message})
        }),
    });

    if let Some(ref description) = task.description {
        body["task"] = json!(description);
        body["task_gif_url"] = json!(format!("https://file.browseract.com/gif/{}.gif", task.id));
    }
    if let Some(ref agent_id) = task.agent_id {
        body["agent_id"] = json!(agent_id);
    }
    if let Some(ref workflow_id) = task.workflow_id {
        body["workflow_id"] = json!(workflow_id);
        body["input_parameters"] = json!(task.input_parameters);
    }
    body
}

fn paginate(noun_items: Vec<Value>, page: u64, limit: u64, size_key: &str) -> Value {
    let total_count = noun_items.len() as u64;
    let total_pages = total_count.div_ceil(limit);
    let start = ((page - 1) * limit) as usize;
    let page_items: Vec<Value> = noun_items
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();
    json!({
        "page": page,
        size_key: limit,
        "items": page_items,
        "total_pages": total_pages,
        "total_count": total_count
    })
}

fn page_params(params: &HashMap<String, String>) -> (u64, u64) {
    let page = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let limit = params
        .get("limit")
        .or_else(|| params.get("size"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    (page, limit)
}

async fn agent_run_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    if state.quota_exceeded {
        return api_error(
            StatusCode::BAD_REQUEST,
            10118,
            "Running tasks exceed the limit",
        );
    }

    let agent_id = body["agent_id"].as_str().unwrap_or_default().to_string();
    if !state.agents.iter().any(|(id, _)| *id == agent_id) {
        return api_error(StatusCode::BAD_REQUEST, 10010, "Agent does not exist");
    }

    let save = body["save_browser_data"].as_bool().unwrap_or(false);
    let profile_id = save.then(|| {
        body["profile_id"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| "2501122001".to_string())
    });

    let id = state.next_task_id();
    state.tasks.push(MockTask {
        id: id.clone(),
        status: "running".to_string(),
        description: body["task"].as_str().map(str::to_string),
        agent_id: Some(agent_id),
        workflow_id: None,
        input_parameters: None,
        profile_id: profile_id.clone(),
        output: None,
        failure: None,
        finished_at: None,
        steps: vec![(1, "Navigate to the target page".to_string())],
    });

    let mut response = json!({ "id": id });
    if let Some(profile_id) = profile_id {
        response["profileId"] = json!(profile_id);
    }
    (StatusCode::OK, Json(response)).into_response()
}

async fn workflow_run_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    if state.quota_exceeded {
        return api_error(
            StatusCode::BAD_REQUEST,
            10118,
            "Running tasks exceed the limit",
        );
    }

    let workflow_id = body["workflow_id"].as_str().unwrap_or_default().to_string();
    let rendered: Vec<String> = body["input_parameters"]
        .as_array()
        .map(|params| {
            params
                .iter()
                .map(|p| {
                    format!(
                        "{}={}",
                        p["name"].as_str().unwrap_or_default(),
                        p["value"].as_str().unwrap_or_default()
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let save = body["save_browser_data"].as_bool().unwrap_or(false);
    let profile_id = save.then(|| {
        body["profile_id"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| "2501122001".to_string())
    });

    let id = state.next_task_id();
    state.tasks.push(MockTask {
        id: id.clone(),
        status: "running".to_string(),
        description: None,
        agent_id: None,
        workflow_id: Some(workflow_id),
        input_parameters: Some(rendered.join("; ")),
        profile_id: profile_id.clone(),
        output: None,
        failure: None,
        finished_at: None,
        steps: vec![(1, "Navigate to the target page".to_string())],
    });

    let mut response = json!({ "id": id });
    if let Some(profile_id) = profile_id {
        response["profileId"] = json!(profile_id);
    }
    (StatusCode::OK, Json(response)).into_response()
}

async fn stop_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    let task_id = params.get("task_id").cloned().unwrap_or_default();
    let Some(task) = state.task_mut(&task_id) else {
        return task_not_found();
    };
    if is_terminal(&task.status) {
        return api_error(StatusCode::BAD_REQUEST, 10121, "Task has completed.");
    }
    task.status = "failed".to_string();
    task.finished_at = Some(FINISHED_AT.to_string());
    StatusCode::OK.into_response()
}

async fn pause_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    let task_id = params.get("task_id").cloned().unwrap_or_default();
    let Some(task) = state.task_mut(&task_id) else {
        return task_not_found();
    };
    // The real service answers 200 for terminal tasks without changing them
    if !is_terminal(&task.status) {
        task.status = "paused".to_string();
    }
    StatusCode::OK.into_response()
}

async fn resume_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    let task_id = params.get("task_id").cloned().unwrap_or_default();
    let Some(task) = state.task_mut(&task_id) else {
        return task_not_found();
    };
    if task.status != "paused" {
        return api_error(
            StatusCode::BAD_REQUEST,
            10127,
            "Task resume only use for paused task",
        );
    }
    task.status = "running".to_string();
    StatusCode::OK.into_response()
}

async fn get_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let task_id = params.get("task_id").cloned().unwrap_or_default();
    match state.tasks.iter().find(|t| t.id == task_id) {
        Some(task) => (StatusCode::OK, Json(task_json(task))).into_response(),
        None => task_not_found(),
    }
}

async fn get_task_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let task_id = params.get("task_id").cloned().unwrap_or_default();
    match state.tasks.iter().find(|t| t.id == task_id) {
        Some(task) => (StatusCode::OK, Json(json!({ "status": task.status }))).into_response(),
        None => task_not_found(),
    }
}

async fn agent_list_tasks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let filter = params.get("agent_id").filter(|v| !v.is_empty());
    // Newest first
    let items: Vec<Value> = state
        .tasks
        .iter()
        .rev()
        .filter(|t| t.agent_id.is_some())
        .filter(|t| filter.map_or(true, |f| t.agent_id.as_deref() == Some(f.as_str())))
        .map(task_json)
        .collect();
    let (page, limit) = page_params(&params);
    (StatusCode::OK, Json(paginate(items, page, limit, "limit"))).into_response()
}

async fn workflow_list_tasks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let filter = params.get("workflow_id").filter(|v| !v.is_empty());
    let items: Vec<Value> = state
        .tasks
        .iter()
        .rev()
        .filter(|t| t.workflow_id.is_some())
        .filter(|t| filter.map_or(true, |f| t.workflow_id.as_deref() == Some(f.as_str())))
        .map(task_json)
        .collect();
    let (page, limit) = page_params(&params);
    (StatusCode::OK, Json(paginate(items, page, limit, "limit"))).into_response()
}

async fn list_agents(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let items: Vec<Value> = state
        .agents
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();
    let (page, limit) = page_params(&params);
    // This listing names its page size "size" on the wire
    (StatusCode::OK, Json(paginate(items, page, limit, "size"))).into_response()
}

async fn list_workflows(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let items = vec![workflow_summary_json()];
    let (page, limit) = page_params(&params);
    (StatusCode::OK, Json(paginate(items, page, limit, "limit"))).into_response()
}

async fn get_workflow(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let workflow_id = params.get("workflow_id").cloned().unwrap_or_default();
    if workflow_id != WORKFLOW_ID {
        // Unknown workflows fall through to a bare 404, no JSON envelope
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }
    let mut body = workflow_summary_json();
    body["input_parameters"] = json!([
        {"name": "target_url", "default_enabled": true},
        {"name": "product_limit", "default_enabled": false}
    ]);
    (StatusCode::OK, Json(body)).into_response()
}

fn workflow_summary_json() -> Value {
    json!({
        "id": WORKFLOW_ID,
        "name": "test demo",
        "description": "Scrape product listings from a storefront",
        "create_at": "2025-07-19T09:08:58Z",
        "publish_at": "2025-07-21T02:31:12Z"
    })
}
