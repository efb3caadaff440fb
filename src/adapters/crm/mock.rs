//! In-process dispatch CRM for tests.
//!
//! Behaves like a tiny CRM: created tasks are kept and can be listed,
//! looked up, edited, assigned and cancelled. Supports:
//! - Seeded tasks and agents
//! - Per-method error injection
//! - A fully unreachable mode
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ports::{
    AgentLookup, CreateTaskRequest, CreatedTask, CrmError, DispatchCrm, MembershipInquiryRequest,
    TaskEdit, TaskListQuery, TaskLookup,
};

/// Mock dispatch CRM.
///
/// # Example
///
/// ```ignore
/// let crm = MockDispatchCrm::new();
/// crm.add_task(json!({ "task_id": "t-1", "customer_phone": "8085550123" }));
/// crm.set_method_error("edit_task", CrmError::Http { status: 503 });
/// ```
#[derive(Default)]
pub struct MockDispatchCrm {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Tasks in creation order.
    tasks: Vec<Value>,

    /// Agents by `agent_id`.
    agents: HashMap<String, Value>,

    /// Membership inquiries received.
    inquiries: Vec<MembershipInquiryRequest>,

    /// Every call fails with a transport error.
    unreachable: bool,

    /// Specific errors by method name.
    method_errors: HashMap<String, CrmError>,

    call_log: Vec<CrmCall>,

    next_id: u32,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockDispatchCrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A CRM that cannot be reached: every call is a transport error.
    pub fn unreachable() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().unreachable = true;
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Seed a task. It should carry `task_id` and/or `job_number`.
    pub fn add_task(&self, task: Value) {
        self.inner.lock().unwrap().tasks.push(task);
    }

    /// Seed an agent. It should carry `agent_id`.
    pub fn add_agent(&self, agent: Value) {
        let id = agent
            .get("agent_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.inner.lock().unwrap().agents.insert(id, agent);
    }

    /// Fail every call to `method` with `error`.
    pub fn set_method_error(&self, method: &str, error: CrmError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.method_errors.clear();
        state.unreachable = false;
    }

    /// Current copy of a task by task id or job number.
    pub fn task(&self, id: &str) -> Option<Value> {
        let state = self.inner.lock().unwrap();
        state.tasks.iter().find(|t| task_has_id(t, id)).cloned()
    }

    pub fn tasks(&self) -> Vec<Value> {
        self.inner.lock().unwrap().tasks.clone()
    }

    pub fn inquiries(&self) -> Vec<MembershipInquiryRequest> {
        self.inner.lock().unwrap().inquiries.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<CrmCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// Records the call, then applies unreachable mode and injected errors.
    fn enter(&self, method: &str, args: Vec<String>) -> Result<(), CrmError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(CrmCall {
            method: method.to_string(),
            args,
        });

        if state.unreachable {
            return Err(CrmError::transport("Failed to connect to CRM"));
        }
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }
        Ok(())
    }
}

impl Clone for MockDispatchCrm {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn task_has_id(task: &Value, id: &str) -> bool {
    ["task_id", "job_number"]
        .iter()
        .any(|key| task.get(*key).and_then(Value::as_str) == Some(id))
}

fn task_not_found() -> CrmError {
    CrmError::rejected("Task not found")
}

#[async_trait]
impl DispatchCrm for MockDispatchCrm {
    async fn create_task(&self, request: CreateTaskRequest) -> Result<CreatedTask, CrmError> {
        self.enter("create_task", vec![request.customer_phone.clone()])?;

        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let task_id = format!("task-mock-{:04}", state.next_id);
        let job_number = format!("JOB-{}", 1000 + state.next_id);

        let mut task = serde_json::to_value(&request)
            .map_err(|e| CrmError::unexpected_shape(e.to_string()))?;
        task["task_id"] = json!(task_id);
        task["job_number"] = json!(job_number);
        task["status_code"] = json!(0);
        task["created_at"] = json!(chrono::Utc::now().to_rfc3339());
        state.tasks.push(task);

        Ok(CreatedTask::from_response(json!({
            "success": true,
            "task_id": task_id,
            "job_number": job_number,
            "status_code": "0",
            "message": "Task created"
        })))
    }

    async fn get_job_details(&self, lookup: TaskLookup) -> Result<Value, CrmError> {
        self.enter("get_job_details", vec![lookup.identifier().to_string()])?;
        if lookup.identifier().is_empty() {
            return Err(CrmError::MissingIdentifier);
        }

        let state = self.inner.lock().unwrap();
        let key = match &lookup {
            TaskLookup::TaskId(_) => "task_id",
            TaskLookup::JobNumber(_) => "job_number",
        };
        let task = state
            .tasks
            .iter()
            .find(|t| t.get(key).and_then(Value::as_str) == Some(lookup.identifier()))
            .ok_or_else(task_not_found)?;

        let agent = task
            .get("agent_id")
            .and_then(Value::as_str)
            .and_then(|id| state.agents.get(id))
            .cloned();

        let mut job = json!({ "success": true, "task": task });
        if let Some(agent) = agent {
            job["agent"] = agent;
        }
        Ok(job)
    }

    async fn get_all_tasks(&self, query: TaskListQuery) -> Result<Vec<Value>, CrmError> {
        self.enter(
            "get_all_tasks",
            vec![query.page.to_string(), query.limit.to_string()],
        )?;

        let state = self.inner.lock().unwrap();
        let start = (query.page.saturating_sub(1) * query.limit) as usize;
        Ok(state
            .tasks
            .iter()
            .rev()
            .filter(|t| match query.status {
                Some(code) => t.get("status_code").and_then(Value::as_i64) == Some(code as i64),
                None => true,
            })
            .skip(start)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn edit_task(&self, task_id: &str, edit: TaskEdit) -> Result<Value, CrmError> {
        self.enter("edit_task", vec![task_id.to_string(), format!("{:?}", edit.status_code)])?;

        let mut state = self.inner.lock().unwrap();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| task_has_id(t, task_id))
            .ok_or_else(task_not_found)?;

        if let Some(code) = edit.status_code {
            task["status_code"] = json!(code);
        }
        if let Some(notes) = edit.notes {
            task["notes"] = json!(notes);
        }
        if let Some(cost) = edit.final_cost {
            task["final_cost"] = json!(cost);
        }
        task["updated_at"] = json!(chrono::Utc::now().to_rfc3339());
        Ok(task.clone())
    }

    async fn get_agent_location(&self, lookup: AgentLookup) -> Result<Value, CrmError> {
        let raw = match &lookup {
            AgentLookup::AgentId(id) | AgentLookup::TaskId(id) => id.clone(),
        };
        self.enter("get_agent_location", vec![raw])?;

        let state = self.inner.lock().unwrap();
        let agent_id = match &lookup {
            AgentLookup::AgentId(id) => Some(id.clone()),
            AgentLookup::TaskId(task_id) => state
                .tasks
                .iter()
                .find(|t| task_has_id(t, task_id))
                .and_then(|t| t.get("agent_id"))
                .and_then(Value::as_str)
                .map(str::to_string),
        };

        agent_id
            .and_then(|id| state.agents.get(&id).cloned())
            .ok_or_else(|| CrmError::rejected("Agent not found"))
    }

    async fn assign_agent(&self, task_id: &str, agent_id: &str) -> Result<Value, CrmError> {
        self.enter("assign_agent", vec![task_id.to_string(), agent_id.to_string()])?;

        let mut state = self.inner.lock().unwrap();
        if !state.agents.contains_key(agent_id) {
            return Err(CrmError::rejected("Agent not found"));
        }
        let task = state
            .tasks
            .iter_mut()
            .find(|t| task_has_id(t, task_id))
            .ok_or_else(task_not_found)?;

        task["agent_id"] = json!(agent_id);
        task["status_code"] = json!(1);
        Ok(json!({
            "success": true,
            "task_id": task.get("task_id").cloned().unwrap_or(Value::Null),
            "agent_id": agent_id
        }))
    }

    async fn delete_task(&self, task_id: &str, hard_delete: bool) -> Result<Value, CrmError> {
        self.enter("delete_task", vec![task_id.to_string(), hard_delete.to_string()])?;

        let mut state = self.inner.lock().unwrap();
        let position = state
            .tasks
            .iter()
            .position(|t| task_has_id(t, task_id))
            .ok_or_else(task_not_found)?;

        if hard_delete {
            state.tasks.remove(position);
        } else {
            state.tasks[position]["status_code"] = json!(6);
        }
        Ok(json!({ "success": true, "message": "Task deleted" }))
    }

    async fn membership_inquiry(
        &self,
        request: MembershipInquiryRequest,
    ) -> Result<Value, CrmError> {
        self.enter("membership_inquiry", vec![request.customer_email.clone()])?;

        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let task_id = format!("inquiry-mock-{:04}", state.next_id);
        state.inquiries.push(request);
        Ok(json!({ "success": true, "task_id": task_id }))
    }

    async fn get_fleet(&self) -> Result<Value, CrmError> {
        self.enter("get_fleet", Vec::new())?;

        let state = self.inner.lock().unwrap();
        let mut fleet: Vec<Value> = state.agents.values().cloned().collect();
        fleet.sort_by_key(|a| {
            a.get("agent_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        });
        Ok(json!({ "success": true, "total": fleet.len(), "fleet": fleet }))
    }
}
