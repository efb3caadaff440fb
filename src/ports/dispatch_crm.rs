//! Dispatch CRM port.
//!
//! The CRM owns the authoritative dispatch state: task status, agent
//! assignment and live agent location. This port covers every call the
//! service makes to it. All calls are single attempts; callers decide what
//! to do on failure.
//!
//! Responses are relayed as loosely typed JSON. The CRM is not consistent
//! about envelopes or field types, and the reshaping in
//! `domain::booking` already tolerates missing fields.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::booking::{is_truthy, phone};

/// Default page size when listing tasks.
pub const DEFAULT_TASK_PAGE_LIMIT: u32 = 50;

/// Port for the external dispatch CRM.
#[async_trait]
pub trait DispatchCrm: Send + Sync {
    /// Create a dispatch task for a new booking.
    async fn create_task(&self, request: CreateTaskRequest) -> Result<CreatedTask, CrmError>;

    /// Fetch a job (task plus assigned agent) by task id or job number.
    ///
    /// # Errors
    ///
    /// - `MissingIdentifier` for an empty identifier, without calling the CRM
    async fn get_job_details(&self, lookup: TaskLookup) -> Result<Value, CrmError>;

    /// List tasks, optionally filtered by CRM status code.
    ///
    /// Accepts either a bare array or `{tasks: [..]}` from the CRM.
    async fn get_all_tasks(&self, query: TaskListQuery) -> Result<Vec<Value>, CrmError>;

    /// Edit a task. Absent fields are left untouched.
    async fn edit_task(&self, task_id: &str, edit: TaskEdit) -> Result<Value, CrmError>;

    /// Locate an agent, either directly or through the task they work on.
    async fn get_agent_location(&self, lookup: AgentLookup) -> Result<Value, CrmError>;

    /// Assign an agent to a task.
    async fn assign_agent(&self, task_id: &str, agent_id: &str) -> Result<Value, CrmError>;

    /// Delete a task. Soft deletes cancel the job but keep its history.
    async fn delete_task(&self, task_id: &str, hard_delete: bool) -> Result<Value, CrmError>;

    /// Record a membership signup inquiry.
    async fn membership_inquiry(
        &self,
        request: MembershipInquiryRequest,
    ) -> Result<Value, CrmError>;

    /// List all agents and trucks.
    async fn get_fleet(&self) -> Result<Value, CrmError>;

    /// The task page scanned by listings and phone lookups.
    fn task_page(&self) -> TaskListQuery {
        TaskListQuery::default()
    }

    /// Find the job for a customer phone number.
    ///
    /// The CRM has no phone search, so this scans the first page of tasks
    /// for a matching `customer_phone` and fetches that task's details.
    ///
    /// # Errors
    ///
    /// - whatever `get_all_tasks` fails with
    /// - `NotFound` when no task on the page matches
    async fn get_job_details_by_phone(&self, phone_number: &str) -> Result<Value, CrmError> {
        let tasks = self.get_all_tasks(self.task_page()).await?;

        let matching = tasks
            .iter()
            .find(|task| {
                let task_phone = task
                    .get("customer_phone")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                phone::phones_match(task_phone, phone_number)
            })
            .ok_or_else(|| CrmError::not_found("No task found for this phone"))?;

        self.get_job_details(TaskLookup::for_task(matching)).await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Lookups
// ════════════════════════════════════════════════════════════════════════════════

/// How to identify a task when fetching job details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLookup {
    /// CRM task id (a UUID).
    TaskId(String),
    /// Human-facing job number such as `JOB-1042`.
    JobNumber(String),
}

impl TaskLookup {
    /// Guesses the identifier kind from an opaque string.
    ///
    /// Strings longer than ten characters containing a `-` are task ids;
    /// everything else is a job number.
    pub fn infer(raw: &str) -> Self {
        if raw.contains('-') && raw.chars().count() > 10 {
            TaskLookup::TaskId(raw.to_string())
        } else {
            TaskLookup::JobNumber(raw.to_string())
        }
    }

    /// Lookup for a task object from a listing: `task_id`, else `job_number`.
    pub fn for_task(task: &Value) -> Self {
        match task.get("task_id").filter(|v| is_truthy(v)) {
            Some(id) => TaskLookup::TaskId(value_to_string(id)),
            None => TaskLookup::JobNumber(
                task.get("job_number")
                    .filter(|v| is_truthy(v))
                    .map(value_to_string)
                    .unwrap_or_default(),
            ),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            TaskLookup::TaskId(id) | TaskLookup::JobNumber(id) => id,
        }
    }

    /// Request body for `get_job_details`.
    pub fn to_body(&self) -> Value {
        match self {
            TaskLookup::TaskId(id) => json!({ "task_id": id }),
            TaskLookup::JobNumber(number) => json!({ "job_number": number }),
        }
    }
}

/// How to identify an agent when fetching a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentLookup {
    AgentId(String),
    /// Locate whichever agent is assigned to this task.
    TaskId(String),
}

impl AgentLookup {
    /// Strings starting with `JOB-` or longer than thirty characters are
    /// task references; everything else is an agent id.
    pub fn infer(raw: &str) -> Self {
        if raw.starts_with("JOB-") || raw.chars().count() > 30 {
            AgentLookup::TaskId(raw.to_string())
        } else {
            AgentLookup::AgentId(raw.to_string())
        }
    }

    pub fn to_body(&self) -> Value {
        match self {
            AgentLookup::AgentId(id) => json!({ "agent_id": id }),
            AgentLookup::TaskId(id) => json!({ "task_id": id }),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Dispatch urgency of a new task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[default]
    Normal,
    High,
    Urgent,
}

/// Body of `create_task`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaskRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// `"{make} {model} ({color})"`.
    pub vehicle_details: String,
    pub service_type: String,
    pub priority: TaskPriority,
    pub pickup_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

/// Result of `create_task`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTask {
    /// Remote id to store on the local booking, if the CRM returned one.
    pub task_id: Option<String>,
    pub job_number: Option<String>,
    pub raw: Value,
}

impl CreatedTask {
    /// Reads the created id from `task_id`, `job_id` or `data.job_id`.
    ///
    /// Which one is present depends on the CRM endpoint version.
    pub fn from_response(raw: Value) -> Self {
        let task_id = [
            raw.get("task_id"),
            raw.get("job_id"),
            raw.get("data").and_then(|d| d.get("job_id")),
        ]
        .into_iter()
        .flatten()
        .find(|v| is_truthy(v))
        .map(value_to_string);

        let job_number = raw
            .get("job_number")
            .filter(|v| is_truthy(v))
            .map(value_to_string);

        Self {
            task_id,
            job_number,
            raw,
        }
    }
}

/// Body of `get_all_tasks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListQuery {
    pub status: Option<i32>,
    pub page: u32,
    pub limit: u32,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self {
            status: None,
            page: 1,
            limit: DEFAULT_TASK_PAGE_LIMIT,
        }
    }
}

impl TaskListQuery {
    /// The CRM expects the status filter as a string.
    pub fn to_body(&self) -> Value {
        let mut body = json!({ "page": self.page, "limit": self.limit });
        if let Some(status) = self.status {
            body["status"] = Value::String(status.to_string());
        }
        body
    }
}

/// Fields to change with `edit_task`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_cost: Option<f64>,
}

impl TaskEdit {
    pub fn status(code: i32) -> Self {
        Self {
            status_code: Some(code),
            ..Self::default()
        }
    }
}

/// Whether a membership request is a signup or a general question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryType {
    Signup,
    Inquiry,
}

/// A vehicle to be covered by a membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InquiryVehicle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
}

/// Body of `membership_inquiry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipInquiryRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    pub inquiry_type: InquiryType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vehicles: Vec<InquiryVehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

/// Failures talking to the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrmError {
    /// The CRM answered with a non-2xx status.
    #[error("CRM API returned {status}")]
    Http { status: u16 },

    /// The request never got a response.
    #[error("{0}")]
    Transport(String),

    /// The CRM answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The response body was not in a shape the caller can use.
    #[error("{0}")]
    UnexpectedShape(String),

    /// No task or agent matched.
    #[error("{0}")]
    NotFound(String),

    /// A lookup was attempted with an empty identifier.
    #[error("No task ID or job number provided")]
    MissingIdentifier,
}

impl CrmError {
    pub fn transport(message: impl Into<String>) -> Self {
        CrmError::Transport(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        CrmError::Rejected(message.into())
    }

    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        CrmError::UnexpectedShape(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CrmError::NotFound(message.into())
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
