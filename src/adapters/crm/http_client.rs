//! reqwest implementation of the dispatch CRM port.
//!
//! Every CRM call is `POST {base_url}{endpoint}` with a JSON body and an
//! `X-API-Key` header. Failures never escape as panics or raw reqwest
//! errors; they are logged here and returned as `CrmError`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CrmClientConfig::from(&app_config.crm);
//! let crm = HttpDispatchCrm::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::CrmConfig;
use crate::domain::booking::is_truthy;
use crate::ports::{
    AgentLookup, CreateTaskRequest, CreatedTask, CrmError, DispatchCrm, MembershipInquiryRequest,
    TaskEdit, TaskListQuery, TaskLookup, DEFAULT_TASK_PAGE_LIMIT,
};

const CREATE_TASK: &str = "/v2/create_task";
const GET_JOB_DETAILS: &str = "/v2/get_job_details";
const GET_ALL_TASKS: &str = "/v2/get_all_tasks";
const EDIT_TASK: &str = "/v2/edit_task";
const GET_AGENT_LOCATION: &str = "/v2/get_agent_location";
const ASSIGN_AGENT: &str = "/v2/assign_agent";
const DELETE_TASK: &str = "/v2/delete_task";
const MEMBERSHIP_INQUIRY: &str = "/v2/membership_inquiry";
const GET_FLEET: &str = "/v2/get_fleet";

/// Connection settings for [`HttpDispatchCrm`].
#[derive(Debug, Clone)]
pub struct CrmClientConfig {
    api_key: SecretString,
    base_url: String,
    timeout: Duration,
    page_limit: u32,
}

impl CrmClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: "https://poorman808dashboard.replit.app".to_string(),
            timeout: Duration::from_secs(30),
            page_limit: DEFAULT_TASK_PAGE_LIMIT,
        }
    }

    /// Sets the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl From<&CrmConfig> for CrmClientConfig {
    fn from(config: &CrmConfig) -> Self {
        CrmClientConfig::new(config.api_key_or_empty())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout())
            .with_page_limit(config.page_limit)
    }
}

/// Dispatch CRM over HTTPS.
pub struct HttpDispatchCrm {
    config: CrmClientConfig,
    client: Client,
}

impl HttpDispatchCrm {
    pub fn new(config: CrmClientConfig) -> Result<Self, CrmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CrmError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Sends one request and normalizes the response envelope.
    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value, CrmError> {
        let response = self
            .client
            .post(self.url(endpoint))
            .header("X-API-Key", self.config.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint, error = %e, "CRM request failed");
                let message = e.to_string();
                if message.is_empty() {
                    CrmError::transport("Failed to connect to CRM")
                } else {
                    CrmError::transport(message)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint,
                status = status.as_u16(),
                body = %error_body,
                "CRM API error"
            );
            return Err(CrmError::Http {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            tracing::error!(endpoint, error = %e, "CRM returned invalid JSON");
            CrmError::unexpected_shape(format!("Invalid JSON from CRM: {}", e))
        })?;

        normalize_envelope(body)
    }
}

/// Unwraps the CRM's inconsistent response envelopes.
///
/// - `{success: true, ..}` is returned whole
/// - `{success: false, message}` is a rejection
/// - `{status: 200, data}` unwraps to `data`
/// - anything else is returned as-is
pub fn normalize_envelope(body: Value) -> Result<Value, CrmError> {
    let mut map = match body {
        Value::Object(map) => map,
        other => return Ok(other),
    };

    match map.get("success").and_then(Value::as_bool) {
        Some(true) => return Ok(Value::Object(map)),
        Some(false) => {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("CRM request failed")
                .to_string();
            return Err(CrmError::Rejected(message));
        }
        None => {}
    }

    let is_status_envelope = map.get("status").and_then(Value::as_i64) == Some(200);
    if is_status_envelope {
        if let Some(data) = map.remove("data") {
            return Ok(data);
        }
    }

    Ok(Value::Object(map))
}

/// Pulls the task array out of a `get_all_tasks` response.
fn extract_tasks(body: Value) -> Result<Vec<Value>, CrmError> {
    match body {
        Value::Array(tasks) => Ok(tasks),
        Value::Object(mut map) => match map.remove("tasks") {
            Some(Value::Array(tasks)) => Ok(tasks),
            _ => Err(CrmError::unexpected_shape("Invalid response format")),
        },
        _ => Err(CrmError::unexpected_shape("Invalid response format")),
    }
}

#[async_trait]
impl DispatchCrm for HttpDispatchCrm {
    async fn create_task(&self, request: CreateTaskRequest) -> Result<CreatedTask, CrmError> {
        let body = self.post(CREATE_TASK, &request).await?;
        Ok(CreatedTask::from_response(body))
    }

    async fn get_job_details(&self, lookup: TaskLookup) -> Result<Value, CrmError> {
        if lookup.identifier().is_empty() {
            return Err(CrmError::MissingIdentifier);
        }
        self.post(GET_JOB_DETAILS, &lookup.to_body()).await
    }

    async fn get_all_tasks(&self, query: TaskListQuery) -> Result<Vec<Value>, CrmError> {
        let body = self.post(GET_ALL_TASKS, &query.to_body()).await?;
        extract_tasks(body)
    }

    async fn edit_task(&self, task_id: &str, edit: TaskEdit) -> Result<Value, CrmError> {
        let mut body = serde_json::to_value(&edit)
            .map_err(|e| CrmError::unexpected_shape(e.to_string()))?;
        body["task_id"] = Value::String(task_id.to_string());
        self.post(EDIT_TASK, &body).await
    }

    async fn get_agent_location(&self, lookup: AgentLookup) -> Result<Value, CrmError> {
        let body = self.post(GET_AGENT_LOCATION, &lookup.to_body()).await?;
        let agent = body.get("agent").filter(|a| is_truthy(a)).cloned();
        Ok(agent.unwrap_or(body))
    }

    async fn assign_agent(&self, task_id: &str, agent_id: &str) -> Result<Value, CrmError> {
        self.post(ASSIGN_AGENT, &json!({ "task_id": task_id, "agent_id": agent_id }))
            .await
    }

    async fn delete_task(&self, task_id: &str, hard_delete: bool) -> Result<Value, CrmError> {
        self.post(DELETE_TASK, &json!({ "task_id": task_id, "hard_delete": hard_delete }))
            .await
    }

    async fn membership_inquiry(
        &self,
        request: MembershipInquiryRequest,
    ) -> Result<Value, CrmError> {
        self.post(MEMBERSHIP_INQUIRY, &request).await
    }

    async fn get_fleet(&self) -> Result<Value, CrmError> {
        self.post(GET_FLEET, &json!({})).await
    }

    fn task_page(&self) -> TaskListQuery {
        TaskListQuery {
            limit: self.config.page_limit,
            ..TaskListQuery::default()
        }
    }
}
