//! Reshaping CRM task payloads into the booking shape the tracker expects.
//!
//! CRM payloads are loosely typed: job details may nest the task under
//! `task` with the assigned `agent` as a sibling, or be a flat task object.
//! Status codes arrive as numbers or numeric strings, and any field may be
//! missing. Reshaping never fails; absent data becomes defaults.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::aggregate::Booking;
use super::status::{crm_status_from_value, BookingStatus};
use super::vehicle::VehicleDescription;

/// Service type reported when the CRM task has none.
pub const DEFAULT_SERVICE_TYPE: &str = "tow";

/// Last known position of the agent handling a job.
///
/// Coordinates are relayed exactly as the CRM sends them (usually strings).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentLocation {
    pub lat: Value,
    pub lng: Value,
}

/// A booking as reported by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm_task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_location: Option<String>,
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_location: Option<AgentLocation>,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingView {
    /// Reshapes a CRM job payload, nested (`{task, agent}`) or flat.
    pub fn from_crm_job(job: &Value) -> Self {
        let empty = Value::Object(Map::new());
        let task = match job.get("task") {
            Some(nested) if is_truthy(nested) => nested,
            _ if job.is_object() => job,
            _ => &empty,
        };
        let agent = job.get("agent").filter(|a| is_truthy(a));

        let task_id = task.get("task_id");
        let job_number = task.get("job_number");

        let details = task
            .get("vehicle_details")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let vehicle = VehicleDescription::parse(details);

        let status_field = first_truthy(&[task.get("status_code"), task.get("status")]);
        let status = match status_field {
            Some(raw) => crm_status_from_value(raw),
            None => BookingStatus::Received,
        };

        let now = || Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        Self {
            id: first_truthy(&[task_id, job_number]).and_then(text),
            booking_number: first_truthy(&[job_number, task_id]).and_then(text),
            crm_task_id: task_id.and_then(text),
            name: field_text(task, "customer_name"),
            phone: field_text(task, "customer_phone"),
            vehicle_make: vehicle.make,
            vehicle_model: vehicle.model,
            vehicle_color: vehicle.color,
            pickup_location: field_text(task, "pickup_location"),
            dropoff_location: field_text(task, "dropoff_location"),
            service_type: first_truthy(&[task.get("service_type")])
                .and_then(text)
                .unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string()),
            notes: field_text(task, "notes"),
            status,
            agent_name: agent.and_then(|a| field_text(a, "name")),
            agent_phone: agent.and_then(|a| field_text(a, "phone")),
            agent_location: agent.map(|a| AgentLocation {
                lat: a.get("current_lat").cloned().unwrap_or(Value::Null),
                lng: a.get("current_lng").cloned().unwrap_or(Value::Null),
            }),
            created_at: first_truthy(&[task.get("created_at")])
                .and_then(text)
                .unwrap_or_else(now),
            updated_at: first_truthy(&[task.get("updated_at")])
                .and_then(text)
                .unwrap_or_else(now),
        }
    }
}

/// A booking as returned by the read endpoints: the CRM view when the CRM
/// answered, the local row otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BookingRecord {
    Remote(BookingView),
    Local(Booking),
}

impl BookingRecord {
    pub fn is_remote(&self) -> bool {
        matches!(self, BookingRecord::Remote(_))
    }
}

impl From<BookingView> for BookingRecord {
    fn from(view: BookingView) -> Self {
        BookingRecord::Remote(view)
    }
}

impl From<Booking> for BookingRecord {
    fn from(booking: Booking) -> Self {
        BookingRecord::Local(booking)
    }
}

/// Builds the status-update response from the task the CRM returned.
///
/// The CRM object is kept as-is, with `id` set to its `task_id` (or the id
/// the client used) and `status` set to the requested tracker status.
pub fn merge_status_update(task: &Value, requested_id: &str, status: BookingStatus) -> Value {
    let mut merged = match task {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    let id = match task.get("task_id") {
        Some(task_id) if is_truthy(task_id) => task_id.clone(),
        _ => Value::String(requested_id.to_string()),
    };
    merged.insert("id".to_string(), id);
    merged.insert("status".to_string(), Value::String(status.as_str().to_string()));
    Value::Object(merged)
}

/// Loose truthiness of a CRM field: null, false, zero and "" count as unset.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_truthy<'a>(candidates: &[Option<&'a Value>]) -> Option<&'a Value> {
    candidates.iter().flatten().copied().find(|v| is_truthy(v))
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn field_text(object: &Value, key: &str) -> Option<String> {
    object.get(key).and_then(text)
}
