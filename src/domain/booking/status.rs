//! Booking status and its translation to CRM status codes.
//!
//! The tracker UI walks a booking through six states. The dispatch CRM only
//! knows five numeric codes, so the mapping collapses some UI states:
//!
//! | UI status | CRM code |
//! |-----------|----------|
//! | received, confirmed | 0 (pending) |
//! | assigning | 1 (assigned) |
//! | en_route, arrived | 2 (en route) |
//! | completed | 4 |
//! | cancelled (CRM only) | 6 |
//! | on_hold (CRM only) | 9 |
//!
//! Going UI → CRM → UI therefore turns `confirmed` into `received` and
//! `arrived` into `en_route`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// CRM code for a pending (unassigned) task.
pub const CRM_PENDING: i32 = 0;
/// CRM code for a task with an agent assigned.
pub const CRM_ASSIGNED: i32 = 1;
/// CRM code for an agent driving to the pickup.
pub const CRM_EN_ROUTE: i32 = 2;
/// CRM code for a finished job.
pub const CRM_COMPLETED: i32 = 4;
/// CRM code for a cancelled job.
pub const CRM_CANCELLED: i32 = 6;
/// CRM code for a job parked by dispatch.
pub const CRM_ON_HOLD: i32 = 9;

/// Lifecycle status of a booking.
///
/// The first six variants are the states customers see on the tracker and
/// the only ones a status update may request. `Cancelled` and `OnHold` only
/// ever arrive from the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Received,
    Confirmed,
    Assigning,
    EnRoute,
    Arrived,
    Completed,
    Cancelled,
    OnHold,
}

impl BookingStatus {
    /// States a client may set through the status endpoint, in tracker order.
    pub const TRACKED: [BookingStatus; 6] = [
        BookingStatus::Received,
        BookingStatus::Confirmed,
        BookingStatus::Assigning,
        BookingStatus::EnRoute,
        BookingStatus::Arrived,
        BookingStatus::Completed,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Received => "received",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Assigning => "assigning",
            BookingStatus::EnRoute => "en_route",
            BookingStatus::Arrived => "arrived",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::OnHold => "on_hold",
        }
    }

    /// Parses any known status name, including the CRM-only ones.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "received" => Some(BookingStatus::Received),
            "confirmed" => Some(BookingStatus::Confirmed),
            "assigning" => Some(BookingStatus::Assigning),
            "en_route" => Some(BookingStatus::EnRoute),
            "arrived" => Some(BookingStatus::Arrived),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "on_hold" => Some(BookingStatus::OnHold),
            _ => None,
        }
    }

    /// Parses one of the six tracker states. CRM-only names are rejected.
    pub fn parse_tracked(s: &str) -> Option<Self> {
        Self::parse(s).filter(BookingStatus::is_tracked)
    }

    /// Returns true for the six tracker states.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::OnHold)
    }

    /// CRM status code for this status.
    pub fn crm_code(&self) -> i32 {
        ui_to_crm(self.as_str())
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Received
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a status name to a CRM status code.
///
/// Accepts both UI names and the CRM's own vocabulary (`pending`,
/// `assigned`). Unknown names map to [`CRM_PENDING`].
pub fn ui_to_crm(status: &str) -> i32 {
    match status {
        "received" | "pending" | "confirmed" => CRM_PENDING,
        "assigning" | "assigned" => CRM_ASSIGNED,
        "en_route" | "arrived" => CRM_EN_ROUTE,
        "completed" => CRM_COMPLETED,
        "cancelled" => CRM_CANCELLED,
        "on_hold" => CRM_ON_HOLD,
        _ => CRM_PENDING,
    }
}

/// Maps a CRM status code to a booking status. Unknown codes are `Received`.
pub fn crm_to_ui(code: i64) -> BookingStatus {
    match code {
        0 => BookingStatus::Received,
        1 => BookingStatus::Assigning,
        2 => BookingStatus::EnRoute,
        4 => BookingStatus::Completed,
        6 => BookingStatus::Cancelled,
        9 => BookingStatus::OnHold,
        _ => BookingStatus::Received,
    }
}

/// Maps a raw CRM status field to a booking status.
///
/// The CRM sends codes either as numbers or as numeric strings. Strings are
/// read up to the first non-digit (`"2 - en route"` is code 2). Anything
/// without a leading integer maps to `Received`.
pub fn crm_status_from_value(value: &Value) -> BookingStatus {
    let code = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    };
    code.map(crm_to_ui).unwrap_or(BookingStatus::Received)
}

/// Parses an optionally signed integer prefix, ignoring leading whitespace.
fn leading_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn ui_states_map_to_crm_codes() {
        assert_eq!(ui_to_crm("received"), 0);
        assert_eq!(ui_to_crm("confirmed"), 0);
        assert_eq!(ui_to_crm("assigning"), 1);
        assert_eq!(ui_to_crm("en_route"), 2);
        assert_eq!(ui_to_crm("arrived"), 2);
        assert_eq!(ui_to_crm("completed"), 4);
    }

    #[test]
    fn crm_vocabulary_is_accepted() {
        assert_eq!(ui_to_crm("pending"), 0);
        assert_eq!(ui_to_crm("assigned"), 1);
        assert_eq!(ui_to_crm("cancelled"), 6);
        assert_eq!(ui_to_crm("on_hold"), 9);
    }

    #[test]
    fn unknown_status_name_maps_to_pending() {
        assert_eq!(ui_to_crm("towing"), CRM_PENDING);
        assert_eq!(ui_to_crm(""), CRM_PENDING);
        assert_eq!(ui_to_crm("COMPLETED"), CRM_PENDING);
    }

    #[test]
    fn crm_codes_map_to_statuses() {
        assert_eq!(crm_to_ui(0), BookingStatus::Received);
        assert_eq!(crm_to_ui(1), BookingStatus::Assigning);
        assert_eq!(crm_to_ui(2), BookingStatus::EnRoute);
        assert_eq!(crm_to_ui(4), BookingStatus::Completed);
        assert_eq!(crm_to_ui(6), BookingStatus::Cancelled);
        assert_eq!(crm_to_ui(9), BookingStatus::OnHold);
    }

    #[test]
    fn unmapped_crm_codes_default_to_received() {
        assert_eq!(crm_to_ui(3), BookingStatus::Received);
        assert_eq!(crm_to_ui(5), BookingStatus::Received);
        assert_eq!(crm_to_ui(-1), BookingStatus::Received);
        assert_eq!(crm_to_ui(42), BookingStatus::Received);
    }

    #[test]
    fn round_trip_preserves_distinct_states() {
        for status in [
            BookingStatus::Received,
            BookingStatus::Assigning,
            BookingStatus::EnRoute,
            BookingStatus::Completed,
        ] {
            assert_eq!(crm_to_ui(status.crm_code() as i64), status);
        }
    }

    #[test]
    fn round_trip_collapses_confirmed_and_arrived() {
        assert_eq!(
            crm_to_ui(BookingStatus::Confirmed.crm_code() as i64),
            BookingStatus::Received
        );
        assert_eq!(
            crm_to_ui(BookingStatus::Arrived.crm_code() as i64),
            BookingStatus::EnRoute
        );
    }

    #[test]
    fn status_values_accept_numbers_and_numeric_strings() {
        assert_eq!(crm_status_from_value(&json!(2)), BookingStatus::EnRoute);
        assert_eq!(crm_status_from_value(&json!("4")), BookingStatus::Completed);
        assert_eq!(crm_status_from_value(&json!(" 6")), BookingStatus::Cancelled);
        assert_eq!(crm_status_from_value(&json!("9-hold")), BookingStatus::OnHold);
        assert_eq!(crm_status_from_value(&json!(1.0)), BookingStatus::Assigning);
    }

    #[test]
    fn fractional_codes_are_received() {
        assert_eq!(crm_status_from_value(&json!(1.5)), BookingStatus::Received);
    }

    #[test]
    fn non_numeric_status_values_are_received() {
        assert_eq!(crm_status_from_value(&json!("en_route")), BookingStatus::Received);
        assert_eq!(crm_status_from_value(&json!(null)), BookingStatus::Received);
        assert_eq!(crm_status_from_value(&json!(true)), BookingStatus::Received);
        assert_eq!(crm_status_from_value(&json!("")), BookingStatus::Received);
    }

    #[test]
    fn parse_tracked_rejects_crm_only_states() {
        assert_eq!(BookingStatus::parse_tracked("arrived"), Some(BookingStatus::Arrived));
        assert_eq!(BookingStatus::parse_tracked("cancelled"), None);
        assert_eq!(BookingStatus::parse_tracked("on_hold"), None);
        assert_eq!(BookingStatus::parse("on_hold"), Some(BookingStatus::OnHold));
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(serde_json::to_value(BookingStatus::EnRoute).unwrap(), json!("en_route"));
        let parsed: BookingStatus = serde_json::from_value(json!("on_hold")).unwrap();
        assert_eq!(parsed, BookingStatus::OnHold);
    }

    proptest! {
        #[test]
        fn every_code_maps_to_a_named_status(code in any::<i64>()) {
            let status = crm_to_ui(code);
            prop_assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }

        #[test]
        fn every_name_maps_to_a_known_code(name in "\\PC*") {
            let code = ui_to_crm(&name);
            prop_assert!([0, 1, 2, 4, 6, 9].contains(&code));
        }
    }
}
