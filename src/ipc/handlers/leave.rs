use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

use crate::ipc::helpers::{
    get_optional_str, get_required_str, parse_optional_param, parse_param, respond, to_result,
    HandlerErr, HandlerResult,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{LeaveRequest, LeaveRequestPatch, LeaveStatus, NewLeaveRequest};
use crate::store::attendance::LeaveTransition;

/// A leave request as sent to the shell, with its day count alongside.
#[derive(Serialize)]
struct LeaveView<'a> {
    #[serde(flatten)]
    request: &'a LeaveRequest,
    days: u32,
}

impl<'a> From<&'a LeaveRequest> for LeaveView<'a> {
    fn from(request: &'a LeaveRequest) -> Self {
        Self {
            request,
            days: request.days(),
        }
    }
}

fn views<'a>(requests: impl IntoIterator<Item = &'a LeaveRequest>) -> Vec<LeaveView<'a>> {
    requests.into_iter().map(LeaveView::from).collect()
}

fn leave_list(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let store = state.stores.attendance.state();
    let status = match get_optional_str(params, "status")?.as_deref() {
        None | Some("") | Some("all") => None,
        Some(_) => Some(parse_param::<LeaveStatus>(params, "status")?),
    };
    match status {
        Some(status) => to_result(&views(store.leave_by_status(status))),
        None => to_result(&views(store.leave_requests())),
    }
}

fn leave_create(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let new: NewLeaveRequest = parse_param(params, "request")?;
    let request = state.stores.attendance.add_leave_request(new);
    to_result(&LeaveView::from(&request))
}

fn leave_update(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    let patch: LeaveRequestPatch = parse_param(params, "patch")?;
    let updated = state.stores.attendance.update_leave_request(&id, patch);
    to_result(&updated.as_ref().map(LeaveView::from))
}

fn leave_set_all(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let requests: Vec<LeaveRequest> = parse_param(params, "requests")?;
    let count = requests.len();
    state.stores.attendance.set_leave_requests(requests);
    Ok(json!({ "count": count }))
}

/// Unknown ids answer `null`; deciding twice is an error.
fn transition_result(id: &str, outcome: LeaveTransition) -> HandlerResult {
    match outcome {
        LeaveTransition::Applied(request) => to_result(&LeaveView::from(&request)),
        LeaveTransition::NotFound => Ok(serde_json::Value::Null),
        LeaveTransition::AlreadyDecided(status) => Err(HandlerErr::new(
            "leave_already_decided",
            format!("leave request {} is no longer pending", id),
        )
        .with_details(json!({ "status": status }))),
    }
}

fn decision_date(params: &serde_json::Value) -> Result<NaiveDate, HandlerErr> {
    Ok(parse_optional_param::<NaiveDate>(params, "date")?.unwrap_or_else(|| Utc::now().date_naive()))
}

fn leave_approve(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    let approver = get_required_str(params, "approvedBy")?;
    let on = decision_date(params)?;
    let outcome = state.stores.attendance.approve_leave(&id, &approver, on);
    transition_result(&id, outcome)
}

fn leave_reject(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    let approver = get_required_str(params, "approvedBy")?;
    let reason = get_optional_str(params, "reason")?;
    let on = decision_date(params)?;
    let outcome = state
        .stores
        .attendance
        .reject_leave(&id, &approver, reason, on);
    transition_result(&id, outcome)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let p = &req.params;
    let result = match req.method.as_str() {
        "leave.list" => leave_list(state, p),
        "leave.pending" => to_result(&views(
            state.stores.attendance.state().pending_leave_requests(),
        )),
        "leave.create" => leave_create(state, p),
        "leave.update" => leave_update(state, p),
        "leave.approve" => leave_approve(state, p),
        "leave.reject" => leave_reject(state, p),
        "leave.setAll" => leave_set_all(state, p),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
