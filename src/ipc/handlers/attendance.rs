use chrono::NaiveDate;
use serde_json::json;

use crate::ipc::helpers::{
    get_optional_str, get_required_bool, get_required_str, parse_optional_param, parse_param,
    respond, to_result, HandlerErr, HandlerResult,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{AttendancePatch, AttendanceRecord, NewAttendance};
use crate::store::attendance::AttendanceFilters;
use crate::store::criteria::merge_partial;

fn attendance_list(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let teacher_id = get_optional_str(params, "teacherId")?;
    let date: Option<NaiveDate> = parse_optional_param(params, "date")?;
    let filters = match parse_optional_param::<AttendanceFilters>(params, "filters")? {
        Some(f) => f,
        None => state.stores.attendance.state().filters().clone(),
    };

    let store = state.stores.attendance.state();
    let roster = state.stores.teachers.state().teachers();
    let rows = match (teacher_id.as_deref(), date) {
        (None, None) => store.filtered(&filters, roster),
        (Some(teacher_id), date) => {
            let mut rows = store.by_teacher(teacher_id);
            rows.retain(|r| date.map_or(true, |d| r.date == d) && filters.matches(r, roster));
            rows
        }
        (None, Some(date)) => {
            let mut rows = store.by_date(date);
            rows.retain(|r| filters.matches(r, roster));
            rows
        }
    };
    to_result(&rows)
}

fn attendance_create(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let new: NewAttendance = parse_param(params, "record")?;
    to_result(&state.stores.attendance.add_attendance(new))
}

fn attendance_update(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    let patch: AttendancePatch = parse_param(params, "patch")?;
    to_result(&state.stores.attendance.update_attendance(&id, patch))
}

fn attendance_set_all(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let records: Vec<AttendanceRecord> = parse_param(params, "records")?;
    let count = records.len();
    state.stores.attendance.set_attendance(records);
    Ok(json!({ "count": count }))
}

fn attendance_set_loading(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let loading = get_required_bool(params, "loading")?;
    state.stores.attendance.set_loading(loading);
    Ok(json!({ "loading": state.stores.attendance.state().loading() }))
}

fn attendance_rate(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let teacher_id = get_optional_str(params, "teacherId")?;
    let rate = state
        .stores
        .attendance
        .state()
        .attendance_rate(teacher_id.as_deref());
    Ok(json!({ "rate": rate }))
}

fn attendance_day_summary(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let date: NaiveDate = parse_param(params, "date")?;
    to_result(&state.stores.attendance.state().day_summary(date))
}

fn attendance_filters_set(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let Some(partial) = params.get("filters").filter(|v| v.is_object()) else {
        return Err(HandlerErr::bad_params("filters must be an object"));
    };
    let merged: AttendanceFilters =
        merge_partial(state.stores.attendance.state().filters(), partial).map_err(|e| {
            HandlerErr::bad_params("invalid filters").with_details(json!({ "reason": e.to_string() }))
        })?;
    state.stores.attendance.set_filters(merged);
    to_result(state.stores.attendance.state().filters())
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let p = &req.params;
    let result = match req.method.as_str() {
        "attendance.list" => attendance_list(state, p),
        "attendance.create" => attendance_create(state, p),
        "attendance.update" => attendance_update(state, p),
        "attendance.setAll" => attendance_set_all(state, p),
        "attendance.setLoading" => attendance_set_loading(state, p),
        "attendance.rate" => attendance_rate(state, p),
        "attendance.trends" => to_result(&state.stores.attendance.state().trends()),
        "attendance.daySummary" => attendance_day_summary(state, p),
        "attendance.filters.get" => to_result(state.stores.attendance.state().filters()),
        "attendance.filters.set" => attendance_filters_set(state, p),
        "attendance.filters.clear" => {
            state.stores.attendance.clear_filters();
            to_result(state.stores.attendance.state().filters())
        }
        _ => return None,
    };
    Some(respond(&req.id, result))
}
