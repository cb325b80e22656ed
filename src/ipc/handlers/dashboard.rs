use chrono::NaiveDate;

use serde_json::json;

use crate::ipc::helpers::{
    get_required_bool, parse_optional_param, respond, to_result, HandlerResult,
};
use crate::ipc::types::{AppState, Request};

fn dashboard_refresh(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let as_of: Option<NaiveDate> = parse_optional_param(params, "asOf")?;
    let stores = &mut state.stores;
    match as_of {
        Some(day) => stores.dashboard.refresh_as_of(
            stores.teachers.state(),
            stores.attendance.state(),
            day,
        ),
        None => stores.refresh_dashboard(),
    }
    to_result(stores.dashboard.state())
}

fn dashboard_set_loading(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let loading = get_required_bool(params, "loading")?;
    state.stores.dashboard.set_loading(loading);
    Ok(json!({ "loading": state.stores.dashboard.state().loading }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "dashboard.get" => to_result(state.stores.dashboard.state()),
        "dashboard.refresh" => dashboard_refresh(state, &req.params),
        "dashboard.setLoading" => dashboard_set_loading(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
