use crate::analytics;
use crate::ipc::helpers::{respond, to_result};
use crate::ipc::types::{AppState, Request};

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let roster = state.stores.teachers.state().teachers();
    let result = match req.method.as_str() {
        "analytics.overview" => to_result(&analytics::overview(roster)),
        "analytics.departments" => to_result(&analytics::department_analytics(roster)),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
