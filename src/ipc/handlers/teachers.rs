use serde_json::json;

use crate::ipc::helpers::{
    get_optional_str, get_required_bool, get_required_str, parse_optional_param, parse_param,
    respond, to_result, HandlerErr, HandlerResult,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{NewTeacher, Teacher, TeacherPatch};
use crate::store::criteria::merge_partial;
use crate::store::teachers::TeacherFilters;

fn teachers_list(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let roster = state.stores.teachers.state();
    let rows = match parse_optional_param::<TeacherFilters>(params, "filters")? {
        Some(filters) => roster.filtered(&filters),
        None => roster.visible(),
    };
    to_result(&rows)
}

fn teachers_get(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    to_result(&state.stores.teachers.state().get_by_id(&id))
}

fn teachers_create(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let new: NewTeacher = parse_param(params, "teacher")?;
    let created = state.stores.teachers.add(new);
    log::debug!("teacher {} created", created.id);
    to_result(&created)
}

fn teachers_update(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    let patch: TeacherPatch = parse_param(params, "patch")?;
    to_result(&state.stores.teachers.update(&id, patch))
}

fn teachers_delete(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    Ok(json!(state.stores.teachers.remove(&id)))
}

fn teachers_set_all(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let teachers: Vec<Teacher> = parse_param(params, "teachers")?;
    let count = teachers.len();
    state.stores.teachers.set_all(teachers);
    Ok(json!({ "count": count }))
}

fn teachers_by_department(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let department = get_required_str(params, "department")?;
    to_result(&state.stores.teachers.state().by_department(&department))
}

fn teachers_filters_set(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let Some(partial) = params.get("filters").filter(|v| v.is_object()) else {
        return Err(HandlerErr::bad_params("filters must be an object"));
    };
    let merged: TeacherFilters = merge_partial(state.stores.teachers.state().filters(), partial)
        .map_err(|e| {
            HandlerErr::bad_params("invalid filters").with_details(json!({ "reason": e.to_string() }))
        })?;
    state.stores.teachers.set_filters(merged);
    to_result(state.stores.teachers.state().filters())
}

fn teachers_select(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_optional_str(params, "id")?;
    state.stores.teachers.select(id.as_deref());
    to_result(&state.stores.teachers.state().selected())
}

fn teachers_set_loading(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let loading = get_required_bool(params, "loading")?;
    state.stores.teachers.set_loading(loading);
    Ok(json!({ "loading": state.stores.teachers.state().loading() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let p = &req.params;
    let result = match req.method.as_str() {
        "teachers.list" => teachers_list(state, p),
        "teachers.get" => teachers_get(state, p),
        "teachers.create" => teachers_create(state, p),
        "teachers.update" => teachers_update(state, p),
        "teachers.delete" => teachers_delete(state, p),
        "teachers.setAll" => teachers_set_all(state, p),
        "teachers.setLoading" => teachers_set_loading(state, p),
        "teachers.byDepartment" => teachers_by_department(state, p),
        "teachers.departments" => to_result(&state.stores.teachers.state().departments()),
        "teachers.subjects" => to_result(&state.stores.teachers.state().subjects()),
        "teachers.stats" => to_result(&state.stores.teachers.state().stats()),
        "teachers.filters.get" => to_result(state.stores.teachers.state().filters()),
        "teachers.filters.set" => teachers_filters_set(state, p),
        "teachers.filters.clear" => {
            state.stores.teachers.clear_filters();
            to_result(state.stores.teachers.state().filters())
        }
        "teachers.select" => teachers_select(state, p),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
