use serde_json::json;

use crate::ipc::helpers::{
    get_required_bool, get_required_str, parse_param, respond, to_result, HandlerResult,
};
use crate::ipc::types::{AppState, Request};
use crate::store::ui::{NewNotification, Theme};

fn ui_snapshot(state: &AppState) -> HandlerResult {
    let ui = state.stores.ui.state();
    Ok(json!({
        "sidebar": ui.sidebar(),
        "theme": ui.theme(),
        "unreadCount": ui.unread_count(),
    }))
}

fn notifications_list(state: &AppState) -> HandlerResult {
    let ui = state.stores.ui.state();
    Ok(json!({
        "notifications": ui.notifications(),
        "unreadCount": ui.unread_count(),
    }))
}

fn sidebar_set_collapsed(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let collapsed = get_required_bool(params, "collapsed")?;
    state.stores.ui.set_sidebar_collapsed(collapsed);
    to_result(state.stores.ui.state().sidebar())
}

fn section_set(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let section = get_required_str(params, "section")?;
    state.stores.ui.set_active_section(&section);
    to_result(state.stores.ui.state().sidebar())
}

fn theme_set(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let theme: Theme = parse_param(params, "theme")?;
    state.stores.ui.set_theme(theme);
    Ok(json!({ "theme": theme }))
}

fn notifications_add(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let new: NewNotification = parse_param(params, "notification")?;
    to_result(&state.stores.ui.add_notification(new))
}

fn notifications_mark_read(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let id = get_required_str(params, "id")?;
    let found = state.stores.ui.mark_read(&id);
    Ok(json!({
        "found": found,
        "unreadCount": state.stores.ui.state().unread_count(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let p = &req.params;
    let result = match req.method.as_str() {
        "ui.get" => ui_snapshot(state),
        "ui.sidebar.toggle" => {
            state.stores.ui.toggle_sidebar();
            to_result(state.stores.ui.state().sidebar())
        }
        "ui.sidebar.setCollapsed" => sidebar_set_collapsed(state, p),
        "ui.section.set" => section_set(state, p),
        "ui.theme.toggle" => {
            let theme = state.stores.ui.toggle_theme();
            Ok(json!({ "theme": theme }))
        }
        "ui.theme.set" => theme_set(state, p),
        "notifications.list" => notifications_list(state),
        "notifications.add" => notifications_add(state, p),
        "notifications.markRead" => notifications_mark_read(state, p),
        "notifications.clear" => {
            state.stores.ui.clear_all();
            notifications_list(state)
        }
        _ => return None,
    };
    Some(respond(&req.id, result))
}
