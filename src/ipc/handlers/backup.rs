use serde_json::json;
use std::path::PathBuf;

use crate::backup;
use crate::ipc::helpers::{get_required_str, respond, HandlerErr, HandlerResult};
use crate::ipc::types::{AppState, Request};

fn require_workspace(state: &AppState) -> Result<PathBuf, HandlerErr> {
    state
        .workspace
        .clone()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}

fn backup_export(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let workspace = require_workspace(state)?;
    let out_path = PathBuf::from(get_required_str(params, "outPath")?);
    let summary = backup::export_workspace_bundle(&workspace, &out_path)
        .map_err(|e| HandlerErr::new("backup_failed", format!("{e:#}")))?;
    log::info!(
        "exported workspace {} to {}",
        workspace.to_string_lossy(),
        out_path.to_string_lossy()
    );
    Ok(json!({
        "outPath": out_path.to_string_lossy(),
        "bundleFormat": summary.bundle_format,
        "entryCount": summary.entry_count,
        "dbSha256": summary.db_sha256,
    }))
}

/// The database handle is released before the file is replaced, then the
/// workspace is reopened whatever the import outcome.
fn backup_import(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let workspace = require_workspace(state)?;
    let in_path = PathBuf::from(get_required_str(params, "inPath")?);

    state.close_workspace();
    let imported = backup::import_workspace_bundle(&in_path, &workspace);
    let reopened = state.open_workspace(&workspace);

    let summary = imported.map_err(|e| {
        log::warn!("import from {} failed: {:#}", in_path.to_string_lossy(), e);
        HandlerErr::new("backup_failed", format!("{e:#}"))
    })?;
    reopened.map_err(|e| HandlerErr::new("db_open_failed", format!("{e:#}")))?;
    log::info!(
        "imported {} into {}",
        in_path.to_string_lossy(),
        workspace.to_string_lossy()
    );
    Ok(json!({
        "workspacePath": workspace.to_string_lossy(),
        "bundleFormatDetected": summary.bundle_format_detected,
        "teacherCount": state.stores.teachers.state().teachers().len(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "backup.export" => backup_export(state, &req.params),
        "backup.import" => backup_import(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
