use crate::ipc::helpers::{get_required_str, respond, to_result, HandlerResult};
use crate::ipc::types::{AppState, Request};
use crate::payroll;

fn payroll_payslip(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    let teacher_id = get_required_str(params, "teacherId")?;
    let slip = state
        .stores
        .teachers
        .state()
        .get_by_id(&teacher_id)
        .map(payroll::payslip);
    to_result(&slip)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "payroll.payslip" => payroll_payslip(state, &req.params),
        "payroll.breakdown" => {
            to_result(&payroll::salary_breakdown(state.stores.teachers.state().teachers()))
        }
        "payroll.summary" => {
            to_result(&payroll::salary_summary(state.stores.teachers.state().teachers()))
        }
        _ => return None,
    };
    Some(respond(&req.id, result))
}
