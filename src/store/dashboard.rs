use chrono::{Days, Months, NaiveDate, Utc};
use serde::Serialize;

use super::attendance::AttendanceState;
use super::teachers::TeacherState;
use super::Store;
use crate::analytics::mean;
use crate::model::{AttendanceTrend, DashboardMetrics, SalaryBreakdown, Teacher, TeacherStatus};
use crate::payroll::salary_breakdown;

pub const DASHBOARD_STORE: &str = "dashboard-store";

const REVIEW_INTERVAL_MONTHS: u32 = 6;
const REVIEW_HORIZON_DAYS: u64 = 30;

/// Derived figures for the landing page. Recomputed wholesale by `refresh`;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub metrics: DashboardMetrics,
    pub attendance_trends: Vec<AttendanceTrend>,
    pub salary_breakdown: Vec<SalaryBreakdown>,
    pub loading: bool,
}

fn review_due(t: &Teacher, horizon: NaiveDate) -> bool {
    t.last_review_date
        .and_then(|last| last.checked_add_months(Months::new(REVIEW_INTERVAL_MONTHS)))
        .is_some_and(|next| next <= horizon)
}

pub fn compute_metrics(
    teachers: &TeacherState,
    attendance: &AttendanceState,
    as_of: NaiveDate,
) -> DashboardMetrics {
    let roster = teachers.teachers();
    let horizon = as_of
        .checked_add_days(Days::new(REVIEW_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX);
    DashboardMetrics {
        total_teachers: roster.len(),
        active_teachers: roster
            .iter()
            .filter(|t| t.status == TeacherStatus::Active)
            .count(),
        attendance_rate: attendance.attendance_rate(None),
        average_salary: mean(roster.iter().map(|t| t.salary)),
        pending_leave_requests: attendance.pending_leave_requests().len(),
        upcoming_reviews: roster.iter().filter(|t| review_due(t, horizon)).count(),
    }
}

impl Store<DashboardState> {
    pub fn refresh(&mut self, teachers: &TeacherState, attendance: &AttendanceState) {
        self.refresh_as_of(teachers, attendance, Utc::now().date_naive());
    }

    pub fn refresh_as_of(
        &mut self,
        teachers: &TeacherState,
        attendance: &AttendanceState,
        as_of: NaiveDate,
    ) {
        let metrics = compute_metrics(teachers, attendance, as_of);
        let trends = attendance.trends();
        let breakdown = salary_breakdown(teachers.teachers());
        self.set(|s| {
            s.metrics = metrics;
            s.attendance_trends = trends;
            s.salary_breakdown = breakdown;
            s.loading = false;
        });
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.set(|s| s.loading = loading);
    }
}

pub fn new_dashboard_store() -> Store<DashboardState> {
    Store::new(DASHBOARD_STORE, DashboardState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttendanceStatus;
    use crate::store::attendance::new_attendance_store;
    use crate::store::teachers::new_teacher_store;
    use crate::testutil::{attendance, date, teacher};

    #[test]
    fn metrics_for_two_teacher_roster() {
        let mut teachers = new_teacher_store();
        teachers.set_all(vec![
            teacher("1", TeacherStatus::Active, 75000.0),
            teacher("2", TeacherStatus::OnLeave, 68000.0),
        ]);
        let mut att = new_attendance_store();
        att.set_attendance(vec![
            attendance("a1", "1", "2024-07-10", AttendanceStatus::Present),
            attendance("a2", "2", "2024-07-10", AttendanceStatus::OnLeave),
        ]);

        let mut dash = new_dashboard_store();
        dash.refresh_as_of(teachers.state(), att.state(), date("2024-07-10"));
        let m = &dash.state().metrics;
        assert_eq!(m.total_teachers, 2);
        assert_eq!(m.active_teachers, 1);
        assert_eq!(m.average_salary, 71500.0);
        assert_eq!(m.attendance_rate, 50.0);
        assert_eq!(m.pending_leave_requests, 0);
        assert_eq!(dash.state().attendance_trends.len(), 1);
        assert_eq!(dash.state().salary_breakdown[0].teacher_count, 2);
    }

    #[test]
    fn empty_stores_give_zero_metrics() {
        let teachers = new_teacher_store();
        let att = new_attendance_store();
        let mut dash = new_dashboard_store();
        dash.set_loading(true);
        dash.refresh(teachers.state(), att.state());
        assert_eq!(dash.state().metrics, DashboardMetrics::default());
        assert!(dash.state().attendance_trends.is_empty());
        assert!(!dash.state().loading);
    }

    #[test]
    fn reviews_due_within_thirty_days() {
        let mut due = teacher("1", TeacherStatus::Active, 70000.0);
        due.last_review_date = Some(date("2024-01-20"));
        let mut later = teacher("2", TeacherStatus::Active, 70000.0);
        later.last_review_date = Some(date("2024-03-01"));
        let never = teacher("3", TeacherStatus::Active, 70000.0);

        let mut teachers = new_teacher_store();
        teachers.set_all(vec![due, later, never]);
        let att = new_attendance_store();
        let m = compute_metrics(teachers.state(), att.state(), date("2024-07-01"));
        assert_eq!(m.upcoming_reviews, 1);

        let m = compute_metrics(teachers.state(), att.state(), date("2024-08-05"));
        assert_eq!(m.upcoming_reviews, 2);
    }
}
