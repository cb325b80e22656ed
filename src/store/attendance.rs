use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::criteria::{all_as_none, blank_as_none, DateRange};
use super::{fresh_id, Persist, Store};
use crate::model::{
    AttendancePatch, AttendanceRecord, AttendanceStatus, AttendanceTrend, LeaveRequest,
    LeaveRequestPatch, LeaveStatus, NewAttendance, NewLeaveRequest, Teacher,
};

pub const ATTENDANCE_STORE: &str = "attendance-store";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceFilters {
    pub date_range: Option<DateRange>,
    #[serde(deserialize_with = "all_as_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(deserialize_with = "blank_as_none")]
    pub department: Option<String>,
}

impl AttendanceFilters {
    /// Department matching goes through the roster; rows whose teacher is
    /// gone never match a department filter.
    pub fn matches(&self, r: &AttendanceRecord, teachers: &[Teacher]) -> bool {
        if let Some(range) = self.date_range {
            if !range.contains(r.date) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if r.status != status {
                return false;
            }
        }
        if let Some(dept) = self.department.as_deref() {
            let in_dept = teachers
                .iter()
                .find(|t| t.id == r.teacher_id)
                .is_some_and(|t| t.department == dept);
            if !in_dept {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub half_day: usize,
    pub on_leave: usize,
    pub total: usize,
}

/// Outcome of approving or rejecting a leave request.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaveTransition {
    Applied(LeaveRequest),
    NotFound,
    AlreadyDecided(LeaveStatus),
}

#[derive(Debug, Clone, PartialEq)]
enum Decision {
    Approve,
    Reject(Option<String>),
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceState {
    attendance: Vec<AttendanceRecord>,
    leave_requests: Vec<LeaveRequest>,
    filters: AttendanceFilters,
    loading: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSnapshot {
    pub attendance: Vec<AttendanceRecord>,
    pub leave_requests: Vec<LeaveRequest>,
}

impl Persist for AttendanceState {
    const KEY: &'static str = ATTENDANCE_STORE;
    type Snapshot = AttendanceSnapshot;

    fn snapshot(&self) -> AttendanceSnapshot {
        AttendanceSnapshot {
            attendance: self.attendance.clone(),
            leave_requests: self.leave_requests.clone(),
        }
    }

    fn restore(&mut self, snapshot: AttendanceSnapshot) {
        self.attendance = snapshot.attendance;
        self.leave_requests = snapshot.leave_requests;
    }
}

impl AttendanceState {
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn leave_requests(&self) -> &[LeaveRequest] {
        &self.leave_requests
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.attendance.is_empty() && self.leave_requests.is_empty()
    }

    pub fn filters(&self) -> &AttendanceFilters {
        &self.filters
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn by_teacher(&self, teacher_id: &str) -> Vec<&AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|r| r.teacher_id == teacher_id)
            .collect()
    }

    pub fn by_date(&self, date: NaiveDate) -> Vec<&AttendanceRecord> {
        self.attendance.iter().filter(|r| r.date == date).collect()
    }

    pub fn leave_by_id(&self, id: &str) -> Option<&LeaveRequest> {
        self.leave_requests.iter().find(|r| r.id == id)
    }

    pub fn leave_by_status(&self, status: LeaveStatus) -> Vec<&LeaveRequest> {
        self.leave_requests
            .iter()
            .filter(|r| r.status == status)
            .collect()
    }

    pub fn pending_leave_requests(&self) -> Vec<&LeaveRequest> {
        self.leave_by_status(LeaveStatus::Pending)
    }

    /// Share of present-or-late records as a percentage. Zero when there is
    /// nothing to measure.
    pub fn attendance_rate(&self, teacher_id: Option<&str>) -> f64 {
        let mut total = 0usize;
        let mut attended = 0usize;
        for r in &self.attendance {
            if teacher_id.is_some_and(|id| r.teacher_id != id) {
                continue;
            }
            total += 1;
            if r.status.counts_as_attended() {
                attended += 1;
            }
        }
        if total == 0 {
            return 0.0;
        }
        attended as f64 / total as f64 * 100.0
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        let mut out = DaySummary::default();
        for r in self.by_date(date) {
            out.total += 1;
            match r.status {
                AttendanceStatus::Present => out.present += 1,
                AttendanceStatus::Absent => out.absent += 1,
                AttendanceStatus::Late => out.late += 1,
                AttendanceStatus::HalfDay => out.half_day += 1,
                AttendanceStatus::OnLeave => out.on_leave += 1,
            }
        }
        out
    }

    /// Per-day status counts, oldest first. Half days have no trend column.
    pub fn trends(&self) -> Vec<AttendanceTrend> {
        let mut days: BTreeMap<NaiveDate, AttendanceTrend> = BTreeMap::new();
        for r in &self.attendance {
            let row = days.entry(r.date).or_insert_with(|| AttendanceTrend {
                date: r.date,
                present: 0,
                absent: 0,
                late: 0,
                on_leave: 0,
            });
            match r.status {
                AttendanceStatus::Present => row.present += 1,
                AttendanceStatus::Absent => row.absent += 1,
                AttendanceStatus::Late => row.late += 1,
                AttendanceStatus::OnLeave => row.on_leave += 1,
                AttendanceStatus::HalfDay => {}
            }
        }
        days.into_values().collect()
    }

    pub fn filtered<'a>(
        &'a self,
        filters: &AttendanceFilters,
        teachers: &[Teacher],
    ) -> Vec<&'a AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|r| filters.matches(r, teachers))
            .collect()
    }

    fn push_attendance(&mut self, new: NewAttendance) -> AttendanceRecord {
        let id = fresh_id(|c| self.attendance.iter().any(|r| r.id == c));
        let record = new.into_record(id, Utc::now());
        self.attendance.push(record.clone());
        record
    }

    fn patch_attendance(&mut self, id: &str, patch: AttendancePatch) -> Option<AttendanceRecord> {
        let r = self.attendance.iter_mut().find(|r| r.id == id)?;
        patch.apply(r);
        Some(r.clone())
    }

    fn push_leave(&mut self, new: NewLeaveRequest, today: NaiveDate) -> LeaveRequest {
        let id = fresh_id(|c| self.leave_requests.iter().any(|r| r.id == c));
        let request = new.into_request(id, today);
        self.leave_requests.push(request.clone());
        request
    }

    fn patch_leave(&mut self, id: &str, patch: LeaveRequestPatch) -> Option<LeaveRequest> {
        let r = self.leave_requests.iter_mut().find(|r| r.id == id)?;
        patch.apply(r);
        Some(r.clone())
    }

    fn decide(
        &mut self,
        id: &str,
        decision: Decision,
        approver: &str,
        on: NaiveDate,
    ) -> Option<LeaveRequest> {
        let r = self
            .leave_requests
            .iter_mut()
            .find(|r| r.id == id && r.status == LeaveStatus::Pending)?;
        match decision {
            Decision::Approve => {
                r.status = LeaveStatus::Approved;
                r.rejection_reason = None;
            }
            Decision::Reject(reason) => {
                r.status = LeaveStatus::Rejected;
                r.rejection_reason = reason;
            }
        }
        r.approved_by = Some(approver.to_string());
        r.approved_date = Some(on);
        Some(r.clone())
    }
}

impl Store<AttendanceState> {
    pub fn set_attendance(&mut self, records: Vec<AttendanceRecord>) {
        self.set(|s| s.attendance = records);
    }

    pub fn add_attendance(&mut self, new: NewAttendance) -> AttendanceRecord {
        self.set(|s| s.push_attendance(new))
    }

    pub fn update_attendance(
        &mut self,
        id: &str,
        patch: AttendancePatch,
    ) -> Option<AttendanceRecord> {
        self.set_if(|s| s.patch_attendance(id, patch))
    }

    pub fn set_leave_requests(&mut self, requests: Vec<LeaveRequest>) {
        self.set(|s| s.leave_requests = requests);
    }

    pub fn add_leave_request(&mut self, new: NewLeaveRequest) -> LeaveRequest {
        let today = Utc::now().date_naive();
        self.set(|s| s.push_leave(new, today))
    }

    pub fn update_leave_request(
        &mut self,
        id: &str,
        patch: LeaveRequestPatch,
    ) -> Option<LeaveRequest> {
        self.set_if(|s| s.patch_leave(id, patch))
    }

    pub fn approve_leave(&mut self, id: &str, approver: &str, on: NaiveDate) -> LeaveTransition {
        self.transition(id, Decision::Approve, approver, on)
    }

    pub fn reject_leave(
        &mut self,
        id: &str,
        approver: &str,
        reason: Option<String>,
        on: NaiveDate,
    ) -> LeaveTransition {
        self.transition(id, Decision::Reject(reason), approver, on)
    }

    fn transition(
        &mut self,
        id: &str,
        decision: Decision,
        approver: &str,
        on: NaiveDate,
    ) -> LeaveTransition {
        match self.state().leave_by_id(id) {
            None => return LeaveTransition::NotFound,
            Some(r) if r.status != LeaveStatus::Pending => {
                return LeaveTransition::AlreadyDecided(r.status)
            }
            Some(_) => {}
        }
        self.set_if(|s| s.decide(id, decision, approver, on))
            .map(LeaveTransition::Applied)
            .unwrap_or(LeaveTransition::NotFound)
    }

    pub fn set_filters(&mut self, filters: AttendanceFilters) {
        self.set(|s| s.filters = filters);
    }

    pub fn clear_filters(&mut self) {
        self.set(|s| s.filters = AttendanceFilters::default());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.set(|s| s.loading = loading);
    }
}

pub fn new_attendance_store() -> Store<AttendanceState> {
    Store::new(ATTENDANCE_STORE, AttendanceState::default())
}
