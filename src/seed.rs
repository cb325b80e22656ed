use anyhow::Context;
use serde::Deserialize;

use crate::model::{AttendanceRecord, LeaveRequest, Teacher};

const SEED_JSON: &str = include_str!("../fixtures/seed.json");

/// First-run data for an empty workspace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

pub fn load_seed() -> anyhow::Result<SeedData> {
    parse_seed(SEED_JSON)
}

pub fn parse_seed(raw: &str) -> anyhow::Result<SeedData> {
    serde_json::from_str(raw).context("failed to parse seed data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeaveStatus, TeacherStatus};
    use std::collections::HashSet;

    #[test]
    fn bundled_seed_parses() {
        let seed = load_seed().expect("seed");
        assert_eq!(seed.teachers.len(), 5);
        assert_eq!(seed.attendance.len(), 5);
        assert_eq!(seed.leave_requests.len(), 2);

        let ids: HashSet<_> = seed.teachers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert!(seed.attendance.iter().all(|r| ids.contains(r.teacher_id.as_str())));

        let sarah = &seed.teachers[0];
        assert_eq!(sarah.full_name(), "Sarah Johnson");
        assert_eq!(sarah.salary, 75000.0);
        assert_eq!(sarah.subjects, vec!["Mathematics", "Physics"]);
        assert_eq!(seed.teachers[4].status, TeacherStatus::OnLeave);
        assert_eq!(seed.leave_requests[0].status, LeaveStatus::Pending);
    }

    #[test]
    fn broken_seed_is_an_error() {
        assert!(parse_seed("{\"teachers\": 3}").is_err());
    }
}
