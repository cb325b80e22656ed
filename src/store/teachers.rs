use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::criteria::{all_as_none, blank_as_none, RangeFilter};
use super::{fresh_id, Persist, Store};
use crate::model::{EmploymentType, NewTeacher, Teacher, TeacherPatch, TeacherStatus};

pub const TEACHER_STORE: &str = "teacher-store";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherFilters {
    #[serde(deserialize_with = "blank_as_none")]
    pub search: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub department: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "all_as_none")]
    pub status: Option<TeacherStatus>,
    #[serde(deserialize_with = "all_as_none")]
    pub employment_type: Option<EmploymentType>,
    pub experience: Option<RangeFilter<f64>>,
    pub salary: Option<RangeFilter<f64>>,
}

impl TeacherFilters {
    pub fn matches(&self, t: &Teacher) -> bool {
        if let Some(q) = self.search.as_deref() {
            let q = q.to_lowercase();
            let hit = [&t.first_name, &t.last_name, &t.email, &t.employee_id]
                .iter()
                .any(|field| field.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        if let Some(dept) = self.department.as_deref() {
            if t.department != dept {
                return false;
            }
        }
        if let Some(subject) = self.subject.as_deref() {
            if !t.subjects.iter().any(|s| s == subject) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if t.status != status {
                return false;
            }
        }
        if let Some(kind) = self.employment_type {
            if t.employment_type != kind {
                return false;
            }
        }
        if let Some(range) = self.experience {
            if !range.contains(t.experience_years) {
                return false;
            }
        }
        if let Some(range) = self.salary {
            if !range.contains(t.salary) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub on_leave: usize,
    pub departments: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TeacherState {
    teachers: Vec<Teacher>,
    selected: Option<String>,
    filters: TeacherFilters,
    loading: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeacherSnapshot {
    pub teachers: Vec<Teacher>,
}

impl Persist for TeacherState {
    const KEY: &'static str = TEACHER_STORE;
    type Snapshot = TeacherSnapshot;

    fn snapshot(&self) -> TeacherSnapshot {
        TeacherSnapshot {
            teachers: self.teachers.clone(),
        }
    }

    fn restore(&mut self, snapshot: TeacherSnapshot) {
        self.teachers = snapshot.teachers;
        self.selected = None;
    }
}

impl TeacherState {
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
    }

    pub fn filters(&self) -> &TeacherFilters {
        &self.filters
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&Teacher> {
        self.selected.as_deref().and_then(|id| self.get_by_id(id))
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Matching teachers in roster order.
    pub fn filtered(&self, filters: &TeacherFilters) -> Vec<&Teacher> {
        self.teachers.iter().filter(|t| filters.matches(t)).collect()
    }

    /// The roster as seen through the store's own filters.
    pub fn visible(&self) -> Vec<&Teacher> {
        self.filtered(&self.filters)
    }

    pub fn by_department(&self, department: &str) -> Vec<&Teacher> {
        self.teachers
            .iter()
            .filter(|t| t.department == department)
            .collect()
    }

    pub fn departments(&self) -> Vec<String> {
        self.teachers
            .iter()
            .map(|t| t.department.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.teachers
            .iter()
            .flat_map(|t| t.subjects.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> TeacherStats {
        let count = |s: TeacherStatus| self.teachers.iter().filter(|t| t.status == s).count();
        TeacherStats {
            total: self.teachers.len(),
            active: count(TeacherStatus::Active),
            inactive: count(TeacherStatus::Inactive),
            on_leave: count(TeacherStatus::OnLeave),
            departments: self.departments().len(),
        }
    }

    fn insert(&mut self, new: NewTeacher) -> Teacher {
        let id = fresh_id(|candidate| self.teachers.iter().any(|t| t.id == candidate));
        let teacher = new.into_teacher(id, Utc::now());
        self.teachers.push(teacher.clone());
        teacher
    }

    fn patch(&mut self, id: &str, patch: TeacherPatch) -> Option<Teacher> {
        let t = self.teachers.iter_mut().find(|t| t.id == id)?;
        t.updated_at = Utc::now();
        patch.apply(t);
        Some(t.clone())
    }

    fn delete(&mut self, id: &str) -> Option<()> {
        let before = self.teachers.len();
        self.teachers.retain(|t| t.id != id);
        if self.teachers.len() == before {
            return None;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(())
    }
}

impl Store<TeacherState> {
    pub fn set_all(&mut self, teachers: Vec<Teacher>) {
        self.set(|s| {
            s.teachers = teachers;
            if let Some(sel) = s.selected.clone() {
                if s.get_by_id(&sel).is_none() {
                    s.selected = None;
                }
            }
        });
    }

    pub fn add(&mut self, new: NewTeacher) -> Teacher {
        self.set(|s| s.insert(new))
    }

    /// `None` when no teacher has `id`; the roster is left untouched.
    pub fn update(&mut self, id: &str, patch: TeacherPatch) -> Option<Teacher> {
        self.set_if(|s| s.patch(id, patch))
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.set_if(|s| s.delete(id)).is_some()
    }

    /// Selects a teacher by id, or clears the selection. Returns false for
    /// an unknown id, which also clears the selection.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        self.set(|s| {
            s.selected = id
                .filter(|id| s.get_by_id(id).is_some())
                .map(|id| id.to_string());
            id.is_none() || s.selected.is_some()
        })
    }

    pub fn set_filters(&mut self, filters: TeacherFilters) {
        self.set(|s| s.filters = filters);
    }

    pub fn clear_filters(&mut self) {
        self.set(|s| s.filters = TeacherFilters::default());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.set(|s| s.loading = loading);
    }
}

pub fn new_teacher_store() -> Store<TeacherState> {
    Store::new(TEACHER_STORE, TeacherState::default())
}
