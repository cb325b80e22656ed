use std::rc::Rc;

use crate::seed::{load_seed, SeedData};
use crate::slots::{DetachedSlots, SlotStorage};
use crate::store::attendance::{new_attendance_store, AttendanceState};
use crate::store::dashboard::{new_dashboard_store, DashboardState};
use crate::store::teachers::{new_teacher_store, TeacherState};
use crate::store::ui::{new_ui_store, UiState};
use crate::store::{Hydration, Store};

/// The four stores of one open workspace, sharing one slot medium.
pub struct Workspace {
    pub teachers: Store<TeacherState>,
    pub attendance: Store<AttendanceState>,
    pub dashboard: Store<DashboardState>,
    pub ui: Store<UiState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenReport {
    pub teachers: Hydration,
    pub attendance: Hydration,
    pub ui: Hydration,
    pub seeded: bool,
}

impl Workspace {
    /// Stores with nothing behind them. Changes are kept in memory only.
    /// With `seed` on they start from the seed data, as a first run does.
    pub fn detached(seed: bool) -> Self {
        Self::open(Rc::new(DetachedSlots), seed).0
    }

    pub fn open(slots: Rc<dyn SlotStorage>, seed: bool) -> (Self, OpenReport) {
        let mut teachers = new_teacher_store();
        let mut attendance = new_attendance_store();
        let mut ui = new_ui_store();

        let mut report = OpenReport {
            teachers: teachers.hydrate(&*slots),
            attendance: attendance.hydrate(&*slots),
            ui: ui.hydrate(&*slots),
            seeded: false,
        };

        teachers.persist_to(Rc::clone(&slots));
        attendance.persist_to(Rc::clone(&slots));
        ui.persist_to(Rc::clone(&slots));

        let wants_seed = report.teachers == Hydration::Empty
            || report.attendance == Hydration::Empty;
        if seed && wants_seed {
            match load_seed() {
                Ok(data) => {
                    apply_seed(&mut teachers, &mut attendance, &report, data);
                    report.seeded = true;
                }
                Err(e) => log::error!("seed data unusable, stores stay empty: {:#}", e),
            }
        }

        let mut ws = Self {
            teachers,
            attendance,
            dashboard: new_dashboard_store(),
            ui,
        };
        ws.refresh_dashboard();
        log::info!(
            "stores ready: teachers={:?} attendance={:?} ui={:?} seeded={}",
            report.teachers,
            report.attendance,
            report.ui,
            report.seeded
        );
        (ws, report)
    }

    pub fn refresh_dashboard(&mut self) {
        self.dashboard
            .refresh(self.teachers.state(), self.attendance.state());
    }
}

fn apply_seed(
    teachers: &mut Store<TeacherState>,
    attendance: &mut Store<AttendanceState>,
    report: &OpenReport,
    data: SeedData,
) {
    if report.teachers == Hydration::Empty {
        log::info!("seeding {} teachers", data.teachers.len());
        teachers.set_all(data.teachers);
    }
    if report.attendance == Hydration::Empty {
        log::info!(
            "seeding {} attendance rows and {} leave requests",
            data.attendance.len(),
            data.leave_requests.len()
        );
        attendance.set_attendance(data.attendance);
        attendance.set_leave_requests(data.leave_requests);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::MemorySlots;
    use crate::store::teachers::TEACHER_STORE;
    use crate::store::ui::{Theme, UI_STORE};
    use crate::testutil::teacher;
    use crate::model::TeacherStatus;

    #[test]
    fn empty_slots_get_seeded_and_saved() {
        let slots = Rc::new(MemorySlots::new());
        let (ws, report) = Workspace::open(slots.clone(), true);
        assert!(report.seeded);
        assert_eq!(ws.teachers.state().teachers().len(), 5);
        assert_eq!(ws.dashboard.state().metrics.total_teachers, 5);
        assert_eq!(ws.dashboard.state().metrics.pending_leave_requests, 1);
        assert!(slots.load(TEACHER_STORE).is_some());
    }

    #[test]
    fn seeding_can_be_disabled() {
        let slots = Rc::new(MemorySlots::new());
        let (ws, report) = Workspace::open(slots.clone(), false);
        assert!(!report.seeded);
        assert!(ws.teachers.state().is_empty());
        assert!(slots.load(TEACHER_STORE).is_none());
    }

    #[test]
    fn saved_roster_wins_over_seed() {
        let slots = Rc::new(MemorySlots::new());
        {
            let (mut ws, _) = Workspace::open(slots.clone(), false);
            ws.teachers
                .set_all(vec![teacher("only", TeacherStatus::Active, 60000.0)]);
            ws.ui.set_theme(Theme::Dark);
        }
        let (ws, report) = Workspace::open(slots.clone(), true);
        assert_eq!(report.teachers, Hydration::Restored);
        assert_eq!(ws.teachers.state().teachers().len(), 1);
        assert_eq!(ws.ui.state().theme(), Theme::Dark);
        // attendance slot was never written, so only it is seeded
        assert_eq!(ws.attendance.state().attendance().len(), 5);
    }

    #[test]
    fn malformed_slot_is_not_reseeded() {
        let slots = Rc::new(MemorySlots::new());
        slots.put_raw(TEACHER_STORE, r#"{"teachers": "nope"}"#);
        slots.put_raw(UI_STORE, r#"{"theme": 7}"#);
        let (ws, report) = Workspace::open(slots.clone(), true);
        assert_eq!(report.teachers, Hydration::Malformed);
        assert_eq!(report.ui, Hydration::Malformed);
        assert!(ws.teachers.state().is_empty());
        assert_eq!(ws.ui.state().theme(), Theme::Light);
    }

    #[test]
    fn detached_stores_follow_the_seed_switch() {
        let seeded = Workspace::detached(true);
        assert_eq!(seeded.teachers.state().teachers().len(), 5);
        assert_eq!(seeded.attendance.state().leave_requests().len(), 2);

        let bare = Workspace::detached(false);
        assert!(bare.teachers.state().is_empty());
        assert!(bare.attendance.state().is_empty());
    }
}
