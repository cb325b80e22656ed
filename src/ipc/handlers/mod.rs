pub mod analytics;
pub mod attendance;
pub mod backup;
pub mod core;
pub mod dashboard;
pub mod leave;
pub mod payroll;
pub mod teachers;
pub mod ui;
