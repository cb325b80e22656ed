use chrono::{NaiveDate, TimeZone, Utc};

use crate::model::{
    AttendanceRecord, AttendanceStatus, EmploymentType, NewTeacher, Teacher, TeacherStatus,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn new_teacher(first: &str, last: &str, department: &str, salary: f64) -> NewTeacher {
    NewTeacher {
        employee_id: format!("EMP-{}", last.to_uppercase()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@school.edu", first.to_lowercase(), last.to_lowercase()),
        phone: String::new(),
        avatar: None,
        date_of_birth: None,
        hire_date: None,
        department: department.to_string(),
        subjects: Vec::new(),
        qualification: String::new(),
        experience_years: 5.0,
        salary,
        employment_type: EmploymentType::FullTime,
        address: None,
        emergency_contact: None,
        documents: Vec::new(),
        performance_rating: 4.0,
        last_review_date: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn teacher(id: &str, status: TeacherStatus, salary: f64) -> Teacher {
    let stamp = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp");
    let mut t = new_teacher("Test", &format!("Teacher{}", id), "Science", salary)
        .into_teacher(id.to_string(), stamp);
    t.status = status;
    t
}

pub fn attendance(id: &str, teacher_id: &str, day: &str, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        teacher_id: teacher_id.to_string(),
        date: date(day),
        check_in: None,
        check_out: None,
        status,
        leave_type: None,
        notes: None,
        approved_by: None,
        created_at: Utc
            .with_ymd_and_hms(2024, 7, 10, 8, 0, 0)
            .single()
            .expect("timestamp"),
    }
}
