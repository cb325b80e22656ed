use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeacherStatus {
    Active,
    Inactive,
    OnLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Certificate,
    Contract,
    Id,
    Resume,
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub url: String,
    pub upload_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub size: u64,
}

/// A roster entry. `subjects` also accepts the `subject` key used by older
/// exports, but only in its list form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    pub department: String,
    #[serde(default, alias = "subject")]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub qualification: String,
    #[serde(rename = "experience")]
    pub experience_years: f64,
    pub salary: f64,
    pub employment_type: EmploymentType,
    pub status: TeacherStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub performance_rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input to `teachers.add`: everything but `id` and `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    pub department: String,
    #[serde(default, alias = "subject")]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub qualification: String,
    #[serde(rename = "experience")]
    pub experience_years: f64,
    pub salary: f64,
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub performance_rating: f64,
    #[serde(default)]
    pub last_review_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewTeacher {
    pub fn into_teacher(self, id: String, now: DateTime<Utc>) -> Teacher {
        Teacher {
            id,
            employee_id: self.employee_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            avatar: self.avatar,
            date_of_birth: self.date_of_birth,
            hire_date: self.hire_date,
            department: self.department,
            subjects: self.subjects,
            qualification: self.qualification,
            experience_years: self.experience_years,
            salary: self.salary,
            employment_type: self.employment_type,
            status: TeacherStatus::Active,
            address: self.address,
            emergency_contact: self.emergency_contact,
            documents: self.documents,
            performance_rating: self.performance_rating,
            last_review_date: self.last_review_date,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}

/// Shallow patch over a teacher. Every `Some` field overwrites.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherPatch {
    pub employee_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub department: Option<String>,
    #[serde(alias = "subject")]
    pub subjects: Option<Vec<String>>,
    pub qualification: Option<String>,
    #[serde(rename = "experience")]
    pub experience_years: Option<f64>,
    pub salary: Option<f64>,
    pub employment_type: Option<EmploymentType>,
    pub status: Option<TeacherStatus>,
    pub address: Option<Address>,
    pub emergency_contact: Option<EmergencyContact>,
    pub documents: Option<Vec<Document>>,
    pub performance_rating: Option<f64>,
    pub last_review_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

macro_rules! merge_some {
    ($target:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(v) = $patch.$field {
                $target.$field = v;
            }
        )*
    };
}

macro_rules! merge_some_opt {
    ($target:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(v) = $patch.$field {
                $target.$field = Some(v);
            }
        )*
    };
}

impl TeacherPatch {
    pub fn apply(self, t: &mut Teacher) {
        merge_some!(
            t,
            self,
            [
                employee_id,
                first_name,
                last_name,
                email,
                phone,
                department,
                subjects,
                qualification,
                experience_years,
                salary,
                employment_type,
                status,
                documents,
                performance_rating,
                created_at,
                updated_at,
            ]
        );
        merge_some_opt!(
            t,
            self,
            [
                avatar,
                date_of_birth,
                hire_date,
                address,
                emergency_contact,
                last_review_date,
            ]
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
    OnLeave,
}

impl AttendanceStatus {
    /// Present and late both count as attended.
    pub fn counts_as_attended(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbsenceType {
    Sick,
    Personal,
    Vacation,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub teacher_id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<AbsenceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub teacher_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub leave_type: Option<AbsenceType>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
}

impl NewAttendance {
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord {
            id,
            teacher_id: self.teacher_id,
            date: self.date,
            check_in: self.check_in,
            check_out: self.check_out,
            status: self.status,
            leave_type: self.leave_type,
            notes: self.notes,
            approved_by: self.approved_by,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendancePatch {
    pub teacher_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub leave_type: Option<AbsenceType>,
    pub notes: Option<String>,
    pub approved_by: Option<String>,
}

impl AttendancePatch {
    pub fn apply(self, r: &mut AttendanceRecord) {
        merge_some!(r, self, [teacher_id, date, status]);
        merge_some_opt!(r, self, [check_in, check_out, leave_type, notes, approved_by]);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveType {
    Sick,
    Personal,
    Vacation,
    Emergency,
    Maternity,
    Paternity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub teacher_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: LeaveType,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
}

impl LeaveRequest {
    /// Inclusive number of calendar days covered. Inverted ranges cover none.
    pub fn days(&self) -> u32 {
        if self.end_date < self.start_date {
            return 0;
        }
        let span = (self.end_date - self.start_date).num_days();
        u32::try_from(span + 1).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeaveRequest {
    pub teacher_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: LeaveType,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub applied_date: Option<NaiveDate>,
    #[serde(default)]
    pub documents: Option<Vec<String>>,
}

impl NewLeaveRequest {
    pub fn into_request(self, id: String, today: NaiveDate) -> LeaveRequest {
        LeaveRequest {
            id,
            teacher_id: self.teacher_id,
            start_date: self.start_date,
            end_date: self.end_date,
            kind: self.kind,
            reason: self.reason,
            status: LeaveStatus::Pending,
            applied_date: self.applied_date.unwrap_or(today),
            approved_by: None,
            approved_date: None,
            rejection_reason: None,
            documents: self.documents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaveRequestPatch {
    pub teacher_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Option<LeaveType>,
    pub reason: Option<String>,
    pub status: Option<LeaveStatus>,
    pub applied_date: Option<NaiveDate>,
    pub approved_by: Option<String>,
    pub approved_date: Option<NaiveDate>,
    pub rejection_reason: Option<String>,
    pub documents: Option<Vec<String>>,
}

impl LeaveRequestPatch {
    pub fn apply(self, r: &mut LeaveRequest) {
        merge_some!(
            r,
            self,
            [teacher_id, start_date, end_date, kind, reason, status, applied_date]
        );
        merge_some_opt!(r, self, [approved_by, approved_date, rejection_reason, documents]);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_teachers: usize,
    pub active_teachers: usize,
    pub attendance_rate: f64,
    pub average_salary: f64,
    pub pending_leave_requests: usize,
    pub upcoming_reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceTrend {
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub on_leave: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    pub department: String,
    pub total_salary: f64,
    pub teacher_count: usize,
    pub average_salary: f64,
}
