use serde::Serialize;

use crate::analytics::{departments_in_order, mean};
use crate::model::{SalaryBreakdown, Teacher};

const HOUSING_RATE: f64 = 0.15;
const TRANSPORT_RATE: f64 = 0.08;
const MEDICAL_RATE: f64 = 0.05;
const OTHER_RATE: f64 = 0.02;

const TAX_RATE: f64 = 0.18;
const INSURANCE_RATE: f64 = 0.03;
const PROVIDENT_FUND_RATE: f64 = 0.12;

/// Rounds to whole currency units.
fn round_amount(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowances {
    pub housing: f64,
    pub transport: f64,
    pub medical: f64,
    pub other: f64,
}

impl Allowances {
    pub fn total(&self) -> f64 {
        self.housing + self.transport + self.medical + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deductions {
    pub tax: f64,
    pub insurance: f64,
    pub provident_fund: f64,
    pub other: f64,
}

impl Deductions {
    pub fn total(&self) -> f64 {
        self.tax + self.insurance + self.provident_fund + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    pub teacher_id: String,
    pub teacher_name: String,
    pub department: String,
    pub basic_salary: f64,
    pub allowances: Allowances,
    pub gross_salary: f64,
    pub deductions: Deductions,
    pub net_salary: f64,
}

pub fn payslip(teacher: &Teacher) -> Payslip {
    let basic = teacher.salary;
    let allowances = Allowances {
        housing: round_amount(basic * HOUSING_RATE),
        transport: round_amount(basic * TRANSPORT_RATE),
        medical: round_amount(basic * MEDICAL_RATE),
        other: round_amount(basic * OTHER_RATE),
    };
    let gross = basic + allowances.total();
    let deductions = Deductions {
        tax: round_amount(gross * TAX_RATE),
        insurance: round_amount(gross * INSURANCE_RATE),
        provident_fund: round_amount(basic * PROVIDENT_FUND_RATE),
        other: 0.0,
    };
    let net = gross - deductions.total();
    Payslip {
        teacher_id: teacher.id.clone(),
        teacher_name: teacher.full_name(),
        department: teacher.department.clone(),
        basic_salary: basic,
        allowances,
        gross_salary: gross,
        deductions,
        net_salary: net,
    }
}

/// Per-department salary totals in first-seen department order.
pub fn salary_breakdown(teachers: &[Teacher]) -> Vec<SalaryBreakdown> {
    departments_in_order(teachers)
        .into_iter()
        .map(|dept| {
            let salaries: Vec<f64> = teachers
                .iter()
                .filter(|t| t.department == dept)
                .map(|t| t.salary)
                .collect();
            SalaryBreakdown {
                department: dept.to_string(),
                total_salary: salaries.iter().sum(),
                teacher_count: salaries.len(),
                average_salary: mean(salaries.iter().copied()),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    pub total_budget: f64,
    pub average_salary: f64,
    pub highest_salary: f64,
    pub teacher_count: usize,
}

pub fn salary_summary(teachers: &[Teacher]) -> SalarySummary {
    SalarySummary {
        total_budget: teachers.iter().map(|t| t.salary).sum(),
        average_salary: mean(teachers.iter().map(|t| t.salary)),
        highest_salary: teachers.iter().map(|t| t.salary).fold(0.0, f64::max),
        teacher_count: teachers.len(),
    }
}
