use serde::Serialize;

use crate::model::Teacher;

/// Arithmetic mean, or 0 for an empty input.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut n: usize = 0;
    let mut sum: f64 = 0.0;
    for v in values {
        n += 1;
        sum += v;
    }
    if n > 0 {
        sum / (n as f64)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterAverages {
    pub salary: f64,
    pub experience: f64,
    pub performance: f64,
}

pub fn averages(teachers: &[Teacher]) -> RosterAverages {
    RosterAverages {
        salary: mean(teachers.iter().map(|t| t.salary)),
        experience: mean(teachers.iter().map(|t| t.experience_years)),
        performance: mean(teachers.iter().map(|t| t.performance_rating)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAnalytics {
    pub department: String,
    pub count: usize,
    pub avg_salary: f64,
    pub avg_experience: f64,
    pub avg_performance: f64,
}

/// Departments in the order they first appear on the roster.
pub fn departments_in_order(teachers: &[Teacher]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for t in teachers {
        if !out.contains(&t.department.as_str()) {
            out.push(t.department.as_str());
        }
    }
    out
}

pub fn department_analytics(teachers: &[Teacher]) -> Vec<DepartmentAnalytics> {
    departments_in_order(teachers)
        .into_iter()
        .map(|dept| {
            let members: Vec<&Teacher> =
                teachers.iter().filter(|t| t.department == dept).collect();
            DepartmentAnalytics {
                department: dept.to_string(),
                count: members.len(),
                avg_salary: mean(members.iter().map(|t| t.salary)),
                avg_experience: mean(members.iter().map(|t| t.experience_years)),
                avg_performance: mean(members.iter().map(|t| t.performance_rating)),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub range: &'static str,
    pub count: usize,
}

pub fn experience_distribution(teachers: &[Teacher]) -> Vec<Band> {
    let count = |pred: &dyn Fn(f64) -> bool| {
        teachers
            .iter()
            .filter(|t| pred(t.experience_years))
            .count()
    };
    vec![
        Band {
            range: "0-2 years",
            count: count(&|y: f64| y <= 2.0),
        },
        Band {
            range: "3-5 years",
            count: count(&|y: f64| (3.0..=5.0).contains(&y)),
        },
        Band {
            range: "6-10 years",
            count: count(&|y: f64| (6.0..=10.0).contains(&y)),
        },
        Band {
            range: "10+ years",
            count: count(&|y: f64| y > 10.0),
        },
    ]
}

pub fn salary_distribution(teachers: &[Teacher]) -> Vec<Band> {
    let count = |lo: f64, hi: f64| {
        teachers
            .iter()
            .filter(|t| t.salary >= lo && t.salary < hi)
            .count()
    };
    vec![
        Band {
            range: "<$60K",
            count: count(f64::NEG_INFINITY, 60000.0),
        },
        Band {
            range: "$60K-$70K",
            count: count(60000.0, 70000.0),
        },
        Band {
            range: "$70K-$80K",
            count: count(70000.0, 80000.0),
        },
        Band {
            range: "$80K+",
            count: count(80000.0, f64::INFINITY),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceTier {
    pub fn of(rating: f64) -> Self {
        if rating >= 4.5 {
            PerformanceTier::Excellent
        } else if rating >= 4.0 {
            PerformanceTier::Good
        } else {
            PerformanceTier::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTiers {
    pub excellent: usize,
    pub good: usize,
    pub needs_improvement: usize,
}

pub fn performance_tiers(teachers: &[Teacher]) -> PerformanceTiers {
    let mut out = PerformanceTiers::default();
    for t in teachers {
        match PerformanceTier::of(t.performance_rating) {
            PerformanceTier::Excellent => out.excellent += 1,
            PerformanceTier::Good => out.good += 1,
            PerformanceTier::NeedsImprovement => out.needs_improvement += 1,
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_teachers: usize,
    pub active_teachers: usize,
    pub averages: RosterAverages,
    pub departments: Vec<DepartmentAnalytics>,
    pub experience_distribution: Vec<Band>,
    pub salary_distribution: Vec<Band>,
    pub performance_tiers: PerformanceTiers,
}

pub fn overview(teachers: &[Teacher]) -> Overview {
    Overview {
        total_teachers: teachers.len(),
        active_teachers: teachers
            .iter()
            .filter(|t| t.status == crate::model::TeacherStatus::Active)
            .count(),
        averages: averages(teachers),
        departments: department_analytics(teachers),
        experience_distribution: experience_distribution(teachers),
        salary_distribution: salary_distribution(teachers),
        performance_tiers: performance_tiers(teachers),
    }
}
