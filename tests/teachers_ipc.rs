mod test_support;

use serde_json::json;
use test_support::{request_ok, spawn_sidecar, spawn_sidecar_with, temp_dir};

fn new_teacher(first: &str, last: &str, department: &str, salary: f64) -> serde_json::Value {
    json!({
        "employeeId": format!("EMP-{}", last.to_uppercase()),
        "firstName": first,
        "lastName": last,
        "email": format!("{}.{}@school.edu", first.to_lowercase(), last.to_lowercase()),
        "department": department,
        "subjects": ["Mathematics"],
        "experience": 4,
        "salary": salary,
        "employmentType": "full-time",
        "performanceRating": 4.0
    })
}

fn ids(rows: &serde_json::Value) -> Vec<String> {
    rows.as_array()
        .expect("array")
        .iter()
        .map(|t| t["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn create_update_delete_roundtrip() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar_with(&[("STAFFDESK_SEED", "0")]);

    let a = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "teachers.create",
        json!({ "teacher": new_teacher("Ada", "Lovelace", "Science", 70000.0) }),
    );
    let b = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "teachers.create",
        json!({ "teacher": new_teacher("Alan", "Turing", "Technology", 80000.0) }),
    );
    assert_eq!(a["status"], json!("active"));
    assert_ne!(a["id"], b["id"]);
    let a_id = a["id"].as_str().expect("id").to_string();

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "teachers.update",
        json!({ "id": a_id, "patch": { "salary": 72000, "status": "on-leave" } }),
    );
    assert_eq!(updated["salary"], json!(72000.0));
    assert_eq!(updated["status"], json!("on-leave"));
    assert_eq!(updated["firstName"], json!("Ada"));

    let missing = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "teachers.update",
        json!({ "id": "nope", "patch": { "salary": 1 } }),
    );
    assert!(missing.is_null());

    let stats = request_ok(&mut stdin, &mut reader, "5", "teachers.stats", json!({}));
    assert_eq!(stats["total"], json!(2));
    assert_eq!(stats["onLeave"], json!(1));

    let removed = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "teachers.delete",
        json!({ "id": a_id }),
    );
    assert_eq!(removed, json!(true));
    let again = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "teachers.delete",
        json!({ "id": a_id }),
    );
    assert_eq!(again, json!(false));
    let gone = request_ok(&mut stdin, &mut reader, "8", "teachers.get", json!({ "id": a_id }));
    assert!(gone.is_null());

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn filters_combine_and_accept_sentinels() {
    let workspace = temp_dir("staffdesk-teacher-filters");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let all = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "teachers.list",
        json!({ "filters": { "search": "", "status": "all", "employmentType": "all", "department": "" } }),
    );
    assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);

    let arts_active = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "teachers.list",
        json!({ "filters": { "department": "Arts", "status": "active" } }),
    );
    assert_eq!(ids(&arts_active), vec!["3"]);

    let search = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "teachers.list",
        json!({ "filters": { "search": "emp00" } }),
    );
    assert_eq!(ids(&search).len(), 5);

    let ranges = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "teachers.list",
        json!({ "filters": {
            "experience": { "min": 6, "max": 9 },
            "salary": { "min": 70000, "max": 75000 }
        } }),
    );
    assert_eq!(ids(&ranges), vec!["1", "4", "5"]);

    // store-held filters merge key by key
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "teachers.filters.set",
        json!({ "filters": { "department": "Science" } }),
    );
    let merged = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "teachers.filters.set",
        json!({ "filters": { "search": "chen" } }),
    );
    assert_eq!(merged["department"], json!("Science"));
    assert_eq!(merged["search"], json!("chen"));
    let visible = request_ok(&mut stdin, &mut reader, "8", "teachers.list", json!({}));
    assert_eq!(ids(&visible), vec!["2"]);

    let _ = request_ok(&mut stdin, &mut reader, "9", "teachers.filters.clear", json!({}));
    let visible = request_ok(&mut stdin, &mut reader, "10", "teachers.list", json!({}));
    assert_eq!(ids(&visible).len(), 5);

    let depts = request_ok(&mut stdin, &mut reader, "11", "teachers.departments", json!({}));
    assert_eq!(depts, json!(["Arts", "Science", "Technology"]));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn selection_is_cleared_when_teacher_is_removed() {
    let workspace = temp_dir("staffdesk-teacher-select");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let selected = request_ok(&mut stdin, &mut reader, "2", "teachers.select", json!({ "id": "2" }));
    assert_eq!(selected["lastName"], json!("Chen"));
    let _ = request_ok(&mut stdin, &mut reader, "3", "teachers.delete", json!({ "id": "2" }));
    let selected = request_ok(&mut stdin, &mut reader, "4", "teachers.select", json!({ "id": "2" }));
    assert!(selected.is_null());
    let cleared = request_ok(&mut stdin, &mut reader, "5", "teachers.select", json!({ "id": null }));
    assert!(cleared.is_null());

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn payroll_and_analytics_over_seed_roster() {
    let workspace = temp_dir("staffdesk-payroll");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let slip = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "payroll.payslip",
        json!({ "teacherId": "1" }),
    );
    assert_eq!(slip["grossSalary"], json!(97500.0));
    assert_eq!(slip["netSalary"], json!(68025.0));
    assert_eq!(slip["deductions"]["providentFund"], json!(9000.0));

    let nobody = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "payroll.payslip",
        json!({ "teacherId": "99" }),
    );
    assert!(nobody.is_null());

    let breakdown = request_ok(&mut stdin, &mut reader, "4", "payroll.breakdown", json!({}));
    assert_eq!(
        breakdown,
        json!([
            { "department": "Science", "totalSalary": 157000.0, "teacherCount": 2, "averageSalary": 78500.0 },
            { "department": "Arts", "totalSalary": 139000.0, "teacherCount": 2, "averageSalary": 69500.0 },
            { "department": "Technology", "totalSalary": 72000.0, "teacherCount": 1, "averageSalary": 72000.0 }
        ])
    );

    let overview = request_ok(&mut stdin, &mut reader, "5", "analytics.overview", json!({}));
    assert_eq!(overview["totalTeachers"], json!(5));
    assert_eq!(overview["activeTeachers"], json!(4));
    assert_eq!(overview["performanceTiers"]["excellent"], json!(2));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn seeding_can_be_switched_off() {
    let workspace = temp_dir("staffdesk-noseed");
    let (mut child, mut stdin, mut reader) = spawn_sidecar_with(&[("STAFFDESK_SEED", "0")]);
    let opened = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(opened["seeded"], json!(false));
    let all = request_ok(&mut stdin, &mut reader, "2", "teachers.list", json!({}));
    assert_eq!(all, json!([]));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
