use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add_employee, init_with_manager, login, pap, setup_test_db, temp_out};

#[test]
fn init_creates_first_manager_once() {
    let db_path = setup_test_db("cli_init_manager");

    init_with_manager(&db_path);

    pap()
        .args(["--db", &db_path, "--test", "whoami"])
        .assert()
        .success()
        .stdout(contains("Rosa Boss <boss@paprika.test>"))
        .stdout(contains("manager"));

    pap()
        .args([
            "--db",
            &db_path,
            "--test",
            "init",
            "--admin-email",
            "other@paprika.test",
            "--admin-password",
            "another-one",
            "--admin-name",
            "Other",
        ])
        .assert()
        .success()
        .stdout(contains("Profiles already exist"));
}

#[test]
fn commands_need_a_session() {
    let db_path = setup_test_db("cli_no_session");

    pap()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pap()
        .args(["--db", &db_path, "--test", "shift", "list"])
        .assert()
        .failure()
        .stderr(contains("Please log in first"));

    pap()
        .args(["--db", &db_path, "--test", "--token", "bogus", "whoami"])
        .assert()
        .failure()
        .stderr(contains("Session is invalid or has expired"));
}

#[test]
fn wrong_password_is_rejected() {
    let db_path = setup_test_db("cli_wrong_password");
    init_with_manager(&db_path);

    pap()
        .args([
            "--db",
            &db_path,
            "--test",
            "login",
            "--email",
            "boss@paprika.test",
            "--password",
            "guess",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid email or password"));
}

#[test]
fn open_shift_is_claimed_once() {
    let db_path = setup_test_db("cli_claim_flow");
    init_with_manager(&db_path);
    add_employee(&db_path, "ana@paprika.test", "Ana Cook", "15");

    pap()
        .args([
            "--db", &db_path, "--test", "shift", "add", "2030-05-04", "--start", "17:00", "--end",
            "23:00", "--role", "delivery",
        ])
        .assert()
        .success()
        .stdout(contains("Open shift 1 added for 2030-05-04"));

    login(&db_path, "ana@paprika.test", "secret1");

    pap()
        .args(["--db", &db_path, "--test", "shift", "open", "--from", "2030-05-01"])
        .assert()
        .success()
        .stdout(contains("2030-05-04"))
        .stdout(contains("OPEN"));

    pap()
        .args(["--db", &db_path, "--test", "shift", "claim", "1"])
        .assert()
        .success()
        .stdout(contains("Shift 1 claimed: 2030-05-04 17:00-23:00"));

    pap()
        .args(["--db", &db_path, "--test", "shift", "claim", "1"])
        .assert()
        .failure()
        .stderr(contains("already claimed"));

    pap()
        .args(["--db", &db_path, "--test", "shift", "open", "--from", "2030-05-01"])
        .assert()
        .success()
        .stdout(contains("No open shifts."));
}

#[test]
fn employees_cannot_manage_shifts() {
    let db_path = setup_test_db("cli_employee_forbidden");
    init_with_manager(&db_path);
    add_employee(&db_path, "ana@paprika.test", "Ana Cook", "15");
    login(&db_path, "ana@paprika.test", "secret1");

    pap()
        .args([
            "--db", &db_path, "--test", "shift", "add", "2030-05-04", "--start", "09:00", "--end",
            "17:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Only managers can create shifts"));

    pap()
        .args([
            "--db", &db_path, "--test", "employee", "add", "--email", "x@paprika.test",
            "--password", "secret1", "--name", "X", "--wage", "10",
        ])
        .assert()
        .failure()
        .stderr(contains("403"));
}

#[test]
fn bulk_create_then_partial_bulk_delete() {
    let db_path = setup_test_db("cli_bulk_shifts");
    init_with_manager(&db_path);
    add_employee(&db_path, "ana@paprika.test", "Ana Cook", "15");

    // 2030-06-03 is a Monday: two Mondays and two Wednesdays in range
    pap()
        .args([
            "--db",
            &db_path,
            "--test",
            "shift",
            "bulk-create",
            "--from",
            "2030-06-03",
            "--to",
            "2030-06-12",
            "--weekdays",
            "mon,wed",
            "--assign",
            "2,09:00,17:00,kitchen",
        ])
        .assert()
        .success()
        .stdout(contains("4 shifts created"));

    pap()
        .args(["--db", &db_path, "--test", "shift", "bulk-delete", "1", "2", "99"])
        .assert()
        .success()
        .stdout(contains("2 of 3 applied, 1 failed"))
        .stdout(contains("#99"));

    pap()
        .args(["--db", &db_path, "--test", "shift", "list", "--range", "2030-06"])
        .assert()
        .success()
        .stdout(contains("2030-06-10"))
        .stdout(contains("2030-06-12"))
        .stdout(contains("2030-06-03").not());
}

#[test]
fn day_payroll_reports_over_budget() {
    let db_path = setup_test_db("cli_payroll_budget");
    init_with_manager(&db_path);
    add_employee(&db_path, "ana@paprika.test", "Ana Cook", "15");

    pap()
        .args([
            "--db", &db_path, "--test", "shift", "add", "2030-07-01", "--start", "09:00", "--end",
            "17:00", "--employee", "2",
        ])
        .assert()
        .success();

    pap()
        .args(["--db", &db_path, "--test", "settings", "--daily-limit", "100"])
        .assert()
        .success();

    pap()
        .args(["--db", &db_path, "--test", "payroll", "--date", "2030-07-01"])
        .assert()
        .success()
        .stdout(contains("Ana Cook"))
        .stdout(contains("TOTAL"))
        .stdout(contains("Over budget by €20.00"));

    pap()
        .args(["--db", &db_path, "--test", "payroll", "--range", "2030-07"])
        .assert()
        .success()
        .stdout(contains("TOTAL"))
        .stdout(contains("budget").not());
}

#[test]
fn payroll_and_calendar_exports_are_written() {
    let db_path = setup_test_db("cli_exports");
    init_with_manager(&db_path);
    add_employee(&db_path, "ana@paprika.test", "Ana Cook", "15");

    pap()
        .args([
            "--db", &db_path, "--test", "shift", "add", "2030-07-01", "--start", "09:00", "--end",
            "17:00", "--employee", "2",
        ])
        .assert()
        .success();

    let csv = temp_out("cli_exports_payroll", "csv");
    pap()
        .args([
            "--db", &db_path, "--test", "export", "payroll", "--format", "csv", "--file", &csv,
            "--range", "2030-07",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));
    let content = fs::read_to_string(&csv).unwrap();
    assert!(content.contains("Ana Cook"));

    let ics = temp_out("cli_exports_calendar", "ics");
    pap()
        .args([
            "--db", &db_path, "--test", "export", "ics", "--employee", "2", "--file", &ics,
        ])
        .assert()
        .success();
    let content = fs::read_to_string(&ics).unwrap();
    assert!(content.contains("SUMMARY:Work: Kitchen"));

    let pdf = temp_out("cli_exports_schedule", "pdf");
    pap()
        .args([
            "--db", &db_path, "--test", "export", "schedule", "--file", &pdf, "--range",
            "2030-07",
        ])
        .assert()
        .success();
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));

    pap()
        .args([
            "--db", &db_path, "--test", "export", "payroll", "--file", "relative.csv",
        ])
        .assert()
        .failure();
}

#[test]
fn dashboard_views_render() {
    pap()
        .args(["--test", "dashboard", "manager"])
        .assert()
        .success()
        .stdout(contains("Manager Dashboard"))
        .stdout(contains("Checklists today"));

    pap()
        .args([
            "--test",
            "dashboard",
            "manager",
            "--detail",
            "checklist-emp-2-fridge-temps",
        ])
        .assert()
        .success()
        .stdout(contains("Checklist detail"));

    pap()
        .args(["--test", "dashboard", "oil"])
        .assert()
        .success()
        .stdout(contains("Oil Change Tracker"));

    pap()
        .args([
            "--test",
            "dashboard",
            "worker",
            "--employee",
            "emp-2",
            "--set",
            "checklist-emp-2-fridge-temps/task-2=4.5",
            "--summary",
        ])
        .assert()
        .success()
        .stdout(contains("Worker Checklists"))
        .stdout(contains("End of day summary"));

    pap()
        .args(["--test", "dashboard", "worker", "--set", "no-equals-sign"])
        .assert()
        .failure();
}
