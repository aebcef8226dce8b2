use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use paprika::config::Config;
use paprika::core::calculator::budget::BudgetStatus;
use paprika::core::calculator::duration::OvernightPolicy;
use paprika::core::claim::ClaimLogic;
use paprika::core::calendar::ViewMode;
use paprika::core::payroll::{PayrollLogic, PayrollPeriod};
use paprika::core::request::{PAYROLL_LOAD, RequestTracker, SCHEDULE_LOAD};
use paprika::core::schedule::ScheduleLogic;
use paprika::core::settings::SettingsLogic;
use paprika::core::shift::ShiftLogic;
use paprika::db::pool::DbPool;
use paprika::db::schedules;
use paprika::errors::AppError;
use paprika::export::ExportLogic;
use paprika::functions::{FunctionContext, create_employee, remove_employee, update_employee};
use paprika::models::{NewShift, Role, ShiftRole};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

mod common;
use common::{bearer_for, open_with_staff, register, temp_out};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn new_shift(emp: Option<i64>, date: NaiveDate, start: NaiveTime, end: NaiveTime, by: i64) -> NewShift {
    NewShift {
        employee_id: emp,
        date,
        start_time: start,
        end_time: end,
        role: ShiftRole::Kitchen,
        notes: String::new(),
        created_by: by,
    }
}

fn ctx(today: NaiveDate) -> FunctionContext {
    FunctionContext {
        now: Utc::now(),
        today,
        min_password_length: 6,
    }
}

#[test]
fn concurrent_claims_have_exactly_one_winner() {
    let (db_path, manager, ana) = open_with_staff("concurrent_claims");
    let pool = DbPool::open(&db_path).unwrap();
    let ben = register(&pool, "ben@paprika.test", "Ben Runner", Role::Employee, 13.0);

    let shift_id = ShiftLogic::add(
        &pool.conn,
        &manager,
        &new_shift(None, d(2030, 5, 4), t(17, 0), t(23, 0), manager.id),
    )
    .unwrap();
    drop(pool);

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = [ana, ben]
        .into_iter()
        .map(|claimant| {
            let path = db_path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let pool = DbPool::new(&path).unwrap();
                barrier.wait();
                ClaimLogic::claim(&pool.conn, shift_id, &claimant).map(|s| s.employee_id)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(AppError::AlreadyClaimed(id)) if *id == shift_id))
    );

    let pool = DbPool::new(&db_path).unwrap();
    let stored = schedules::require_shift(&pool.conn, shift_id).unwrap();
    assert_eq!(Some(stored.employee_id), winners.first().map(|w| **w));
}

#[test]
fn managers_cannot_claim_and_unknown_shift_is_not_found() {
    let (db_path, manager, ana) = open_with_staff("claim_rules");
    let pool = DbPool::open(&db_path).unwrap();

    let id = ShiftLogic::add(
        &pool.conn,
        &manager,
        &new_shift(None, d(2030, 5, 5), t(9, 0), t(15, 0), manager.id),
    )
    .unwrap();

    assert!(matches!(
        ClaimLogic::claim(&pool.conn, id, &manager),
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        ClaimLogic::claim(&pool.conn, 9999, &ana),
        Err(AppError::NotFound(_))
    ));
    assert!(ClaimLogic::claim(&pool.conn, id, &ana).is_ok());
    assert!(matches!(
        ClaimLogic::claim(&pool.conn, id, &ana),
        Err(AppError::AlreadyClaimed(_))
    ));
}

#[test]
fn bulk_delete_keeps_going_past_missing_shifts() {
    let (db_path, manager, ana) = open_with_staff("bulk_delete_partial");
    let pool = DbPool::open(&db_path).unwrap();

    let mut ids = Vec::new();
    for day in 1..=3 {
        ids.push(
            ShiftLogic::add(
                &pool.conn,
                &manager,
                &new_shift(Some(ana.id), d(2030, 6, day), t(9, 0), t(17, 0), manager.id),
            )
            .unwrap(),
        );
    }
    ids.insert(1, 4242);
    ids.push(4343);

    let report = ShiftLogic::bulk_delete(&pool.conn, &manager, &ids).unwrap();

    assert_eq!(report.attempted, 5);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed(), 2);
    assert_eq!(
        report.failures.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
        vec![4242, 4343]
    );
    assert!(
        schedules::list_range(&pool.conn, d(2030, 6, 1), d(2030, 6, 30))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn employee_functions_answer_with_status_codes() {
    let (db_path, _manager, _ana) = open_with_staff("function_statuses");
    let pool = DbPool::open(&db_path).unwrap();
    let ctx = ctx(d(2030, 1, 1));

    let body = r#"{"email":"cleo@paprika.test","full_name":"Cleo Dish","role":"employee","password":"secret1","hourly_wage":"14.5"}"#;

    let r = create_employee(&pool.conn, None, body, &ctx);
    assert_eq!(r.status, 401);

    let r = create_employee(&pool.conn, Some("Bearer nope"), body, &ctx);
    assert_eq!(r.status, 401);

    let employee_auth = bearer_for(&pool, "ana@paprika.test");
    let r = create_employee(&pool.conn, Some(&employee_auth), body, &ctx);
    assert_eq!(r.status, 403);

    let manager_auth = bearer_for(&pool, common::MANAGER_EMAIL);
    let r = create_employee(&pool.conn, Some(&manager_auth), r#"{"email":"x@paprika.test"}"#, &ctx);
    assert_eq!(r.status, 400);
    assert!(r.error_message().unwrap().contains("Missing required fields"));

    let r = create_employee(&pool.conn, Some(&manager_auth), body, &ctx);
    assert_eq!(r.status, 200);
    assert_eq!(r.body["user"]["hourly_wage"], 14.5);
    let cleo_id = r.body["user"]["id"].as_i64().unwrap();

    let r = create_employee(&pool.conn, Some(&manager_auth), body, &ctx);
    assert_eq!(r.status, 400);

    let update = format!(r#"{{"employee_id":{cleo_id},"hourly_wage":16}}"#);
    let r = update_employee(&pool.conn, Some(&manager_auth), &update, &ctx);
    assert_eq!(r.status, 200);

    let r = update_employee(&pool.conn, Some(&manager_auth), r#"{"employee_id":777,"hourly_wage":16}"#, &ctx);
    assert_eq!(r.status, 404);
}

#[test]
fn removing_an_employee_drops_shifts_from_today_on() {
    let (db_path, manager, ana) = open_with_staff("remove_employee");
    let pool = DbPool::open(&db_path).unwrap();
    let today = d(2030, 3, 10);

    for date in [d(2030, 3, 9), today, d(2030, 3, 11)] {
        ShiftLogic::add(
            &pool.conn,
            &manager,
            &new_shift(Some(ana.id), date, t(9, 0), t(17, 0), manager.id),
        )
        .unwrap();
    }

    let auth = bearer_for(&pool, common::MANAGER_EMAIL);
    let body = format!(r#"{{"employee_id":{}}}"#, ana.id);

    let r = remove_employee(&pool.conn, Some(&auth), &body, &ctx(today));
    assert_eq!(r.status, 200);
    assert_eq!(r.body["removed_shifts"], 2);

    let left = schedules::list_for_employee(&pool.conn, ana.id, d(2030, 1, 1), d(2030, 12, 31)).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].date, d(2030, 3, 9));

    let r = remove_employee(&pool.conn, Some(&auth), &body, &ctx(today));
    assert_eq!(r.status, 400);

    let r = remove_employee(&pool.conn, Some(&auth), r#"{"employee_id":31337}"#, &ctx(today));
    assert_eq!(r.status, 404);
}

#[test]
fn daily_payroll_is_compared_with_the_limit() {
    let (db_path, manager, ana) = open_with_staff("payroll_budget");
    let pool = DbPool::open(&db_path).unwrap();
    let day = d(2030, 7, 1);

    // 8h at 15.00 plus an open shift that is not paid
    ShiftLogic::add(&pool.conn, &manager, &new_shift(Some(ana.id), day, t(9, 0), t(17, 0), manager.id)).unwrap();
    ShiftLogic::add(&pool.conn, &manager, &new_shift(None, day, t(12, 0), t(16, 0), manager.id)).unwrap();

    let report = PayrollLogic::report(&pool.conn, &manager, PayrollPeriod::Day(day), OvernightPolicy::Rollover).unwrap();
    assert_eq!(report.summary.total_pay, 120.0);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.budget, Some(BudgetStatus::NoLimit));

    SettingsLogic::set_daily_limit(&pool.conn, &manager, 100.0).unwrap();
    let report = PayrollLogic::report(&pool.conn, &manager, PayrollPeriod::Day(day), OvernightPolicy::Rollover).unwrap();
    assert!(report.budget.as_ref().unwrap().is_over());

    let range = PayrollLogic::report(
        &pool.conn,
        &manager,
        PayrollPeriod::Range(day, day + Duration::days(6)),
        OvernightPolicy::Rollover,
    )
    .unwrap();
    assert!(range.budget.is_none());

    assert!(matches!(
        PayrollLogic::report(&pool.conn, &ana, PayrollPeriod::Day(day), OvernightPolicy::Rollover),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn ics_export_writes_one_event_per_shift() {
    let (db_path, manager, ana) = open_with_staff("ics_export");
    let pool = DbPool::open(&db_path).unwrap();
    let cfg = Config::with_database(db_path.clone());

    ShiftLogic::add(&pool.conn, &manager, &new_shift(Some(ana.id), d(2030, 8, 1), t(9, 0), t(17, 0), manager.id)).unwrap();
    ShiftLogic::add(&pool.conn, &manager, &new_shift(Some(ana.id), d(2030, 8, 2), t(22, 0), t(2, 0), manager.id)).unwrap();

    let out = temp_out("ics_export", "ics");
    let n = ExportLogic::export_ics(&pool.conn, &ana, &cfg, None, &out, None, true, Utc::now()).unwrap();
    assert_eq!(n, 2);

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("BEGIN:VCALENDAR\r\n"));
    assert_eq!(content.matches("BEGIN:VEVENT").count(), 2);
    assert!(content.contains("DTEND;TZID=Europe/Amsterdam:20300803T020000"));

    // another employee's calendar is for managers only
    assert!(matches!(
        ExportLogic::export_ics(&pool.conn, &ana, &cfg, Some(manager.id), &out, None, true, Utc::now()),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn superseded_loads_are_dropped() {
    let (db_path, manager, ana) = open_with_staff("superseded_loads");
    let pool = DbPool::open(&db_path).unwrap();
    let day = d(2030, 9, 2);
    ShiftLogic::add(&pool.conn, &manager, &new_shift(Some(ana.id), day, t(9, 0), t(17, 0), manager.id)).unwrap();

    let mut tracker = RequestTracker::new();
    let policy = OvernightPolicy::Rollover;

    let first = tracker.begin(PAYROLL_LOAD);
    let second = tracker.begin(PAYROLL_LOAD);

    let old = PayrollLogic::report_latest(&pool.conn, &manager, PayrollPeriod::Day(day), policy, &first, &tracker).unwrap();
    assert!(old.is_none());
    let new = PayrollLogic::report_latest(&pool.conn, &manager, PayrollPeriod::Day(day), policy, &second, &tracker).unwrap();
    assert_eq!(new.unwrap().summary.total_pay, 120.0);

    // a schedule load is not superseded by payroll loads
    let week = tracker.begin(SCHEDULE_LOAD);
    let _ = tracker.begin(PAYROLL_LOAD);
    let month = tracker.begin(SCHEDULE_LOAD);

    let stale = ScheduleLogic::load(&pool.conn, &manager, day, ViewMode::Week, None, &week, &tracker).unwrap();
    assert!(stale.is_none());
    let view = ScheduleLogic::load(&pool.conn, &manager, day, ViewMode::Month, None, &month, &tracker)
        .unwrap()
        .unwrap();
    assert_eq!(view.shifts.len(), 1);
}
