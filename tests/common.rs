#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::Utc;
use paprika::auth;
use paprika::db::pool::DbPool;
use paprika::db::profiles::NewProfile;
use paprika::models::{Profile, Role};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const MANAGER_EMAIL: &str = "boss@paprika.test";
pub const MANAGER_PASSWORD: &str = "paprika-boss";

pub fn pap() -> Command {
    cargo_bin_cmd!("paprika")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file, including its stored session.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_paprika.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{db_path}.session")).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` with a first manager, then sign that manager in.
pub fn init_with_manager(db_path: &str) {
    pap()
        .args([
            "--db",
            db_path,
            "--test",
            "init",
            "--admin-email",
            MANAGER_EMAIL,
            "--admin-password",
            MANAGER_PASSWORD,
            "--admin-name",
            "Rosa Boss",
        ])
        .assert()
        .success();

    login(db_path, MANAGER_EMAIL, MANAGER_PASSWORD);
}

pub fn login(db_path: &str, email: &str, password: &str) {
    pap()
        .args([
            "--db", db_path, "--test", "login", "--email", email, "--password", password,
        ])
        .assert()
        .success();
}

/// Adds an employee through the CLI as the signed-in manager.
pub fn add_employee(db_path: &str, email: &str, name: &str, wage: &str) {
    pap()
        .args([
            "--db",
            db_path,
            "--test",
            "employee",
            "add",
            "--email",
            email,
            "--password",
            "secret1",
            "--name",
            name,
            "--wage",
            wage,
        ])
        .assert()
        .success();
}

/// Library-level fixture: a migrated database file with one profile per role.
pub fn open_with_staff(name: &str) -> (String, Profile, Profile) {
    let db_path = setup_test_db(name);
    let pool = DbPool::open(&db_path).expect("open db");

    let manager = register(&pool, MANAGER_EMAIL, "Rosa Boss", Role::Manager, 0.0);
    let employee = register(&pool, "ana@paprika.test", "Ana Cook", Role::Employee, 15.0);
    (db_path, manager, employee)
}

pub fn register(pool: &DbPool, email: &str, name: &str, role: Role, wage: f64) -> Profile {
    let new = NewProfile {
        email: email.to_string(),
        full_name: name.to_string(),
        role,
        hourly_wage: wage,
    };
    let id = auth::register(&pool.conn, &new, "secret1", 6).expect("register");
    paprika::db::profiles::require_by_id(&pool.conn, id).expect("profile")
}

/// Signs in and returns a ready `Authorization` value.
pub fn bearer_for(pool: &DbPool, email: &str) -> String {
    let session = auth::sign_in(&pool.conn, email, "secret1", Utc::now()).expect("sign in");
    format!("Bearer {}", session.token)
}
