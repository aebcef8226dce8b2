pub mod announcement;
pub mod backup;
pub mod batch;
pub mod bucket;
pub mod calculator;
pub mod calendar;
pub mod claim;
pub mod complaint;
pub mod employee;
pub mod log;
pub mod payroll;
pub mod request;
pub mod schedule;
pub mod settings;
pub mod shift;
