pub mod budget;
pub mod duration;
pub mod payroll;
