pub mod drug;
pub mod schedule;
