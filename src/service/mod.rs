pub mod day_content;
pub mod reminder_content;
pub mod schedule_store;
