pub mod calendar;
pub mod legend;
pub mod navigation;
pub mod today;
