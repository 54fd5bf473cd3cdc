use chrono::NaiveDate;

use crate::models::drug::DrugRegistry;
use crate::service::day_content::{render_day, DayContent};
use crate::service::schedule_store::ScheduleStore;

/// "Tuesday, March 5"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    pub date: NaiveDate,
    pub heading: String,
    pub content: DayContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayView {
    pub today: DaySection,
    pub tomorrow: DaySection,
}

impl TodayView {
    /// `today` is the local calendar day, not the UTC one; callers pass
    /// `Local::now().date_naive()`.
    pub fn build(store: &ScheduleStore, registry: &DrugRegistry, today: NaiveDate) -> Self {
        let tomorrow = today.succ_opt().unwrap_or(today);
        Self {
            today: DaySection {
                date: today,
                heading: long_date(today),
                content: render_day(store.find_date(today), registry),
            },
            tomorrow: DaySection {
                date: tomorrow,
                heading: format!("Tomorrow — {}", long_date(tomorrow)),
                content: render_day(store.find_date(tomorrow), registry),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_today_and_tomorrow() {
        let store = ScheduleStore::load(
            r#"[{"date":"2024-03-05","medications":[{"name":"Clomid","details":"1 tablet"}]}]"#,
        )
        .unwrap();
        let view = TodayView::build(&store, &DrugRegistry::builtin(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(view.today.heading, "Tuesday, March 5");
        assert!(!view.today.content.is_placeholder());
        assert_eq!(view.tomorrow.heading, "Tomorrow — Wednesday, March 6");
        assert!(view.tomorrow.content.is_placeholder());
    }

    #[test]
    fn tomorrow_crosses_year_boundary() {
        let view = TodayView::build(
            &ScheduleStore::default(),
            &DrugRegistry::builtin(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        assert_eq!(view.tomorrow.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
