use chrono::NaiveDate;
use medCalendar::models::drug::DrugRegistry;
use medCalendar::service::day_content::DayContent;
use medCalendar::service::schedule_store::ScheduleStore;
use medCalendar::views::calendar::{CalendarGrid, DetailPanel};
use medCalendar::views::navigation::{NavAction, Navigator, View};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store() -> ScheduleStore {
    ScheduleStore::load(
        r#"[
            {"date": "2025-07-11", "milestone": "Retrieval",
             "appointments": [{"time": "7:30 AM", "what": "Egg retrieval", "where": "Clinic"}],
             "medications": [{"name": "Doxycycline", "details": "100 mg", "is_stop": true}]},
            {"date": "2025-07-12", "milestone": "  ", "appointments": [], "medications": []},
            {"date": "2025-08-01", "medications": [{"name": "Progesterone", "details": "50 mg", "is_start": true}]}
        ]"#,
    )
    .unwrap()
}

#[test]
fn browsing_months_and_selecting_days() {
    let store = store();
    let registry = DrugRegistry::builtin();
    let today = date(2025, 7, 10);
    let mut nav = Navigator::new(today);

    assert_eq!(nav.active(), View::Today);
    nav.apply(NavAction::Show(View::Calendar), today, &store, &registry);
    assert_eq!(nav.active(), View::Calendar);
    assert_eq!(nav.detail(), &DetailPanel::Placeholder);

    nav.apply(NavAction::Select(Some(date(2025, 7, 11))), today, &store, &registry);
    assert_eq!(nav.calendar().selected(), Some(date(2025, 7, 11)));
    let DetailPanel::Day { heading, content, .. } = nav.detail() else {
        panic!("expected day details");
    };
    assert_eq!(heading, "Friday, July 11");
    assert!(matches!(content, DayContent::Sections { .. }));

    let grid = CalendarGrid::build(&store, &registry, nav.calendar(), today);
    let flagged: Vec<u32> = grid.day_cells().filter(|cell| cell.has_events).map(|cell| cell.day).collect();
    assert_eq!(flagged, vec![11]);

    nav.apply(NavAction::NextMonth, today, &store, &registry);
    assert_eq!((nav.calendar().year(), nav.calendar().month()), (2025, 8));
    assert_eq!(nav.calendar().selected(), None);
    assert_eq!(nav.detail(), &DetailPanel::Placeholder);

    nav.apply(NavAction::GoToToday, today, &store, &registry);
    assert_eq!((nav.calendar().year(), nav.calendar().month()), (2025, 7));
    let DetailPanel::Day { content, .. } = nav.detail() else {
        panic!("today should show a details panel");
    };
    assert!(content.is_placeholder());
}

#[test]
fn blank_day_is_not_selectable_and_leaving_calendar_resets() {
    let store = store();
    let registry = DrugRegistry::builtin();
    let today = date(2025, 7, 10);
    let mut nav = Navigator::new(today);
    nav.apply(NavAction::Show(View::Calendar), today, &store, &registry);

    nav.apply(NavAction::Select(Some(date(2025, 7, 12))), today, &store, &registry);
    assert_eq!(nav.calendar().selected(), None);

    nav.apply(NavAction::Select(Some(date(2025, 7, 11))), today, &store, &registry);
    nav.apply(NavAction::Show(View::Legend), today, &store, &registry);
    assert_eq!(nav.calendar().selected(), None);
    assert_eq!(nav.detail(), &DetailPanel::Placeholder);
}
