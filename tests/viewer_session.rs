use std::sync::Arc;

use chrono::NaiveDate;
use medCalendar::handlers::web::Viewer;
use medCalendar::models::drug::DrugRegistry;
use medCalendar::service::schedule_store::ScheduleStore;
use medCalendar::views::navigation::{NavAction, View};

fn viewer(today: NaiveDate) -> Viewer {
    let store = ScheduleStore::load(
        r#"[{"date": "2025-07-11", "milestone": "Transfer",
             "medications": [{"name": "Clomid", "details": "50 mg"}]}]"#,
    )
    .unwrap();
    Viewer::new(Arc::new(store), Arc::new(DrugRegistry::builtin()), today)
}

#[tokio::test]
async fn page_follows_navigation_state() {
    let today = NaiveDate::from_ymd_opt(2025, 7, 11).unwrap();
    let viewer = viewer(today);

    let page = viewer.page(today).await;
    assert!(page.contains("Transfer"));
    assert!(page.contains("Clomid"));
    assert_eq!(viewer.active_view().await, View::Today);

    viewer.apply(NavAction::Show(View::Calendar), today).await;
    viewer.apply(NavAction::Select(Some(today)), today).await;
    assert_eq!(viewer.active_view().await, View::Calendar);
    let page = viewer.page(today).await;
    assert!(page.contains("July 2025"));
    assert!(page.contains("Friday, July 11"));
}

#[tokio::test]
async fn load_failure_is_reported_for_missing_source() {
    let err = ScheduleStore::fetch("/nonexistent/medCalendar/schedule.json")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("schedule.json"));
}
