use medCalendar::error::LoadError;
use medCalendar::service::schedule_store::ScheduleStore;

#[tokio::test]
async fn fetches_schedule_from_local_file() {
    let path = std::env::temp_dir().join(format!("medCalendar-schedule-{}.json", std::process::id()));
    tokio::fs::write(
        &path,
        r#"[{"date": "2025-07-11", "milestone": null, "appointments": null,
             "medications": [{"name": "Ganirelix", "details": "250 mcg"}]}]"#,
    )
    .await
    .unwrap();

    let store = ScheduleStore::fetch(path.to_str().unwrap()).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(store.len(), 1);
    let day = store.find("2025-07-11").unwrap();
    assert!(day.appointments.is_empty());
    assert!(day.has_events());
}

#[tokio::test]
async fn malformed_file_is_a_parse_error() {
    let path = std::env::temp_dir().join(format!("medCalendar-bad-{}.json", std::process::id()));
    tokio::fs::write(&path, "{\"date\": ").await.unwrap();

    let result = ScheduleStore::fetch(path.to_str().unwrap()).await;
    tokio::fs::remove_file(&path).await.unwrap();

    assert!(matches!(result, Err(LoadError::Parse(_))));
}
