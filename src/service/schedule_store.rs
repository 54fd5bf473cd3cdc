use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::LoadError;
use crate::models::schedule::DayRecord;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The loaded schedule. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    days: Vec<DayRecord>,
}

impl ScheduleStore {
    /// Parses a JSON array of day records.
    pub fn load(json_text: &str) -> Result<Self, LoadError> {
        let days: Vec<DayRecord> = serde_json::from_str(json_text)?;
        Self::from_records(days)
    }

    pub fn from_records(days: Vec<DayRecord>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for day in &days {
            if !seen.insert(day.date.as_str()) {
                return Err(LoadError::DuplicateDate(day.date.clone()));
            }
        }
        Ok(Self { days })
    }

    /// Loads the schedule from an `http(s)://` URL or a local file path.
    pub async fn fetch(source: &str) -> Result<Self, LoadError> {
        let body = if source.starts_with("http://") || source.starts_with("https://") {
            let response = reqwest::get(source).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status(status.to_string()));
            }
            response.text().await?
        } else {
            tokio::fs::read_to_string(source)
                .await
                .map_err(|source_err| LoadError::Io {
                    path: source.to_string(),
                    source: source_err,
                })?
        };
        let store = Self::load(&body)?;
        tracing::info!(source, days = store.len(), "Loaded schedule");
        Ok(store)
    }

    /// Exact string match on the record's date key.
    pub fn find(&self, date: &str) -> Option<&DayRecord> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn find_date(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.find(&date.format(DATE_FORMAT).to_string())
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"date": "2024-03-05", "medications": [{"name": "Clomid", "details": "1 tablet"}]},
        {"date": "2024-03-06", "milestone": "Baseline scan"}
    ]"#;

    #[test]
    fn find_matches_exact_date_string() {
        let store = ScheduleStore::load(SAMPLE).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find("2024-03-05").unwrap().medications[0].name, "Clomid");
        assert!(store.find("2024-3-5").is_none());
        assert!(store.find("2024-03-07").is_none());
    }

    #[test]
    fn find_date_formats_with_zero_padding() {
        let store = ScheduleStore::load(SAMPLE).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(
            store.find_date(date).and_then(|d| d.milestone.as_deref()),
            Some("Baseline scan")
        );
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = ScheduleStore::load("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        let err = ScheduleStore::load(r#"{"date": "2024-03-05"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let err = ScheduleStore::load(r#"[{"date":"2024-03-05"},{"date":"2024-03-05"}]"#)
            .unwrap_err();
        match err {
            LoadError::DuplicateDate(date) => assert_eq!(date, "2024-03-05"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_missing_file_is_io_error() {
        let err = ScheduleStore::fetch("./definitely/not/here/schedule.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("definitely/not/here"));
    }
}
