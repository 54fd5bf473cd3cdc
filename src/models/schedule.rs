use serde::{Deserialize, Deserializer, Serialize};

/// One day of the schedule, keyed by its `YYYY-MM-DD` date string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub appointments: Vec<Appointment>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medications: Vec<Medication>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Appointment {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub what: String,
    #[serde(rename = "where", default)]
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub is_stop: bool,
    #[serde(default)]
    pub is_trigger: bool,
}

impl DayRecord {
    /// The milestone text, if it holds anything besides whitespace.
    pub fn milestone_text(&self) -> Option<&str> {
        self.milestone
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// A day has events when it carries a non-blank milestone, an appointment
    /// or a medication. Every view and reminder uses this one rule.
    pub fn has_events(&self) -> bool {
        self.milestone_text().is_some()
            || !self.appointments.is_empty()
            || !self.medications.is_empty()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
