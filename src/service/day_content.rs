use crate::models::drug::DrugRegistry;
use crate::models::schedule::DayRecord;

pub const NO_ITEMS_TEXT: &str = "No scheduled items for this day.";
pub const APPOINTMENT_ICON: &str = "📅";

/// Toolkit-independent description of what a day shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayContent {
    Placeholder,
    Sections {
        milestone: Option<String>,
        appointments: Vec<AppointmentItem>,
        medications: Vec<MedicationItem>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentItem {
    pub time: String,
    pub what: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationItem {
    pub name: String,
    pub details: String,
    pub color: String,
    pub icon: String,
    pub video_url: Option<String>,
    pub is_start: bool,
    pub is_stop: bool,
    pub is_trigger: bool,
}

impl MedicationItem {
    /// Styling classes; the three flags are independent and may all apply.
    pub fn css_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["med-item"];
        if self.is_start {
            classes.push("is-start");
        }
        if self.is_stop {
            classes.push("is-stop");
        }
        if self.is_trigger {
            classes.push("is-trigger");
        }
        classes
    }
}

impl DayContent {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, DayContent::Placeholder)
    }
}

pub fn render_day(record: Option<&DayRecord>, registry: &DrugRegistry) -> DayContent {
    let Some(day) = record.filter(|day| day.has_events()) else {
        return DayContent::Placeholder;
    };

    let appointments = day
        .appointments
        .iter()
        .map(|appt| AppointmentItem {
            time: appt.time.clone(),
            what: appt.what.clone(),
            location: appt.location.clone(),
        })
        .collect();

    let medications = day
        .medications
        .iter()
        .map(|med| {
            let info = registry.resolve(&med.name);
            MedicationItem {
                name: med.name.clone(),
                details: med.details.clone(),
                color: info.color,
                icon: info.icon,
                video_url: info.video_url,
                is_start: med.is_start,
                is_stop: med.is_stop,
                is_trigger: med.is_trigger,
            }
        })
        .collect();

    DayContent::Sections {
        milestone: day.milestone_text().map(str::to_string),
        appointments,
        medications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drug::{DrugInfo, FALLBACK_COLOR, FALLBACK_ICON};
    use crate::models::schedule::{Appointment, Medication};

    fn med(name: &str) -> Medication {
        Medication {
            name: name.to_string(),
            details: "1 dose".to_string(),
            is_start: false,
            is_stop: false,
            is_trigger: false,
        }
    }

    fn day(milestone: Option<&str>, appointments: Vec<Appointment>, medications: Vec<Medication>) -> DayRecord {
        DayRecord {
            date: "2024-03-05".to_string(),
            milestone: milestone.map(str::to_string),
            appointments,
            medications,
        }
    }

    #[test]
    fn absent_day_is_placeholder() {
        assert_eq!(render_day(None, &DrugRegistry::builtin()), DayContent::Placeholder);
    }

    #[test]
    fn empty_day_is_placeholder() {
        let record = day(Some(""), Vec::new(), Vec::new());
        assert!(render_day(Some(&record), &DrugRegistry::builtin()).is_placeholder());
    }

    #[test]
    fn unknown_medication_falls_back() {
        let record = day(None, Vec::new(), vec![med("Mystery")]);
        let content = render_day(Some(&record), &DrugRegistry::builtin());
        let DayContent::Sections { medications, .. } = content else {
            panic!("expected sections");
        };
        assert_eq!(medications[0].color, FALLBACK_COLOR);
        assert_eq!(medications[0].icon, FALLBACK_ICON);
        assert_eq!(medications[0].video_url, None);
    }

    #[test]
    fn flags_map_to_independent_classes() {
        let mut m = med("Pregnyl");
        m.is_stop = true;
        m.is_trigger = true;
        let record = day(None, Vec::new(), vec![m]);
        let DayContent::Sections { medications, .. } = render_day(Some(&record), &DrugRegistry::builtin()) else {
            panic!("expected sections");
        };
        assert_eq!(medications[0].css_classes(), vec!["med-item", "is-stop", "is-trigger"]);
    }

    #[test]
    fn uses_injected_registry() {
        let registry = DrugRegistry::new().with("Clomid", DrugInfo::new("purple", "*"));
        let record = day(None, Vec::new(), vec![med("Clomid")]);
        let DayContent::Sections { medications, .. } = render_day(Some(&record), &registry) else {
            panic!("expected sections");
        };
        assert_eq!(medications[0].color, "purple");
        assert_eq!(medications[0].icon, "*");
    }

    #[test]
    fn rendering_is_idempotent() {
        let record = day(
            Some("Retrieval"),
            vec![Appointment {
                time: "8:00 AM".to_string(),
                what: "Egg retrieval".to_string(),
                location: "Clinic".to_string(),
            }],
            vec![med("Clomid"), med("Unknown")],
        );
        let registry = DrugRegistry::builtin();
        let first = render_day(Some(&record), &registry);
        let second = render_day(Some(&record), &registry);
        assert_eq!(first, second);
    }
}
