use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use crate::models::drug::DrugRegistry;
use crate::service::day_content::{render_day, AppointmentItem, DayContent, MedicationItem};
use crate::service::schedule_store::ScheduleStore;

const STOP_ICON: &str = "🛑";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Morning,
    Evening,
    LateNight,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 3] = [ReminderKind::Morning, ReminderKind::Evening, ReminderKind::LateNight];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Morning => "morning",
            ReminderKind::Evening => "evening",
            ReminderKind::LateNight => "late_night",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReminderKind::Morning => "Morning Template (7 AM)",
            ReminderKind::Evening => "Evening Checklist (6 PM)",
            ReminderKind::LateNight => "Late Night Template (10 PM)",
        }
    }

    /// Local wall-clock time the reminder fires each day.
    pub fn fire_time(&self) -> NaiveTime {
        let hour = match self {
            ReminderKind::Morning => 7,
            ReminderKind::Evening => 18,
            ReminderKind::LateNight => 22,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(ReminderKind::Morning),
            "evening" => Ok(ReminderKind::Evening),
            "late_night" => Ok(ReminderKind::LateNight),
            other => Err(format!("Unknown reminder_type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderContent {
    pub subject: String,
    pub body: String,
    pub should_send: bool,
}

fn short_date(date: NaiveDate) -> String {
    date.format("%a. %-m/%-d").to_string()
}

pub fn generate_reminder_content(
    kind: ReminderKind,
    base_date: NaiveDate,
    store: &ScheduleStore,
    registry: &DrugRegistry,
) -> ReminderContent {
    match kind {
        ReminderKind::Morning => {
            let day = store.find_date(base_date);
            ReminderContent {
                subject: format!("🌅 Good Morning! Your Schedule for {}", short_date(base_date)),
                body: format_full_body(day.is_some(), &render_day(day, registry), "Today", registry),
                should_send: day.is_some_and(|d| d.has_events()),
            }
        }
        ReminderKind::Evening => {
            let day = store.find_date(base_date);
            ReminderContent {
                subject: format!("🔍 Evening Check-in: {}", short_date(base_date)),
                body: format_evening_checklist(&render_day(day, registry), registry),
                should_send: day.is_some_and(|d| !d.medications.is_empty()),
            }
        }
        ReminderKind::LateNight => {
            let tomorrow = base_date.succ_opt().unwrap_or(base_date);
            let day = store.find_date(tomorrow);
            ReminderContent {
                subject: format!("🌙 Tomorrow's Preview: {}", short_date(tomorrow)),
                body: format_full_body(day.is_some(), &render_day(day, registry), "Tomorrow", registry),
                should_send: day.is_some_and(|d| d.has_events()),
            }
        }
    }
}

/// Markdown body listing everything scheduled for a day.
pub fn format_full_body(found: bool, content: &DayContent, label: &str, registry: &DrugRegistry) -> String {
    if !found {
        return format!("📅 No schedule found for {}.", label);
    }
    let DayContent::Sections { milestone, appointments, medications } = content else {
        return format!("📅 No specific appointments or medications scheduled for {}.", label);
    };

    let mut lines: Vec<String> = Vec::new();
    if let Some(milestone) = milestone {
        lines.push("🎯 **Milestone**".to_string());
        lines.push(format!("_{}_", milestone));
        lines.push(String::new());
    }
    if !appointments.is_empty() {
        lines.push("📅 **Events & Appointments**".to_string());
        lines.extend(appointments.iter().map(appointment_line));
        lines.push(String::new());
    }
    if !medications.is_empty() {
        lines.push("**MEDICATIONS**".to_string());
        lines.push(String::new());
        lines.extend(medications.iter().map(|med| medication_line(med, registry)));
        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn format_evening_checklist(content: &DayContent, registry: &DrugRegistry) -> String {
    let medications = match content {
        DayContent::Sections { medications, .. } if !medications.is_empty() => medications,
        _ => return "✅ No medications to checklist for this evening.".to_string(),
    };
    let mut lines = vec!["**Please review each item:**".to_string()];
    for med in medications {
        lines.push(medication_line(med, registry));
        lines.push(String::new());
    }
    lines.join("\n")
}

fn appointment_line(appt: &AppointmentItem) -> String {
    if appt.time.is_empty() || appt.what.is_empty() {
        return format!("📝 {}", appt.what);
    }
    if appt.location.is_empty() {
        format!("🕐 **{}** - {}", appt.time, appt.what)
    } else {
        format!("🕐 **{}** - {}\n   📍 {}", appt.time, appt.what, appt.location)
    }
}

fn medication_line(med: &MedicationItem, registry: &DrugRegistry) -> String {
    let icon = if med.is_stop { STOP_ICON } else { registry.preview_icon(&med.name) };
    let prefix = if med.is_start {
        "**START:** "
    } else if med.is_stop {
        "**LAST DAY:** "
    } else if med.is_trigger {
        "**TRIGGER:** "
    } else {
        ""
    };
    format!("{} {}**{}**\n   _{}_", icon, prefix, med.name.to_uppercase(), med.details)
}
