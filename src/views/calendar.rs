use chrono::{Datelike, NaiveDate};

use crate::models::drug::DrugRegistry;
use crate::service::day_content::{render_day, DayContent, APPOINTMENT_ICON};
use crate::service::schedule_store::ScheduleStore;
use crate::views::today::long_date;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const DETAILS_PLACEHOLDER: &str = "Click a day with events to see details.";

/// Displayed month plus the selected day, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    year: i32,
    month: u32,
    selected: Option<NaiveDate>,
}

/// What the day-details panel under the grid shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPanel {
    Placeholder,
    Day {
        date: NaiveDate,
        heading: String,
        content: DayContent,
    },
}

impl DetailPanel {
    fn for_day(date: NaiveDate, store: &ScheduleStore, registry: &DrugRegistry) -> Self {
        DetailPanel::Day {
            date,
            heading: long_date(date),
            content: render_day(store.find_date(date), registry),
        }
    }
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            selected: None,
        }
    }

    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::new)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn first_of_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn prev_month(&mut self) {
        if self.month == 1 {
            self.year -= 1;
            self.month = 12;
        } else {
            self.month -= 1;
        }
        self.selected = None;
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
        self.selected = None;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Handles a click (or Enter/Space) on a day cell; `None` is a click on the
    /// grid background. Dates outside the displayed month have no cell and are
    /// treated as background clicks.
    pub fn select(&mut self, cell: Option<NaiveDate>, store: &ScheduleStore, registry: &DrugRegistry) -> DetailPanel {
        let cell = cell.filter(|date| self.contains(*date));
        let has_events = cell
            .and_then(|date| store.find_date(date))
            .is_some_and(|day| day.has_events());

        let Some(date) = cell.filter(|_| has_events) else {
            self.selected = None;
            return match cell {
                Some(date) => DetailPanel::for_day(date, store, registry),
                None => DetailPanel::Placeholder,
            };
        };

        if self.selected == Some(date) {
            self.selected = None;
            return DetailPanel::Placeholder;
        }

        self.selected = Some(date);
        DetailPanel::for_day(date, store, registry)
    }

    fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Jumps back to the current month and focuses today's cell.
    pub fn go_to_today(&mut self, today: NaiveDate, store: &ScheduleStore, registry: &DrugRegistry) -> DetailPanel {
        *self = Self::new(today);
        self.select(Some(today), store, registry)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Weekday index of the 1st, 0 = Sunday.
pub fn leading_blanks(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub has_events: bool,
    pub is_selected: bool,
    pub icons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Header(&'static str),
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub title: String,
    pub cells: Vec<GridCell>,
}

impl CalendarGrid {
    pub fn build(store: &ScheduleStore, registry: &DrugRegistry, state: &CalendarState, today: NaiveDate) -> Self {
        let (year, month) = (state.year(), state.month());
        let mut cells: Vec<GridCell> = WEEKDAY_HEADERS.into_iter().map(GridCell::Header).collect();
        cells.extend((0..leading_blanks(year, month)).map(|_| GridCell::Blank));

        for day in 1..=days_in_month(year, month) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let record = store.find_date(date).filter(|record| record.has_events());
            let icons = record
                .map(|record| {
                    let mut icons: Vec<String> = Vec::new();
                    if !record.appointments.is_empty() {
                        icons.push(APPOINTMENT_ICON.to_string());
                    }
                    for med in &record.medications {
                        let icon = registry.preview_icon(&med.name);
                        if !icons.iter().any(|existing| existing == icon) {
                            icons.push(icon.to_string());
                        }
                    }
                    icons
                })
                .unwrap_or_default();

            cells.push(GridCell::Day(DayCell {
                date,
                day,
                is_today: date == today,
                has_events: record.is_some(),
                is_selected: state.selected() == Some(date),
                icons,
            }));
        }

        Self {
            title: state.first_of_month().format("%B %Y").to_string(),
            cells,
        }
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            _ => None,
        })
    }
}
