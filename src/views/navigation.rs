use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::drug::DrugRegistry;
use crate::service::schedule_store::ScheduleStore;
use crate::views::calendar::{CalendarState, DetailPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Today,
    Calendar,
    Legend,
}

impl View {
    pub const ALL: [View; 3] = [View::Today, View::Calendar, View::Legend];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Today => "today",
            View::Calendar => "calendar",
            View::Legend => "legend",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Today => "Today",
            View::Calendar => "Calendar",
            View::Legend => "Legend",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| format!("Unknown view '{}'", s))
    }
}

/// User intents the viewer surfaces translate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Show(View),
    PrevMonth,
    NextMonth,
    GoToToday,
    /// `None` is a click on the grid background rather than on a day.
    Select(Option<NaiveDate>),
}

/// Active view plus calendar month/selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    active: View,
    calendar: CalendarState,
    detail: DetailPanel,
}

impl Navigator {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            active: View::Today,
            calendar: CalendarState::new(today),
            detail: DetailPanel::Placeholder,
        }
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn calendar(&self) -> &CalendarState {
        &self.calendar
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    /// Exactly one view is active; leaving the calendar drops its selection.
    pub fn switch_to(&mut self, view: View) {
        self.active = view;
        if view != View::Calendar {
            self.reset_selection();
        }
    }

    pub fn apply(&mut self, action: NavAction, today: NaiveDate, store: &ScheduleStore, registry: &DrugRegistry) {
        tracing::debug!(?action, "Navigation");
        if self.active != View::Calendar && !matches!(action, NavAction::Show(_)) {
            tracing::debug!(?action, active = %self.active, "Ignoring calendar action outside the calendar");
            return;
        }
        match action {
            NavAction::Show(view) => self.switch_to(view),
            NavAction::PrevMonth => {
                self.calendar.prev_month();
                self.detail = DetailPanel::Placeholder;
            }
            NavAction::NextMonth => {
                self.calendar.next_month();
                self.detail = DetailPanel::Placeholder;
            }
            NavAction::GoToToday => {
                self.detail = self.calendar.go_to_today(today, store, registry);
            }
            NavAction::Select(cell) => {
                self.detail = self.calendar.select(cell, store, registry);
            }
        }
    }

    fn reset_selection(&mut self) {
        self.calendar.clear_selection();
        self.detail = DetailPanel::Placeholder;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn view_names_round_trip_through_from_str() {
        for view in View::ALL {
            assert_eq!(view.as_str().parse::<View>(), Ok(view));
        }
        assert!("settings".parse::<View>().is_err());
    }

    #[test]
    fn starts_on_today_with_current_month() {
        let nav = Navigator::new(date(2024, 3, 5));
        assert_eq!(nav.active(), View::Today);
        assert_eq!((nav.calendar().year(), nav.calendar().month()), (2024, 3));
        assert_eq!(nav.detail(), &DetailPanel::Placeholder);
    }

    #[test]
    fn leaving_calendar_clears_selection() {
        let store = ScheduleStore::load(r#"[{"date":"2024-03-05","milestone":"Scan"}]"#).unwrap();
        let registry = DrugRegistry::builtin();
        let today = date(2024, 3, 5);
        let mut nav = Navigator::new(today);

        nav.apply(NavAction::Show(View::Calendar), today, &store, &registry);
        nav.apply(NavAction::Select(Some(today)), today, &store, &registry);
        assert_eq!(nav.calendar().selected(), Some(today));

        nav.apply(NavAction::Show(View::Calendar), today, &store, &registry);
        assert_eq!(nav.calendar().selected(), Some(today));

        nav.apply(NavAction::Show(View::Legend), today, &store, &registry);
        assert_eq!(nav.active(), View::Legend);
        assert_eq!(nav.calendar().selected(), None);
        assert_eq!(nav.detail(), &DetailPanel::Placeholder);
    }

    #[test]
    fn calendar_actions_are_ignored_outside_calendar() {
        let store = ScheduleStore::load(r#"[{"date":"2024-02-10","milestone":"Scan"}]"#).unwrap();
        let registry = DrugRegistry::builtin();
        let today = date(2024, 2, 10);
        let mut nav = Navigator::new(today);

        nav.apply(NavAction::Select(Some(date(2030, 5, 5))), today, &store, &registry);
        nav.apply(NavAction::Select(Some(today)), today, &store, &registry);
        nav.apply(NavAction::NextMonth, today, &store, &registry);
        nav.apply(NavAction::GoToToday, today, &store, &registry);

        assert_eq!(nav.active(), View::Today);
        assert_eq!(nav.calendar().selected(), None);
        assert_eq!((nav.calendar().year(), nav.calendar().month()), (2024, 2));
        assert_eq!(nav.detail(), &DetailPanel::Placeholder);
    }
}
