use chrono::NaiveDate;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::models::drug::DrugRegistry;
use crate::service::day_content::{DayContent, APPOINTMENT_ICON, NO_ITEMS_TEXT};
use crate::service::schedule_store::{ScheduleStore, DATE_FORMAT};
use crate::views::calendar::{CalendarGrid, DetailPanel, GridCell, DETAILS_PLACEHOLDER};
use crate::views::legend::{legend_rows, LegendRow};
use crate::views::navigation::{Navigator, View};
use crate::views::today::TodayView;

const TITLE: &str = "My Schedule";

/// Full page with all three views mounted and only the active one visible.
pub fn render_page(nav: &Navigator, store: &ScheduleStore, registry: &DrugRegistry, today: NaiveDate) -> Markup {
    let today_view = TodayView::build(store, registry, today);
    let grid = CalendarGrid::build(store, registry, nav.calendar(), today);
    let legend_list = legend_rows(registry);
    let active = nav.active();

    html! {
        (DOCTYPE)
        html lang="en" {
            (head())
            body {
                header {
                    h1 { (TITLE) }
                    nav.nav-buttons {
                        @for view in View::ALL {
                            a.nav-btn.active[active == view]
                                id=(format!("{}-btn", view.as_str()))
                                href=(format!("/view/{}", view.as_str())) { (view.label()) }
                        }
                    }
                }
                main {
                    section.view.hidden[active != View::Today] #today-view {
                        h2.today-date #today-date { (today_view.today.heading) }
                        div #today-content { (day_content(&today_view.today.content)) }
                        div #tomorrow-preview {
                            h3.tomorrow-header { (today_view.tomorrow.heading) }
                            (day_content(&today_view.tomorrow.content))
                        }
                    }
                    section.view.hidden[active != View::Calendar] #calendar-view {
                        div.calendar-header {
                            a.cal-nav #prev-month-btn href="/calendar/prev" title="Previous month" { "‹" }
                            h2 #calendar-month-year { (grid.title) }
                            a.cal-nav #next-month-btn href="/calendar/next" title="Next month" { "›" }
                        }
                        a.go-to-today #go-to-today-btn href="/calendar/today" { "Go to today" }
                        div.calendar-grid #calendar-grid {
                            @for cell in &grid.cells {
                                (grid_cell(cell))
                            }
                        }
                        div.calendar-day-details #calendar-day-details {
                            (detail_panel(nav.detail()))
                        }
                    }
                    section.view.hidden[active != View::Legend] #legend-view {
                        h2 { "Medication Legend" }
                        (legend(&legend_list))
                    }
                }
            }
        }
    }
}

/// Page served when the schedule could not be loaded: the main area holds
/// nothing but the error panel.
pub fn render_error_page(message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (head())
            body {
                header {
                    h1 { (TITLE) }
                }
                main {
                    div.card.error-card {
                        h3 { "An Error Occurred" }
                        p { "Could not load the application. Please check the logs for details or try again later." }
                        p {
                            strong { "Error:" }
                            " "
                            (message)
                        }
                    }
                }
            }
        }
    }
}

fn head() -> Markup {
    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (TITLE) }
            style { (PreEscaped(CSS)) }
        }
    }
}

pub fn day_content(content: &DayContent) -> Markup {
    match content {
        DayContent::Placeholder => html! {
            div.card { p { (NO_ITEMS_TEXT) } }
        },
        DayContent::Sections { milestone, appointments, medications } => html! {
            @if let Some(milestone) = milestone {
                div.card {
                    h3 { "Milestone" }
                    p { (milestone) }
                }
            }
            @if !appointments.is_empty() {
                div.card {
                    h3 { "Appointments" }
                    ul {
                        @for appt in appointments {
                            li.med-item {
                                span.med-icon { (APPOINTMENT_ICON) }
                                div.med-info {
                                    div.med-name { (appt.time) ": " (appt.what) }
                                    div.med-details { (appt.location) }
                                }
                            }
                        }
                    }
                }
            }
            @if !medications.is_empty() {
                div.card {
                    h3 { "Medications" }
                    ul {
                        @for med in medications {
                            li class=(med.css_classes().join(" ")) style=(format!("border-left-color: {};", med.color)) {
                                span.med-icon { (med.icon) }
                                div.med-info {
                                    div.med-name { (med.name) }
                                    div.med-details { (med.details) }
                                }
                                @if let Some(url) = &med.video_url {
                                    a.video-link href=(url) target="_blank" rel="noopener noreferrer" title="Watch instruction video" { "▶️" }
                                }
                            }
                        }
                    }
                }
            }
        },
    }
}

fn grid_cell(cell: &GridCell) -> Markup {
    match cell {
        GridCell::Header(name) => html! { div.day-header { (name) } },
        GridCell::Blank => html! { div.day.other-month {} },
        GridCell::Day(day) => {
            let date = day.date.format(DATE_FORMAT).to_string();
            html! {
                a.day.today[day.is_today].has-events[day.has_events].selected[day.is_selected]
                    href=(format!("/calendar/select?date={}", date))
                    data-date=(date)
                    role=[day.has_events.then_some("button")]
                    tabindex=[day.has_events.then_some("0")] {
                    span.day-number { (day.day) }
                    @if !day.icons.is_empty() {
                        div.day-icons { (day.icons.concat()) }
                    }
                }
            }
        }
    }
}

fn detail_panel(panel: &DetailPanel) -> Markup {
    match panel {
        DetailPanel::Placeholder => html! {
            p.details-placeholder { (DETAILS_PLACEHOLDER) }
        },
        DetailPanel::Day { heading, content, .. } => html! {
            h3.today-date { (heading) }
            (day_content(content))
        },
    }
}

fn legend(rows: &[LegendRow]) -> Markup {
    html! {
        ul.legend-list #legend-list {
            @for row in rows {
                li.legend-item {
                    div.legend-color-swatch style=(format!("background-color: {};", row.color)) {}
                    @if let Some(url) = &row.video_url {
                        a href=(url) target="_blank" rel="noopener noreferrer" { (row.name) " ↗" }
                    } @else {
                        span { (row.name) }
                    }
                }
            }
        }
    }
}

const CSS: &str = r#"
:root {
    --color-prenatal: #f4a261;
    --color-omnitrope: #2a9d8f;
    --color-norethindrone: #e9c46a;
    --color-estradiol: #e76f51;
    --color-clomid: #9b5de5;
    --color-follistim: #00bbf9;
    --color-menopur: #00f5d4;
    --color-ganirelix: #f15bb5;
    --color-pregnyl: #fee440;
    --trigger-color: #d62828;
}
body { font-family: system-ui, sans-serif; margin: 0; background: #f7f7fb; color: #222; }
header { padding: 1rem; background: #fff; border-bottom: 1px solid #ddd; }
.nav-buttons { display: flex; gap: .5rem; }
.nav-btn { padding: .4rem .8rem; border-radius: 6px; text-decoration: none; color: inherit; border: 1px solid #ccc; }
.nav-btn.active { background: #222; color: #fff; }
main { padding: 1rem; max-width: 720px; margin: 0 auto; }
.hidden { display: none; }
.card { background: #fff; border: 1px solid #e2e2e2; border-radius: 8px; padding: .75rem 1rem; margin-bottom: .75rem; }
.error-card { background-color: #fff0f1; border-color: var(--trigger-color); }
ul { list-style: none; padding: 0; margin: 0; }
.med-item { display: flex; align-items: center; gap: .75rem; padding: .5rem; border-left: 4px solid #ccc; margin-bottom: .4rem; }
.med-item.is-start { font-weight: 600; }
.med-item.is-stop { opacity: .8; text-decoration: underline; }
.med-item.is-trigger { background: #fff0f1; border-left-color: var(--trigger-color) !important; }
.med-info { flex: 1; }
.med-details { font-size: .9em; color: #555; }
.video-link { text-decoration: none; }
.calendar-header { display: flex; justify-content: space-between; align-items: center; }
.calendar-grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 4px; margin: .75rem 0; }
.day-header { font-weight: 600; text-align: center; }
.day { min-height: 3rem; padding: 4px; border-radius: 6px; background: #fff; color: inherit; text-decoration: none; }
.day.other-month { background: transparent; }
.day.today { outline: 2px solid #222; }
.day.has-events { background: #eef6ff; }
.day.selected { background: #222; color: #fff; }
.day-icons { font-size: .75em; }
.details-placeholder { color: #777; }
.legend-item { display: flex; align-items: center; gap: .75rem; margin-bottom: .4rem; }
.legend-color-swatch { width: 1rem; height: 1rem; border-radius: 3px; }
"#;
