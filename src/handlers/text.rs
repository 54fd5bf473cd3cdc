use chrono::NaiveDate;

use crate::models::drug::DrugRegistry;
use crate::service::day_content::{DayContent, APPOINTMENT_ICON, NO_ITEMS_TEXT};
use crate::service::schedule_store::ScheduleStore;
use crate::views::calendar::{CalendarGrid, DetailPanel, GridCell, DETAILS_PLACEHOLDER};
use crate::views::legend::{legend_rows, LegendRow};
use crate::views::navigation::{Navigator, View};
use crate::views::today::TodayView;

const CELL_WIDTH: usize = 5;

/// Plain-text rendering of whichever view is active.
pub fn render_active_view(nav: &Navigator, store: &ScheduleStore, registry: &DrugRegistry, today: NaiveDate) -> String {
    match nav.active() {
        View::Today => today_text(&TodayView::build(store, registry, today)),
        View::Calendar => calendar_text(&CalendarGrid::build(store, registry, nav.calendar(), today), nav.detail()),
        View::Legend => legend_text(&legend_rows(registry)),
    }
}

pub fn today_text(view: &TodayView) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        view.today.heading,
        day_content_text(&view.today.content),
        view.tomorrow.heading,
        day_content_text(&view.tomorrow.content)
    )
}

pub fn day_content_text(content: &DayContent) -> String {
    let DayContent::Sections { milestone, appointments, medications } = content else {
        return format!("  {}\n", NO_ITEMS_TEXT);
    };
    let mut out = String::new();
    if let Some(milestone) = milestone {
        out.push_str(&format!("  Milestone: {}\n", milestone));
    }
    for appt in appointments {
        out.push_str(&format!("  {} {}: {} ({})\n", APPOINTMENT_ICON, appt.time, appt.what, appt.location));
    }
    for med in medications {
        let mut flags = Vec::new();
        if med.is_start {
            flags.push("start");
        }
        if med.is_stop {
            flags.push("stop");
        }
        if med.is_trigger {
            flags.push("trigger");
        }
        let flags = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
        out.push_str(&format!("  {} {}{} - {}\n", med.icon, med.name, flags, med.details));
        if let Some(url) = &med.video_url {
            out.push_str(&format!("      video: {}\n", url));
        }
    }
    out
}

/// Seven-column month grid; `*` marks days with events, `^` today, `>` the selection.
pub fn calendar_text(grid: &CalendarGrid, detail: &DetailPanel) -> String {
    let mut out = format!("{}\n", grid.title);
    let cells: Vec<String> = grid
        .cells
        .iter()
        .map(|cell| match cell {
            GridCell::Header(name) => format!("{:<width$}", name, width = CELL_WIDTH),
            GridCell::Blank => " ".repeat(CELL_WIDTH),
            GridCell::Day(day) => format!(
                "{}{:>2}{}{}",
                if day.is_selected { '>' } else { ' ' },
                day.day,
                if day.has_events { '*' } else { ' ' },
                if day.is_today { '^' } else { ' ' },
            ),
        })
        .collect();
    for row in cells.chunks(7) {
        out.push_str(row.concat().trim_end());
        out.push('\n');
    }
    out.push('\n');
    match detail {
        DetailPanel::Placeholder => out.push_str(DETAILS_PLACEHOLDER),
        DetailPanel::Day { heading, content, .. } => {
            out.push_str(heading);
            out.push('\n');
            out.push_str(&day_content_text(content));
        }
    }
    out
}

pub fn legend_text(rows: &[LegendRow]) -> String {
    rows.iter()
        .map(|row| match &row.video_url {
            Some(url) => format!("  {} ({}) - {}\n", row.name, row.color, url),
            None => format!("  {} ({})\n", row.name, row.color),
        })
        .collect()
}
