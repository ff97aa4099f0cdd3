//! Terminal rendering for monthcal types.
//!
//! Extension traits and helpers that add colored output to monthcal-core
//! types using owo_colors.

use chrono::{Datelike, NaiveDate};
use monthcal_core::{CalendarMonth, DateKey, Event, EventStore};
use owo_colors::OwoColorize;

const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        format!(
            "'{}' {} {}",
            self.name,
            self.render_time_range(),
            format!("[{}]", self.id).dimmed()
        )
    }
}

/// One block per event: time range, name, id, then the description.
pub fn render_day(events: &[&Event]) -> String {
    let mut lines = Vec::new();

    for event in events {
        lines.push(format!(
            "  {} {} {}",
            event.render_time_range().cyan(),
            event.name,
            format!("[{}]", event.id).dimmed()
        ));
        if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("    {}", description.dimmed()));
        }
    }

    lines.join("\n")
}

/// The month grid, Sunday first. Days with events carry a `*`; days outside
/// the month are dimmed and today is highlighted.
pub fn render_month(month: &CalendarMonth, store: &EventStore, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    let width = WEEKDAY_HEADER.len() * 4;
    lines.push(format!("{:^width$}", month.title(), width = width).bold().to_string());
    lines.push(
        WEEKDAY_HEADER
            .iter()
            .map(|d| format!(" {}", d))
            .collect::<String>(),
    );

    for week in month.days_in_view().chunks(7) {
        let row: String = week
            .iter()
            .map(|day| render_cell(month, store, today, *day))
            .collect();
        lines.push(row);
    }

    lines.join("\n")
}

fn render_cell(month: &CalendarMonth, store: &EventStore, today: NaiveDate, day: NaiveDate) -> String {
    let marker = if store.has_events(DateKey::from(day)) { '*' } else { ' ' };
    let cell = format!("{:>3}{}", day.day(), marker);

    if day == today {
        cell.blue().bold().to_string()
    } else if !month.contains(day) {
        cell.dimmed().to_string()
    } else {
        cell
    }
}
