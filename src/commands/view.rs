use anyhow::Result;
use chrono::Local;
use monthcal_core::config::AppConfig;
use monthcal_core::{CalendarMonth, CalendarResult};
use owo_colors::OwoColorize;

use super::open_agenda;
use crate::render::render_month;

pub fn run(config: &AppConfig, month: CalendarMonth) -> Result<()> {
    let agenda = open_agenda(config);
    let today = Local::now().date_naive();

    println!("{}", render_month(&month, agenda.store(), today));

    let in_month = agenda.query(|date| month.contains(date));
    if in_month.is_empty() {
        println!("{}", "No events this month".dimmed());
    } else {
        let count = in_month.len();
        let days = in_month.dates().count();
        println!(
            "{}",
            format!(
                "{} {} on {} {}",
                count,
                if count == 1 { "event" } else { "events" },
                days,
                if days == 1 { "day" } else { "days" }
            )
            .dimmed()
        );
    }

    let neighbour = |m: CalendarResult<CalendarMonth>| {
        m.map(|m| m.to_string()).unwrap_or_else(|_| "-".to_string())
    };
    println!(
        "{}",
        format!(
            "Previous: {}  Next: {}",
            neighbour(month.previous()),
            neighbour(month.next())
        )
        .dimmed()
    );
    Ok(())
}
