use anyhow::Result;
use monthcal_core::config::AppConfig;
use monthcal_core::{DateKey, EventDraft};
use owo_colors::OwoColorize;

use super::open_agenda;
use crate::render::Render;

pub fn run(
    config: &AppConfig,
    date: DateKey,
    name: String,
    start: String,
    end: String,
    description: Option<String>,
) -> Result<()> {
    let mut agenda = open_agenda(config);

    let draft = EventDraft {
        name,
        start_time: start,
        end_time: end,
        description,
    };
    let event = agenda.add(date, &draft)?;

    println!("{} {} on {}", "Added".green(), event.render(), date.bold());
    Ok(())
}
