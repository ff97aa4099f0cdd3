use anyhow::Result;
use monthcal_core::config::AppConfig;
use monthcal_core::DateKey;
use owo_colors::OwoColorize;

use super::open_agenda;
use crate::render::Render;

pub fn run(config: &AppConfig, date: DateKey, id: &str) -> Result<()> {
    let mut agenda = open_agenda(config);
    let event = agenda.delete(date, id)?;

    println!("{} {} on {}", "Deleted".red(), event.render(), date.bold());
    Ok(())
}
