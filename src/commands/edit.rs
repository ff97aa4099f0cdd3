use anyhow::Result;
use monthcal_core::config::AppConfig;
use monthcal_core::{DateKey, EventPatch};
use owo_colors::OwoColorize;

use super::open_agenda;
use crate::render::Render;

pub fn run(
    config: &AppConfig,
    date: DateKey,
    id: &str,
    name: Option<String>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let patch = EventPatch {
        name,
        start_time: start,
        end_time: end,
        description,
    };

    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --name, --start, --end, --description");
    }

    let mut agenda = open_agenda(config);
    let before = agenda.store().get(date, id).cloned();
    let event = agenda.update(date, id, &patch)?;

    println!("{} {} on {}", "Updated".yellow(), event.render(), date.bold());
    if let Some(before) = before.filter(|b| *b != event) {
        println!("  {}", format!("was '{}' {}", before.name, before.render_time_range()).dimmed());
    }
    Ok(())
}
