use anyhow::Result;
use monthcal_core::config::AppConfig;
use monthcal_core::DateKey;
use owo_colors::OwoColorize;

use super::open_agenda;
use crate::render::render_day;

pub fn run(config: &AppConfig, date: DateKey, search: Option<&str>) -> Result<()> {
    let agenda = open_agenda(config);
    let events = agenda.search(date, search.unwrap_or(""));

    println!("{}", date.bold());

    if events.is_empty() {
        match search {
            Some(keyword) if !keyword.is_empty() => {
                println!("  {}", format!("No events matching '{}'", keyword).dimmed())
            }
            _ => println!("  {}", "No events".dimmed()),
        }
        return Ok(());
    }

    println!("{}", render_day(&events));
    Ok(())
}
