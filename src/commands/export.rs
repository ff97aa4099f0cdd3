use std::path::PathBuf;

use anyhow::Result;
use monthcal_core::config::AppConfig;
use monthcal_core::CalendarMonth;
use owo_colors::OwoColorize;

use super::open_agenda;

pub fn run(config: &AppConfig, month: CalendarMonth, out: Option<PathBuf>) -> Result<()> {
    let agenda = open_agenda(config);
    let export = agenda.export_month(month.year(), month.month())?;

    let dir = out.unwrap_or_else(|| config.export_path());
    let path = export.write_to(&dir)?;

    println!(
        "{} {} {} for {} to {}",
        "Exported".green(),
        export.event_count,
        if export.event_count == 1 { "event" } else { "events" },
        month.title().bold(),
        path.display()
    );
    Ok(())
}
