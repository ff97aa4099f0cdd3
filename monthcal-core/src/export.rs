//! JSON export of one month's events.

use std::path::{Path, PathBuf};

use crate::error::{CalendarError, CalendarResult};
use crate::grid::CalendarMonth;
use crate::store::EventStore;

/// A serialized month of events, ready to be saved under `file_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthExport {
    pub month: CalendarMonth,
    pub file_name: String,
    pub contents: String,
    /// Number of events included
    pub event_count: usize,
}

impl MonthExport {
    /// Write the export into `dir`, returning the path of the new file.
    pub fn write_to(&self, dir: &Path) -> CalendarResult<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;

        log::info!(
            "Exported {} events for {} to {}",
            self.event_count,
            self.month.title(),
            path.display()
        );
        Ok(path)
    }
}

/// `events-March-2024.json`
pub fn export_file_name(month: &CalendarMonth) -> String {
    format!("events-{}-{}.json", month.month_name(), month.year())
}

/// Collect the days of `year`/`month` that have events and serialize them
/// as pretty-printed JSON.
pub fn export_month(store: &EventStore, year: i32, month: u32) -> CalendarResult<MonthExport> {
    let month = CalendarMonth::new(year, month)?;
    let (first, last) = (month.first_day(), month.last_day());

    let subset = store.query(|date| date >= first && date <= last);
    let contents = serde_json::to_string_pretty(&subset)
        .map_err(|e| CalendarError::Serialization(e.to_string()))?;

    Ok(MonthExport {
        month,
        file_name: export_file_name(&month),
        contents,
        event_count: subset.len(),
    })
}
