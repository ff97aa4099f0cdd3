pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod view;

use monthcal_core::config::AppConfig;
use monthcal_core::persistence::FileSlot;
use monthcal_core::Agenda;

/// Open the agenda stored in the configured slot.
pub fn open_agenda(config: &AppConfig) -> Agenda<FileSlot> {
    let slot = config.slot();
    log::debug!("Opening events from {}", slot.path().display());
    Agenda::open(slot)
}
