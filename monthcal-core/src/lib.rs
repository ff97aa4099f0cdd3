//! Core types for monthcal.
//!
//! This crate holds everything a front end needs to manage a month calendar:
//! - `Event`, `EventDraft` and `EventPatch` for the records themselves
//! - `EventStore` for the date-keyed collection and its queries
//! - `persistence` for loading and saving the store to a durable slot
//! - `Agenda` which ties a store to its slot and persists every mutation
//! - `export` and `grid` for month export and the visible month grid

pub mod agenda;
pub mod config;
pub mod date_key;
pub mod error;
pub mod event;
pub mod export;
pub mod grid;
pub mod overlap;
pub mod persistence;
pub mod store;

pub use agenda::Agenda;
pub use date_key::DateKey;
pub use error::{CalendarError, CalendarResult};
pub use event::{EditTarget, Event, EventDraft, EventPatch, TimeOfDay};
pub use export::{export_month, MonthExport};
pub use grid::{days_in_view, CalendarMonth};
pub use store::EventStore;
