//! An event store bound to the slot it is persisted in.

use chrono::NaiveDate;

use crate::date_key::DateKey;
use crate::error::CalendarResult;
use crate::event::{EditTarget, Event, EventDraft, EventPatch};
use crate::export::{export_month, MonthExport};
use crate::persistence::{self, Slot};
use crate::store::EventStore;

/// Front-end handle over the calendar's events.
///
/// Every successful mutation is written to the slot before returning. If
/// that write fails the in-memory store is rolled back, so memory and
/// storage never disagree.
#[derive(Debug)]
pub struct Agenda<S: Slot> {
    store: EventStore,
    slot: S,
}

impl<S: Slot> Agenda<S> {
    /// Load whatever the slot holds. A missing or corrupt slot gives an
    /// empty agenda.
    pub fn open(slot: S) -> Self {
        let store = persistence::load(&slot);
        Agenda { store, slot }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn add(&mut self, date: DateKey, draft: &EventDraft) -> CalendarResult<Event> {
        self.mutate(|store| store.add(date, draft))
    }

    pub fn update(
        &mut self,
        date: DateKey,
        event_id: &str,
        patch: &EventPatch,
    ) -> CalendarResult<Event> {
        self.mutate(|store| store.update(date, event_id, patch))
    }

    pub fn delete(&mut self, date: DateKey, event_id: &str) -> CalendarResult<Event> {
        self.mutate(|store| store.delete(date, event_id))
    }

    /// Save a composed draft: a new event on `date`, or a full replacement
    /// of the event being edited.
    pub fn submit(
        &mut self,
        date: DateKey,
        draft: EventDraft,
        editing: Option<&EditTarget>,
    ) -> CalendarResult<Event> {
        match editing {
            Some(target) => self.update(target.date, &target.event_id, &draft.into()),
            None => self.add(date, &draft),
        }
    }

    pub fn list_for_date(&self, date: DateKey) -> &[Event] {
        self.store.list_for_date(date)
    }

    pub fn search(&self, date: DateKey, keyword: &str) -> Vec<&Event> {
        self.store.search(date, keyword)
    }

    pub fn query<F>(&self, predicate: F) -> EventStore
    where
        F: Fn(NaiveDate) -> bool,
    {
        self.store.query(predicate)
    }

    pub fn export_month(&self, year: i32, month: u32) -> CalendarResult<MonthExport> {
        export_month(&self.store, year, month)
    }

    /// Write the full store to the slot.
    pub fn save(&self) -> CalendarResult<()> {
        persistence::save(&self.slot, &self.store)
    }

    fn mutate<T, F>(&mut self, change: F) -> CalendarResult<T>
    where
        F: FnOnce(&mut EventStore) -> CalendarResult<T>,
    {
        let previous = self.store.clone();
        let result = change(&mut self.store)?;

        if let Err(e) = self.save() {
            self.store = previous;
            return Err(e);
        }

        Ok(result)
    }
}
