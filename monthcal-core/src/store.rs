//! The in-memory event store: calendar days mapped to their events.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date_key::DateKey;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventDraft, EventPatch};
use crate::overlap;

/// Events grouped by day, each day's events kept in insertion order.
///
/// A day is present only while it has at least one event. Serializes as a
/// plain JSON object of `YYYY-MM-DD` keys to event arrays.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    days: BTreeMap<DateKey, Vec<Event>>,
    last_id: i64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing day lists. Empty days are dropped.
    pub fn from_days(days: BTreeMap<DateKey, Vec<Event>>) -> Self {
        let days: BTreeMap<DateKey, Vec<Event>> =
            days.into_iter().filter(|(_, events)| !events.is_empty()).collect();

        // Ids are millisecond timestamps; new ones must sort after loaded ones
        let last_id = days
            .values()
            .flatten()
            .filter_map(|event| event.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        EventStore { days, last_id }
    }

    /// Validate a draft and append it to the day's events.
    ///
    /// Rejects drafts with missing or malformed fields and drafts whose time
    /// range overlaps an event already on that day.
    pub fn add(&mut self, date: DateKey, draft: &EventDraft) -> CalendarResult<Event> {
        let mut event = Event::from_draft(String::new(), draft)?;

        if let Some(existing) =
            overlap::find_overlap(self.list_for_date(date), event.start_time, event.end_time)
        {
            return Err(CalendarError::Validation(format!(
                "This event overlaps with an existing event ('{}', {})",
                existing.name,
                existing.render_time_range()
            )));
        }

        event.id = self.next_id(date);
        log::debug!("Adding event {} '{}' on {}", event.id, event.name, date);

        self.days.entry(date).or_default().push(event.clone());
        Ok(event)
    }

    /// Apply a patch to an existing event, keeping its id and position.
    ///
    /// Overlap with other events on the day is not checked here.
    pub fn update(
        &mut self,
        date: DateKey,
        event_id: &str,
        patch: &EventPatch,
    ) -> CalendarResult<Event> {
        let events = self
            .days
            .get_mut(&date)
            .ok_or_else(|| not_found(date, event_id))?;

        let index = events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| not_found(date, event_id))?;

        let updated = events[index].patched(patch)?;

        let siblings: Vec<Event> = events
            .iter()
            .filter(|e| e.id != event_id)
            .cloned()
            .collect();
        if let Some(conflict) =
            overlap::find_overlap(&siblings, updated.start_time, updated.end_time)
        {
            log::warn!(
                "Edited event '{}' on {} now overlaps '{}' ({})",
                updated.name,
                date,
                conflict.name,
                conflict.render_time_range()
            );
        }

        log::debug!("Updating event {} on {}", event_id, date);
        events[index] = updated.clone();
        Ok(updated)
    }

    /// Remove an event, dropping the day once it has no events left.
    pub fn delete(&mut self, date: DateKey, event_id: &str) -> CalendarResult<Event> {
        let events = self
            .days
            .get_mut(&date)
            .ok_or_else(|| not_found(date, event_id))?;

        let index = events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| not_found(date, event_id))?;

        let removed = events.remove(index);
        if events.is_empty() {
            self.days.remove(&date);
        }

        log::debug!("Deleted event {} on {}", event_id, date);
        Ok(removed)
    }

    pub fn list_for_date(&self, date: DateKey) -> &[Event] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, date: DateKey, event_id: &str) -> Option<&Event> {
        self.list_for_date(date).iter().find(|e| e.id == event_id)
    }

    /// Events of the day whose name or description contains `keyword`,
    /// ignoring case. An empty keyword returns the whole day.
    pub fn search(&self, date: DateKey, keyword: &str) -> Vec<&Event> {
        self.list_for_date(date)
            .iter()
            .filter(|e| e.matches(keyword))
            .collect()
    }

    /// Sub-store of the days whose date satisfies `predicate`.
    pub fn query<F>(&self, predicate: F) -> EventStore
    where
        F: Fn(NaiveDate) -> bool,
    {
        let days = self
            .days
            .iter()
            .filter(|(key, _)| predicate(key.date()))
            .map(|(key, events)| (*key, events.clone()))
            .collect();

        EventStore::from_days(days)
    }

    pub fn has_events(&self, date: DateKey) -> bool {
        self.days.contains_key(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[Event])> {
        self.days.iter().map(|(key, events)| (key, events.as_slice()))
    }

    /// Total number of events across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn next_id(&mut self, date: DateKey) -> String {
        let now = Utc::now().timestamp_millis();

        if let Some(bumped) = self.last_id.checked_add(1) {
            self.last_id = now.max(bumped);
            return self.last_id.to_string();
        }

        // Numeric ids are exhausted; suffix the timestamp until unique on the day
        let taken = self.list_for_date(date);
        (1..)
            .map(|n: u64| format!("{}-{}", now, n))
            .find(|id| taken.iter().all(|e| &e.id != id))
            .unwrap_or_default()
    }
}

fn not_found(date: DateKey, event_id: &str) -> CalendarError {
    CalendarError::NotFound {
        date,
        event_id: event_id.to_string(),
    }
}

impl PartialEq for EventStore {
    /// Stores are equal when they hold the same events; id bookkeeping is
    /// ignored.
    fn eq(&self, other: &Self) -> bool {
        self.days == other.days
    }
}

impl Eq for EventStore {}

impl Serialize for EventStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<DateKey, Vec<Event>>::deserialize(deserializer).map(EventStore::from_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_then_list_returns_the_event() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");

        let added = store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();

        let listed = store.list_for_date(date);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], added);
        assert!(!added.id.is_empty());
    }

    #[test]
    fn test_overlapping_add_is_rejected_and_store_unchanged() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");

        store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();
        let before = store.clone();

        let err = store
            .add(date, &EventDraft::new("Review", "09:10", "09:30"))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Standup"));
        assert_eq!(store, before);
        assert_eq!(store.list_for_date(date)[0].name, "Standup");
    }

    #[test]
    fn test_same_range_on_another_day_is_allowed() {
        let mut store = EventStore::new();
        store
            .add(day("2024-03-05"), &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();
        store
            .add(day("2024-03-06"), &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");

        let ids: Vec<i64> = (0..5)
            .map(|hour| {
                let start = format!("{:02}:00", 8 + hour);
                let end = format!("{:02}:30", 8 + hour);
                store
                    .add(date, &EventDraft::new("Slot", &start, &end))
                    .unwrap()
                    .id
                    .parse()
                    .unwrap()
            })
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_new_ids_follow_loaded_ids() {
        let loaded = Event::from_draft(
            "99999999999999".to_string(),
            &EventDraft::new("A", "08:00", "09:00"),
        )
        .unwrap();
        let mut days = BTreeMap::new();
        days.insert(day("2024-03-05"), vec![loaded]);
        let mut store = EventStore::from_days(days);

        let added = store
            .add(day("2024-03-05"), &EventDraft::new("B", "10:00", "11:00"))
            .unwrap();
        assert_eq!(added.id, "100000000000000");
    }

    #[test]
    fn test_add_after_largest_possible_id() {
        let json = format!(
            r#"{{"2024-03-05":[{{"id":"{}","name":"A","startTime":"08:00","endTime":"09:00"}}]}}"#,
            i64::MAX
        );
        let mut store: EventStore = serde_json::from_str(&json).unwrap();
        let date = day("2024-03-05");

        let b = store.add(date, &EventDraft::new("B", "10:00", "11:00")).unwrap();
        let c = store.add(date, &EventDraft::new("C", "12:00", "13:00")).unwrap();

        let ids: Vec<&str> = store.list_for_date(date).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(b.id, i64::MAX.to_string());
        assert_ne!(b.id, c.id);
        assert!(store.get(date, &b.id).is_some());
        assert!(store.get(date, &c.id).is_some());
    }

    #[test]
    fn test_get_finds_event_by_id() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        let added = store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();

        assert_eq!(store.get(date, &added.id), Some(&added));
        assert_eq!(store.get(date, "missing"), None);
        assert_eq!(store.get(day("2024-03-06"), &added.id), None);
    }

    #[test]
    fn test_update_changes_fields_but_not_id() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        let added = store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();

        let patch = EventPatch {
            name: Some("Daily Standup".to_string()),
            ..Default::default()
        };
        store.update(date, &added.id, &patch).unwrap();

        let listed = store.list_for_date(date);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, added.id);
        assert_eq!(listed[0].name, "Daily Standup");
        assert_eq!(listed[0].start_time, added.start_time);
        assert_eq!(listed[0].end_time, added.end_time);
    }

    #[test]
    fn test_update_does_not_check_overlap() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();
        let lunch = store
            .add(date, &EventDraft::new("Lunch", "12:00", "13:00"))
            .unwrap();

        let patch = EventPatch {
            start_time: Some("09:00".to_string()),
            end_time: Some("10:00".to_string()),
            ..Default::default()
        };
        let updated = store.update(date, &lunch.id, &patch).unwrap();
        assert_eq!(updated.start_time.to_string(), "09:00");
        assert_eq!(store.list_for_date(date).len(), 2);
    }

    #[test]
    fn test_update_still_validates_fields() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        let added = store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();

        let patch = EventPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(store.update(date, &added.id, &patch).unwrap_err().is_validation());
        assert_eq!(store.list_for_date(date)[0].name, "Standup");
    }

    #[test]
    fn test_update_missing_event_is_not_found() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();

        let patch = EventPatch::default();
        assert!(store.update(date, "nope", &patch).unwrap_err().is_not_found());
        assert!(store
            .update(day("2024-03-06"), "nope", &patch)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_deleting_last_event_removes_the_day() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        let added = store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();

        let removed = store.delete(date, &added.id).unwrap();
        assert_eq!(removed, added);
        assert!(!store.has_events(date));
        assert!(store.list_for_date(date).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_keeps_order_of_remaining_events() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        let a = store.add(date, &EventDraft::new("A", "08:00", "09:00")).unwrap();
        let b = store.add(date, &EventDraft::new("B", "07:00", "08:00")).unwrap();
        let c = store.add(date, &EventDraft::new("C", "10:00", "11:00")).unwrap();

        store.delete(date, &b.id).unwrap();

        let ids: Vec<&str> = store.list_for_date(date).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str(), c.id.as_str()]);
    }

    #[test]
    fn test_delete_missing_event_is_not_found() {
        let mut store = EventStore::new();
        let err = store.delete(day("2024-03-05"), "123").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_search_filters_by_keyword() {
        let mut store = EventStore::new();
        let date = day("2024-03-05");
        store
            .add(date, &EventDraft::new("Standup", "09:00", "09:15"))
            .unwrap();
        store
            .add(
                date,
                &EventDraft::new("Lunch", "12:00", "13:00").with_description("with the team"),
            )
            .unwrap();

        let names = |keyword: &str| -> Vec<String> {
            store
                .search(date, keyword)
                .into_iter()
                .map(|e| e.name.clone())
                .collect()
        };

        assert_eq!(names("TEAM"), vec!["Lunch"]);
        assert_eq!(names("stand"), vec!["Standup"]);
        assert_eq!(names(""), vec!["Standup", "Lunch"]);
        assert!(names("retro").is_empty());
    }

    #[test]
    fn test_query_keeps_matching_days_and_their_order() {
        let mut store = EventStore::new();
        let march = day("2024-03-05");
        store.add(march, &EventDraft::new("B", "10:00", "11:00")).unwrap();
        store.add(march, &EventDraft::new("A", "08:00", "09:00")).unwrap();
        store
            .add(day("2024-04-01"), &EventDraft::new("C", "08:00", "09:00"))
            .unwrap();

        let result = store.query(|date| date < NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());

        assert_eq!(result.dates().collect::<Vec<_>>(), vec![&march]);
        let names: Vec<&str> = result.list_for_date(march).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_from_days_drops_empty_days() {
        let mut days = BTreeMap::new();
        days.insert(day("2024-03-05"), Vec::new());
        let store = EventStore::from_days(days);
        assert!(store.is_empty());
        assert!(!store.has_events(day("2024-03-05")));
    }

    #[test]
    fn test_serializes_as_plain_date_map() {
        let json = r#"{"2024-03-05":[{"id":"1","name":"Standup","startTime":"09:00","endTime":"09:15"}]}"#;
        let store: EventStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(serde_json::to_string(&store).unwrap(), json);
    }
}
