//! Event records and the drafts and patches that produce them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date_key::DateKey;
use crate::error::{CalendarError, CalendarResult};

const TIME_FORMAT: &str = "%H:%M";

/// A time of day in 24-hour `HH:MM` form.
///
/// Ordering matches the lexicographic order of the zero-padded strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl FromStr for TimeOfDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || CalendarError::Validation(format!("Invalid time '{}'. Expected HH:MM", s));

        if s.len() != 5 {
            return Err(invalid());
        }

        NaiveTime::parse_from_str(s, TIME_FORMAT)
            .map(TimeOfDay)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A scheduled item on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Build a record from a draft, assigning it the given id.
    pub fn from_draft(id: String, draft: &EventDraft) -> CalendarResult<Self> {
        let checked = draft.validate()?;

        Ok(Event {
            id,
            name: checked.name,
            start_time: checked.start_time,
            end_time: checked.end_time,
            description: checked.description,
        })
    }

    /// Return a copy with the patch applied. The id never changes.
    pub fn patched(&self, patch: &EventPatch) -> CalendarResult<Self> {
        let draft = EventDraft {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            start_time: patch
                .start_time
                .clone()
                .unwrap_or_else(|| self.start_time.to_string()),
            end_time: patch
                .end_time
                .clone()
                .unwrap_or_else(|| self.end_time.to_string()),
            description: match &patch.description {
                Some(description) => Some(description.clone()),
                None => self.description.clone(),
            },
        };

        let mut patched = Event::from_draft(self.id.clone(), &draft)?;

        // Fields the patch leaves alone keep their stored form exactly
        if patch.name.is_none() {
            patched.name = self.name.clone();
        }
        if patch.description.is_none() {
            patched.description = self.description.clone();
        }

        Ok(patched)
    }

    /// Case-insensitive match against the name or the description.
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();

        self.name.to_lowercase().contains(&keyword)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&keyword))
    }

    /// "09:00 - 09:15"
    pub fn render_time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The event being composed, before it has been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
}

struct CheckedDraft {
    name: String,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    description: Option<String>,
}

impl EventDraft {
    pub fn new(name: &str, start_time: &str, end_time: &str) -> Self {
        EventDraft {
            name: name.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Draft pre-filled from an existing record, as used when editing.
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            name: event.name.clone(),
            start_time: event.start_time.to_string(),
            end_time: event.end_time.to_string(),
            description: event.description.clone(),
        }
    }

    fn validate(&self) -> CalendarResult<CheckedDraft> {
        let name = self.name.trim();
        let start = self.start_time.trim();
        let end = self.end_time.trim();

        let missing: Vec<&str> = [("name", name), ("start time", start), ("end time", end)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing.is_empty() {
            return Err(CalendarError::Validation(format!(
                "Please fill in all required fields (missing: {})",
                missing.join(", ")
            )));
        }

        let start_time: TimeOfDay = start.parse()?;
        let end_time: TimeOfDay = end.parse()?;

        if start_time >= end_time {
            return Err(CalendarError::Validation(format!(
                "Event must end after it starts ({} - {})",
                start_time, end_time
            )));
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(CheckedDraft {
            name: name.to_string(),
            start_time,
            end_time,
            description,
        })
    }
}

/// Replacement values for an existing record. Unset fields are kept.
///
/// A description of `Some("")` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.description.is_none()
    }
}

impl From<EventDraft> for EventPatch {
    /// A full draft replaces every field.
    fn from(draft: EventDraft) -> Self {
        EventPatch {
            name: Some(draft.name),
            start_time: Some(draft.start_time),
            end_time: Some(draft.end_time),
            description: Some(draft.description.unwrap_or_default()),
        }
    }
}

/// Points a draft back at the record it is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub date: DateKey,
    pub event_id: String,
}
