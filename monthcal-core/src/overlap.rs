//! Time-range conflict detection for events on the same day.
//!
//! Ranges are half-open: an event ending at 09:15 does not conflict with one
//! starting at 09:15.

use crate::event::{Event, TimeOfDay};

/// Whether `[a_start, a_end)` and `[b_start, b_end)` intersect.
pub fn ranges_overlap(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// First existing event whose range intersects the candidate range.
pub fn find_overlap(existing: &[Event], start: TimeOfDay, end: TimeOfDay) -> Option<&Event> {
    existing
        .iter()
        .find(|event| ranges_overlap(event.start_time, event.end_time, start, end))
}

/// Whether any existing event intersects the candidate range.
pub fn overlaps(existing: &[Event], start: TimeOfDay, end: TimeOfDay) -> bool {
    find_overlap(existing, start, end).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn event(id: &str, start: &str, end: &str) -> Event {
        Event::from_draft(id.to_string(), &EventDraft::new(id, start, end)).unwrap()
    }

    #[test]
    fn test_partial_overlap() {
        let existing = vec![event("standup", "09:00", "09:15")];
        assert!(overlaps(&existing, t("09:10"), t("09:30")));
        assert!(overlaps(&existing, t("08:50"), t("09:05")));
    }

    #[test]
    fn test_containment_overlaps_both_ways() {
        let existing = vec![event("workshop", "10:00", "12:00")];
        assert!(overlaps(&existing, t("10:30"), t("11:00")));
        assert!(overlaps(&existing, t("09:00"), t("13:00")));
        assert!(overlaps(&existing, t("10:00"), t("12:00")));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let existing = vec![event("standup", "09:00", "09:15")];
        assert!(!overlaps(&existing, t("09:15"), t("09:30")));
        assert!(!overlaps(&existing, t("08:30"), t("09:00")));
    }

    #[test]
    fn test_empty_day_never_overlaps() {
        assert!(!overlaps(&[], t("00:00"), t("23:59")));
    }

    #[test]
    fn test_find_overlap_returns_first_conflict() {
        let existing = vec![
            event("a", "08:00", "09:00"),
            event("b", "10:00", "11:00"),
            event("c", "10:30", "12:00"),
        ];
        let conflict = find_overlap(&existing, t("10:45"), t("11:15")).unwrap();
        assert_eq!(conflict.id, "b");
    }

    #[test]
    fn test_overlap_matches_interval_formula_exhaustively() {
        let marks = ["08:00", "09:00", "10:00", "11:00"];
        for (i, s1) in marks.iter().enumerate() {
            for e1 in &marks[i + 1..] {
                for (j, s2) in marks.iter().enumerate() {
                    for e2 in &marks[j + 1..] {
                        let existing = vec![event("x", s1, e1)];
                        let expected = s1 < e2 && s2 < e1;
                        assert_eq!(
                            overlaps(&existing, t(s2), t(e2)),
                            expected,
                            "[{s1},{e1}) vs [{s2},{e2})"
                        );
                    }
                }
            }
        }
    }
}
