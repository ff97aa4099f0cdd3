//! Month navigation and the days shown in a month view.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::error::{CalendarError, CalendarResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, e.g. March 2024.
///
/// Only months whose whole Sunday-to-Saturday view is representable can be
/// built, so the view never needs fallible date arithmetic later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    first: NaiveDate,
    last: NaiveDate,
    view_start: NaiveDate,
    view_end: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        let invalid =
            || CalendarError::Validation(format!("Invalid month {:04}-{:02}", year, month));

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .ok_or_else(invalid)?;

        let leading = Days::new(first.weekday().num_days_from_sunday() as u64);
        let trailing = Days::new(6 - last.weekday().num_days_from_sunday() as u64);
        let view_start = first.checked_sub_days(leading).ok_or_else(invalid)?;
        let view_end = last.checked_add_days(trailing).ok_or_else(invalid)?;

        Ok(CalendarMonth {
            year,
            month,
            first,
            last,
            view_start,
            view_end,
        })
    }

    /// The month containing today's local date.
    pub fn current() -> CalendarResult<Self> {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> CalendarResult<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> CalendarResult<Self> {
        match self.month {
            1 => Self::new(self.year - 1, 12),
            m => Self::new(self.year, m - 1),
        }
    }

    pub fn next(&self) -> CalendarResult<Self> {
        match self.month {
            12 => Self::new(self.year + 1, 1),
            m => Self::new(self.year, m + 1),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// English month name, e.g. "March".
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// Every day of the view: whole weeks, Sunday first.
    pub fn days_in_view(&self) -> Vec<NaiveDate> {
        self.view_start
            .iter_days()
            .take_while(|day| *day <= self.view_end)
            .collect()
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}

impl FromStr for CalendarMonth {
    type Err = CalendarError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::Validation(format!("Invalid month '{}'. Expected YYYY-MM", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        CalendarMonth::new(year, month)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Days shown for `year`/`month`: from the Sunday on or before the 1st to
/// the Saturday on or after the last day.
pub fn days_in_view(year: i32, month: u32) -> CalendarResult<Vec<NaiveDate>> {
    Ok(CalendarMonth::new(year, month)?.days_in_view())
}
