use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Kind of a user-entered calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Holiday,
    SaleDay,
    PayDay,
}

impl EventKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EventKind::Holiday => "Holiday",
            EventKind::SaleDay => "Sale Day",
            EventKind::PayDay => "Pay Day",
        }
    }
}

/// Dates covered by an event. Ranges are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSpan {
    Day(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEvent {
    kind: EventKind,
    span: EventSpan,
}

impl CalendarEvent {
    pub fn on_day(kind: EventKind, date: NaiveDate) -> Self {
        Self {
            kind,
            span: EventSpan::Day(date),
        }
    }

    /// Creates an event covering `start..=end`.
    ///
    /// Returns `ModelError::InvalidRange` when `end` is before `start`.
    pub fn over_range(kind: EventKind, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ModelError::InvalidRange { start, end });
        }
        Ok(Self {
            kind,
            span: EventSpan::Range { start, end },
        })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn span(&self) -> EventSpan {
        self.span
    }

    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self.span {
            EventSpan::Day(day) => day == date,
            EventSpan::Range { start, end } => start <= date && date <= end,
        }
    }

    /// Every date the event covers, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        match self.span {
            EventSpan::Day(day) => vec![day],
            EventSpan::Range { start, end } => {
                start.iter_days().take_while(|d| *d <= end).collect()
            }
        }
    }
}

/// Events that fall on the given date, in input order.
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.occurs_on(date)).collect()
}

/// Cell layout of a month view with weeks starting on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<NaiveDate>,
    pub trailing_blanks: u32,
}

pub fn month_grid(year: i32, month: u32) -> Result<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ModelError::InvalidPeriod(format!("{year}-{month:02}")))?;
    let next_month = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| ModelError::InvalidPeriod(format!("{year}-{month:02}")))?;
    let last = next_month
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| ModelError::InvalidPeriod(format!("{year}-{month:02}")))?;

    let days: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();

    Ok(MonthGrid {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
        trailing_blanks: 6 - last.weekday().num_days_from_sunday(),
    })
}
