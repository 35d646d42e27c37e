//! Recurring event catalog and derived occurrences.
//!
//! # Responsibility
//! - Hold the static yearly events (anniversary, holiday, birthdays).
//! - Resolve each definition to its next concrete occurrence relative to
//!   the effective clock.
//! - Decompose time elapsed since the relationship start date.
//!
//! # Invariants
//! - `EventOccurrence::days_until >= 0`; an event falling today is kept.
//! - `upcoming_events` ordering is stable: ascending `days_until`,
//!   catalog order on ties.
//! - All date math goes through the injected [`Clock`].

use crate::clock::Clock;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

/// The relationship start date; anchor for anniversary numbering and the
/// time-together countdown.
pub static START_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 2, 25).expect("valid start date"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Anniversary,
    Holiday,
    Birthday,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Anniversary => "anniversary",
            Self::Holiday => "holiday",
            Self::Birthday => "birthday",
        }
    }
}

/// A yearly recurring calendar event.
///
/// `month0` is 0-indexed to match `Datelike::month0`; `day` is 1-based.
/// Definitions are fixed at compile time and not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDefinition {
    pub name: &'static str,
    pub month0: u32,
    pub day: u32,
    pub kind: EventKind,
}

/// The full catalog, in display priority order (used as sort tie-break).
pub const EVENTS: &[EventDefinition] = &[
    EventDefinition {
        name: "Our Anniversary",
        month0: 1,
        day: 25,
        kind: EventKind::Anniversary,
    },
    EventDefinition {
        name: "Valentine's Day",
        month0: 1,
        day: 14,
        kind: EventKind::Holiday,
    },
    EventDefinition {
        name: "Fiona's Birthday",
        month0: 2,
        day: 9,
        kind: EventKind::Birthday,
    },
    EventDefinition {
        name: "Aldo's Birthday",
        month0: 5,
        day: 14,
        kind: EventKind::Birthday,
    },
];

/// A definition resolved against the effective date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOccurrence {
    pub definition: EventDefinition,
    /// Display title; anniversaries get ordinal year numbering.
    pub title: String,
    /// Soonest date on/after today matching the definition.
    pub next_date: NaiveDate,
    pub days_until: u32,
}

/// Elapsed-time breakdown since a fixed start moment.
///
/// `days` is the whole-day remainder after peeling off calendar years;
/// it is intentionally not reduced modulo anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    pub years: i32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Resolves the catalog against the clock and keeps events within reach.
///
/// Events falling today (`days_until == 0`) are included; the upper
/// bound is inclusive too per the `<= within_days` filter.
pub fn upcoming_events<C: Clock>(clock: &C, within_days: u32) -> Vec<EventOccurrence> {
    let today = clock.today();
    let mut occurrences: Vec<EventOccurrence> = EVENTS
        .iter()
        .filter_map(|definition| occurrence_for(definition, today))
        .filter(|occurrence| occurrence.days_until <= within_days)
        .collect();
    // Stable sort keeps catalog order for equal countdowns.
    occurrences.sort_by_key(|occurrence| occurrence.days_until);
    occurrences
}

/// Finds the catalog entry falling on the given 0-indexed month and day.
pub fn event_on(month0: u32, day: u32) -> Option<&'static EventDefinition> {
    EVENTS
        .iter()
        .find(|definition| definition.month0 == month0 && definition.day == day)
}

fn occurrence_for(definition: &EventDefinition, today: NaiveDate) -> Option<EventOccurrence> {
    let next_date = next_occurrence(today, definition.month0, definition.day)?;
    let days_until = next_date
        .signed_duration_since(today)
        .num_days()
        .max(0) as u32;

    let title = match definition.kind {
        EventKind::Anniversary => {
            let years = next_date.year() - START_DATE.year();
            format!("Our {years}{} Anniversary", ordinal_suffix(years))
        }
        _ => definition.name.to_string(),
    };

    Some(EventOccurrence {
        definition: *definition,
        title,
        next_date,
        days_until,
    })
}

/// Soonest date on/after `today` with the given month/day.
///
/// A same-year date already behind today rolls to next year; a Feb 29
/// definition skips years where the day does not exist.
fn next_occurrence(today: NaiveDate, month0: u32, day: u32) -> Option<NaiveDate> {
    (0..=8).find_map(|offset| {
        NaiveDate::from_ymd_opt(today.year() + offset, month0 + 1, day)
            .filter(|candidate| *candidate >= today)
    })
}

/// English ordinal suffix: 11-13 take "th", otherwise by last digit.
pub fn ordinal_suffix(n: i32) -> &'static str {
    let tens = n.rem_euclid(100);
    if (11..=13).contains(&tens) {
        return "th";
    }
    match n.rem_euclid(10) {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Breaks down the time elapsed since `start`.
///
/// Finds the largest whole calendar-year count with `start + years <=
/// now`, then splits the remainder into days/hours/minutes/seconds.
pub fn elapsed_since(start: NaiveDateTime, now: NaiveDateTime) -> Elapsed {
    let mut years = now.year() - start.year();
    let mut last = add_years(start, years);
    if last > now {
        years -= 1;
        last = add_years(start, years);
    }

    let remainder = now - last;
    Elapsed {
        years,
        days: remainder.num_days(),
        hours: remainder.num_hours() % 24,
        minutes: remainder.num_minutes() % 60,
        seconds: remainder.num_seconds() % 60,
    }
}

/// Elapsed time since the relationship start, per the effective clock.
pub fn time_together<C: Clock>(clock: &C) -> Elapsed {
    let start = START_DATE
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();
    elapsed_since(start, clock.now())
}

/// Calendar-year increment preserving month/day.
///
/// A Feb 29 anchor lands on Mar 1 in non-leap target years, matching
/// how the rest of the occurrence math rolls dates forward.
fn add_years(moment: NaiveDateTime, years: i32) -> NaiveDateTime {
    let target_year = moment.year() + years;
    moment.with_year(target_year).unwrap_or_else(|| {
        let rolled = NaiveDate::from_ymd_opt(target_year, 3, 1).unwrap_or(moment.date());
        NaiveDateTime::new(rolled, moment.time())
    })
}

#[cfg(test)]
mod tests {
    use super::{add_years, next_occurrence, ordinal_suffix};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_occurrence_rolls_past_dates_to_next_year() {
        let today = date(2024, 3, 1);
        assert_eq!(next_occurrence(today, 1, 25), Some(date(2025, 2, 25)));
    }

    #[test]
    fn next_occurrence_keeps_today() {
        let today = date(2024, 2, 25);
        assert_eq!(next_occurrence(today, 1, 25), Some(today));
    }

    #[test]
    fn next_occurrence_skips_missing_leap_days() {
        let today = date(2025, 3, 1);
        assert_eq!(next_occurrence(today, 1, 29), Some(date(2028, 2, 29)));
    }

    #[test]
    fn ordinal_suffix_covers_teens_and_digits() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (101, "st"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal_suffix(n), expected, "suffix for {n}");
        }
    }

    #[test]
    fn add_years_maps_leap_anchor_to_march_first() {
        let start = date(2024, 2, 29).and_hms_opt(10, 30, 0).unwrap();
        let shifted = add_years(start, 1);
        assert_eq!(shifted.date(), date(2025, 3, 1));
    }
}
