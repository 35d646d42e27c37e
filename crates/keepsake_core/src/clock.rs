//! Effective clock: the single source of truth for "now".
//!
//! # Responsibility
//! - Resolve the application's current moment, honoring the debug date
//!   override stored under the `debug_date` setting.
//! - Provide the special-day predicates driving the splash screen.
//!
//! # Invariants
//! - Every date-dependent code path consumes a [`Clock`], never the raw
//!   system clock, so an override changes all behavior at once.
//! - The override source is re-read on every `now()` call; nothing is
//!   cached between calls.
//! - A malformed override falls back to real time instead of failing.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use log::warn;

/// Settings key holding the optional `YYYY-MM-DD` override.
pub const DEBUG_DATE_KEY: &str = "debug_date";

/// Anniversary month/day (0-indexed month, matching the event catalog).
const ANNIVERSARY: (u32, u32) = (1, 25);
/// Valentine's Day month/day (0-indexed month).
const VALENTINES: (u32, u32) = (1, 14);

/// Capability producing the application's effective current moment.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// The effective date truncated to day granularity.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Read access to the persisted debug override.
///
/// Implemented by the settings side of the record store; tests can
/// substitute a closure-backed fake.
pub trait OverrideSource {
    fn debug_override(&self) -> Option<String>;
}

impl<S: OverrideSource + ?Sized> OverrideSource for &S {
    fn debug_override(&self) -> Option<String> {
        (**self).debug_override()
    }
}

/// Production clock: real local time unless an override is present.
pub struct EffectiveClock<S: OverrideSource> {
    source: S,
}

impl<S: OverrideSource> EffectiveClock<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: OverrideSource> Clock for EffectiveClock<S> {
    fn now(&self) -> NaiveDateTime {
        match self.source.debug_override() {
            Some(raw) => match parse_override(&raw) {
                Some(moment) => moment,
                None => {
                    warn!(
                        "event=override_parse_failed module=clock status=fallback value={raw}"
                    );
                    Local::now().naive_local()
                }
            },
            None => Local::now().naive_local(),
        }
    }
}

/// Constant-moment clock for tests, demos and deterministic rendering.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Parses an override as a local calendar date at midnight.
///
/// Hyphens are treated as local-date separators; anything that is not a
/// strict `YYYY-MM-DD` is rejected so the caller can fall back.
fn parse_override(raw: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// True when the effective date matches the given 0-indexed month and day.
pub fn is_date_match<C: Clock>(clock: &C, month0: u32, day: u32) -> bool {
    let today = clock.today();
    today.month0() == month0 && today.day() == day
}

/// True on February 14th of any year.
pub fn is_valentines<C: Clock>(clock: &C) -> bool {
    is_date_match(clock, VALENTINES.0, VALENTINES.1)
}

/// True on the anniversary date (February 25th) of any year.
pub fn is_anniversary<C: Clock>(clock: &C) -> bool {
    is_date_match(clock, ANNIVERSARY.0, ANNIVERSARY.1)
}

/// True on days that get the full-screen celebratory splash.
pub fn is_splash_day<C: Clock>(clock: &C) -> bool {
    is_valentines(clock) || is_anniversary(clock)
}

#[cfg(test)]
mod tests {
    use super::{
        is_splash_day, is_valentines, parse_override, Clock, EffectiveClock, OverrideSource,
    };
    use chrono::{Datelike, Local, NaiveDate, Timelike};
    use std::cell::RefCell;

    struct FakeSource(RefCell<Option<String>>);

    impl OverrideSource for FakeSource {
        fn debug_override(&self) -> Option<String> {
            self.0.borrow().clone()
        }
    }

    #[test]
    fn parse_override_yields_local_midnight() {
        let moment = parse_override("2024-02-14").expect("valid override");
        assert_eq!(moment.date(), NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!((moment.hour(), moment.minute(), moment.second()), (0, 0, 0));
    }

    #[test]
    fn parse_override_rejects_garbage() {
        assert!(parse_override("valentines").is_none());
        assert!(parse_override("2024/02/14").is_none());
        assert!(parse_override("2024-13-40").is_none());
    }

    #[test]
    fn override_drives_every_predicate_and_clearing_restores_real_time() {
        let source = FakeSource(RefCell::new(Some("2024-02-14".to_string())));
        let clock = EffectiveClock::new(&source);

        assert!(is_valentines(&clock));
        assert!(is_splash_day(&clock));
        assert_eq!(clock.today().month0(), 1);
        assert_eq!(clock.today().day(), 14);

        *source.0.borrow_mut() = None;
        let real_today = Local::now().naive_local().date();
        assert_eq!(clock.today(), real_today);
    }

    #[test]
    fn malformed_override_falls_back_to_real_time() {
        let source = FakeSource(RefCell::new(Some("not-a-date".to_string())));
        let clock = EffectiveClock::new(&source);
        assert_eq!(clock.today(), Local::now().naive_local().date());
    }
}
