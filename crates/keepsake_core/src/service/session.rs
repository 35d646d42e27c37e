//! Transient per-session view state.
//!
//! # Responsibility
//! - Track whether the special-day splash was already dismissed this
//!   session.
//!
//! # Invariants
//! - Never persisted; a new session (not a mere restart of the view
//!   tree) starts with the flag cleared.

use crate::clock::{is_splash_day, Clock};

/// In-memory session flags owned by the application shell.
#[derive(Debug, Default)]
pub struct SessionState {
    splash_dismissed: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to show the celebratory splash before normal content:
    /// today is a splash day and it was not dismissed yet this session.
    pub fn should_show_splash<C: Clock>(&self, clock: &C) -> bool {
        is_splash_day(clock) && !self.splash_dismissed
    }

    /// Marks the splash dismissed for the rest of this session.
    pub fn dismiss_splash(&mut self) {
        self.splash_dismissed = true;
    }

    /// Clears session flags; used by debug tooling when changing the
    /// effective date so the splash can replay.
    pub fn reset(&mut self) {
        self.splash_dismissed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock_on(y: i32, m: u32, d: u32) -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn splash_shows_once_per_session_on_special_days() {
        let valentines = clock_on(2025, 2, 14);
        let mut session = SessionState::new();

        assert!(session.should_show_splash(&valentines));
        session.dismiss_splash();
        assert!(!session.should_show_splash(&valentines));

        session.reset();
        assert!(session.should_show_splash(&valentines));
    }

    #[test]
    fn splash_never_shows_on_ordinary_days() {
        let ordinary = clock_on(2025, 7, 3);
        let session = SessionState::new();
        assert!(!session.should_show_splash(&ordinary));
    }
}
