//! Advisory countdown timers.
//!
//! Timers only drive on-screen countdowns and flash alternation; nothing
//! waits on them.

use serde::{Deserialize, Serialize};

/// Below this a countdown counts as expired.
const EXPIRY_EPSILON: f32 = 1e-4;

/// How a test's timer behaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Untimed.
    None,
    /// Counts down once and stops at zero.
    Countdown {
        /// Seconds on entry.
        seconds: f32,
    },
    /// Counts down `initial`, then alternates `on` / `off` forever.
    Blink {
        /// Seconds before the first flash.
        initial: f32,
        /// Seconds the flash stays on.
        on: f32,
        /// Seconds between flashes.
        off: f32,
        /// Entering the test turns the flag off; otherwise it carries over.
        reset_on_entry: bool,
    },
}

/// What happened on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Nothing notable.
    Running,
    /// Reseeded for a newly selected test.
    Started,
    /// A countdown reached zero.
    Expired,
    /// A blink timer flipped its flag.
    Toggled {
        /// Flag value after the flip.
        on: bool,
    },
}

/// Remaining time plus the flash flag for blinking tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TestTimer {
    remaining: f32,
    on: bool,
}

impl TestTimer {
    /// Seconds left, never negative.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Flash state of a blinking test.
    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Advances by `elapsed` seconds.
    ///
    /// On the first frame of a test (`first_frame`) the timer is reseeded
    /// instead of decremented.
    pub fn tick(&mut self, kind: TimerKind, elapsed: f32, first_frame: bool) -> TimerEvent {
        match kind {
            TimerKind::None => TimerEvent::Running,
            TimerKind::Countdown { seconds } => {
                if first_frame {
                    self.remaining = seconds;
                    return TimerEvent::Started;
                }
                self.decrement(elapsed);
                if self.remaining <= 0.0 {
                    TimerEvent::Expired
                } else {
                    TimerEvent::Running
                }
            }
            TimerKind::Blink {
                initial,
                on,
                off,
                reset_on_entry,
            } => {
                if first_frame {
                    self.remaining = initial;
                    if reset_on_entry {
                        self.on = false;
                    }
                    return TimerEvent::Started;
                }
                self.decrement(elapsed);
                if self.remaining > EXPIRY_EPSILON {
                    return TimerEvent::Running;
                }
                self.on = !self.on;
                self.remaining = if self.on { on } else { off };
                TimerEvent::Toggled { on: self.on }
            }
        }
    }

    fn decrement(&mut self, elapsed: f32) {
        self.remaining = (self.remaining - elapsed.max(0.0)).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLASH: TimerKind = TimerKind::Blink {
        initial: 4.0,
        on: 2.0,
        off: 10.0,
        reset_on_entry: true,
    };

    const RISE_FALL: TimerKind = TimerKind::Blink {
        initial: 3.0,
        on: 5.0,
        off: 5.0,
        reset_on_entry: false,
    };

    #[test]
    fn test_countdown_seeds_then_clamps() {
        let mut t = TestTimer::default();
        let kind = TimerKind::Countdown { seconds: 60.0 };
        assert_eq!(t.tick(kind, 5.0, true), TimerEvent::Started);
        assert_eq!(t.remaining(), 60.0);
        assert_eq!(t.tick(kind, 59.0, false), TimerEvent::Running);
        assert_eq!(t.tick(kind, 5.0, false), TimerEvent::Expired);
        assert_eq!(t.remaining(), 0.0);
    }

    #[test]
    fn test_blink_alternates() {
        let mut t = TestTimer::default();
        t.tick(FLASH, 0.0, true);
        assert!(!t.is_on());
        assert_eq!(t.tick(FLASH, 4.0, false), TimerEvent::Toggled { on: true });
        assert_eq!(t.remaining(), 2.0);
        assert_eq!(t.tick(FLASH, 1.0, false), TimerEvent::Running);
        assert_eq!(t.tick(FLASH, 1.0, false), TimerEvent::Toggled { on: false });
        assert_eq!(t.remaining(), 10.0);
    }

    #[test]
    fn test_entry_reset_only_when_requested() {
        let mut t = TestTimer::default();
        t.tick(FLASH, 0.0, true);
        t.tick(FLASH, 4.0, false);
        assert!(t.is_on());

        // rise/fall keeps the phase it inherits
        assert_eq!(t.tick(RISE_FALL, 0.0, true), TimerEvent::Started);
        assert!(t.is_on());
        assert_eq!(t.remaining(), 3.0);
        assert_eq!(t.tick(RISE_FALL, 3.0, false), TimerEvent::Toggled { on: false });

        t.tick(RISE_FALL, 5.0, false);
        assert!(t.is_on());
        t.tick(FLASH, 0.0, true);
        assert!(!t.is_on());
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut t = TestTimer::default();
        let kind = TimerKind::Countdown { seconds: 3.0 };
        t.tick(kind, 0.0, true);
        t.tick(kind, -10.0, false);
        assert_eq!(t.remaining(), 3.0);
    }
}
