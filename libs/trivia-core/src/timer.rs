//! Single-shot countdown used for countdowns, quiz questions, answer reveals and
//! whole match rounds.
//!
//! The timer has no clock of its own. The owner advances it by the elapsed time
//! it measured, which keeps every transition synchronous and reproducible.

use std::time::Duration;

/// What a timer reports when advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerSignal {
    Progress {
        /// Remaining share of the duration, 1.0 down to 0.0.
        remaining: f64,
        /// Whole seconds left, rounded up.
        seconds_left: u32,
    },
    /// Emitted exactly once, after which the timer is halted.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Running,
    Expired,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct QuestionTimer {
    duration: Duration,
    elapsed: Duration,
    state: TimerState,
}

impl QuestionTimer {
    /// Start a countdown of `duration`.
    pub fn start(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            state: TimerState::Running,
        }
    }

    /// Advance by `delta`. Returns `None` once the timer is no longer running.
    pub fn advance(&mut self, delta: Duration) -> Option<TimerSignal> {
        if self.state != TimerState::Running {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = TimerState::Expired;
            return Some(TimerSignal::Expired);
        }

        Some(TimerSignal::Progress {
            remaining: self.remaining_fraction(),
            seconds_left: self.seconds_left(),
        })
    }

    /// Halt without expiring. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn has_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    pub fn remaining_fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.remaining().as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn seconds_left(&self) -> u32 {
        let millis = self.remaining().as_millis();
        millis.div_ceil(1000) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn reports_progress_then_expires_once() {
        let mut timer = QuestionTimer::start(ms(1000));

        match timer.advance(ms(250)) {
            Some(TimerSignal::Progress {
                remaining,
                seconds_left,
            }) => {
                assert!((remaining - 0.75).abs() < 1e-9);
                assert_eq!(seconds_left, 1);
            }
            other => panic!("expected progress, got {other:?}"),
        }

        assert_eq!(timer.advance(ms(750)), Some(TimerSignal::Expired));
        assert!(timer.has_expired());
        assert_eq!(timer.advance(ms(100)), None);
        assert_eq!(timer.remaining_fraction(), 0.0);
    }

    #[test]
    fn overshoot_still_expires_once() {
        let mut timer = QuestionTimer::start(ms(300));
        assert_eq!(timer.advance(ms(5000)), Some(TimerSignal::Expired));
        assert_eq!(timer.advance(ms(5000)), None);
    }

    #[test]
    fn stop_is_idempotent_and_prevents_expiry() {
        let mut timer = QuestionTimer::start(ms(500));
        timer.advance(ms(100));
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.has_expired());
        assert_eq!(timer.advance(ms(1000)), None);
    }

    #[test]
    fn stopping_expired_timer_keeps_it_expired() {
        let mut timer = QuestionTimer::start(ms(100));
        timer.advance(ms(100));
        timer.stop();
        assert!(timer.has_expired());
    }

    #[test]
    fn seconds_left_rounds_up() {
        let mut timer = QuestionTimer::start(Duration::from_secs(10));
        assert_eq!(timer.seconds_left(), 10);
        timer.advance(ms(7_100));
        assert_eq!(timer.seconds_left(), 3);
        timer.advance(ms(900));
        assert_eq!(timer.seconds_left(), 2);
    }
}
