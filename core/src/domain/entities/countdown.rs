//! Resend countdown entity for the OTP form.

/// Default cooldown before a new code can be requested (60 seconds)
pub const RESEND_COOLDOWN_SECONDS: u32 = 60;

/// Phase of the resend countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    /// Still counting down; resend is not yet allowed
    Counting,
    /// Cooldown elapsed; resend is allowed
    Ready,
}

/// Countdown gating the "Resend OTP" action
///
/// Starts in `Counting` at the configured cooldown and moves to `Ready`
/// exactly when the remaining seconds reach zero. The entity itself is
/// clock-free: a driver calls [`tick`] once per elapsed second, which keeps
/// the transition rules trivial to test.
///
/// [`tick`]: Self::tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    seconds_remaining: u32,
}

impl Default for ResendCountdown {
    fn default() -> Self {
        Self::new(RESEND_COOLDOWN_SECONDS)
    }
}

impl ResendCountdown {
    /// Creates a countdown with the given number of seconds remaining
    ///
    /// A zero-second countdown starts out `Ready`.
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds_remaining: seconds,
        }
    }

    /// Advances the countdown by one second
    ///
    /// Decrements the remaining seconds; once they reach zero the countdown
    /// is `Ready`. Ticking a `Ready` countdown changes nothing.
    ///
    /// # Returns
    ///
    /// The phase after the tick
    pub fn tick(&mut self) -> CountdownPhase {
        if self.seconds_remaining > 0 {
            self.seconds_remaining -= 1;
        }
        self.phase()
    }

    /// Restarts the countdown at the given number of seconds
    pub fn restart(&mut self, seconds: u32) {
        self.seconds_remaining = seconds;
    }

    /// Current phase of the countdown
    pub fn phase(&self) -> CountdownPhase {
        if self.seconds_remaining == 0 {
            CountdownPhase::Ready
        } else {
            CountdownPhase::Counting
        }
    }

    /// Whether a resend is currently allowed
    pub fn can_resend(&self) -> bool {
        self.phase() == CountdownPhase::Ready
    }

    /// Seconds left until resend becomes allowed
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Remaining time rendered as zero-padded `mm:ss`
    pub fn format_remaining(&self) -> String {
        let minutes = self.seconds_remaining / 60;
        let seconds = self.seconds_remaining % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_countdown_is_counting() {
        let countdown = ResendCountdown::default();
        assert_eq!(countdown.phase(), CountdownPhase::Counting);
        assert_eq!(countdown.seconds_remaining(), RESEND_COOLDOWN_SECONDS);
        assert!(!countdown.can_resend());
    }

    #[test]
    fn test_fifty_nine_ticks_leave_one_second() {
        let mut countdown = ResendCountdown::new(60);
        for _ in 0..59 {
            countdown.tick();
        }
        assert_eq!(countdown.phase(), CountdownPhase::Counting);
        assert_eq!(countdown.seconds_remaining(), 1);
        assert!(!countdown.can_resend());
    }

    #[test]
    fn test_sixtieth_tick_reaches_ready() {
        let mut countdown = ResendCountdown::new(60);
        for _ in 0..59 {
            countdown.tick();
        }
        assert_eq!(countdown.tick(), CountdownPhase::Ready);
        assert!(countdown.can_resend());
        assert_eq!(countdown.seconds_remaining(), 0);
    }

    #[test]
    fn test_tick_when_ready_is_a_no_op() {
        let mut countdown = ResendCountdown::new(0);
        assert!(countdown.can_resend());

        assert_eq!(countdown.tick(), CountdownPhase::Ready);
        assert_eq!(countdown.seconds_remaining(), 0);
    }

    #[test]
    fn test_restart_returns_to_counting() {
        let mut countdown = ResendCountdown::new(1);
        countdown.tick();
        assert!(countdown.can_resend());

        countdown.restart(RESEND_COOLDOWN_SECONDS);
        assert_eq!(countdown.phase(), CountdownPhase::Counting);
        assert_eq!(countdown.seconds_remaining(), RESEND_COOLDOWN_SECONDS);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(ResendCountdown::new(60).format_remaining(), "01:00");
        assert_eq!(ResendCountdown::new(59).format_remaining(), "00:59");
        assert_eq!(ResendCountdown::new(9).format_remaining(), "00:09");
        assert_eq!(ResendCountdown::new(0).format_remaining(), "00:00");
        assert_eq!(ResendCountdown::new(125).format_remaining(), "02:05");
    }
}
