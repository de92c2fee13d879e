//! Catch streak and its scoring bonus

use crate::consts::{CATCH_POINTS, COMBO_BONUS_CAP, COMBO_STEP_POINTS, COMBO_TIMEOUT_MS};

/// Consecutive-catch streak with idle timeout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboLedger {
    streak: u32,
    last_catch_ms: Option<f64>,
}

impl ComboLedger {
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_catch_ms(&self) -> Option<f64> {
        self.last_catch_ms
    }

    /// Drop the streak if the last catch is older than the timeout.
    /// Returns true when a live streak was reset.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        let idle = match self.last_catch_ms {
            Some(last) => now_ms - last > COMBO_TIMEOUT_MS,
            None => true,
        };
        if idle && self.streak > 0 {
            self.streak = 0;
            return true;
        }
        false
    }

    /// Count a catch at `now_ms`, returns the new streak
    pub fn record_catch(&mut self, now_ms: f64) -> u32 {
        self.streak += 1;
        self.last_catch_ms = Some(now_ms);
        self.streak
    }

    /// A theft breaks the streak regardless of timing.
    /// Returns true when there was a streak to break.
    pub fn break_streak(&mut self) -> bool {
        let had = self.streak > 0;
        self.streak = 0;
        had
    }

    /// Bonus for the current streak. Only an actual combo (2+) earns one.
    pub fn bonus(&self) -> u64 {
        if self.streak < 2 {
            return 0;
        }
        (self.streak as u64 * COMBO_STEP_POINTS).min(COMBO_BONUS_CAP)
    }

    /// Points for the catch that produced the current streak
    pub fn points(&self) -> u64 {
        CATCH_POINTS + self.bonus()
    }

    /// Whether the multiplier badge is shown
    pub fn shows_multiplier(&self) -> bool {
        self.streak > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(streak: u32) -> ComboLedger {
        let mut ledger = ComboLedger::default();
        for i in 0..streak {
            ledger.record_catch(i as f64);
        }
        ledger
    }

    #[test]
    fn test_points_formula() {
        assert_eq!(ledger_with(1).points(), 10);
        assert_eq!(ledger_with(2).points(), 20);
        assert_eq!(ledger_with(3).points(), 25);
        assert_eq!(ledger_with(10).points(), 60);
        assert_eq!(ledger_with(20).points(), 60);
    }

    #[test]
    fn test_expire_after_timeout() {
        let mut ledger = ComboLedger::default();
        ledger.record_catch(1000.0);
        ledger.record_catch(2500.0);
        assert!(!ledger.expire(4500.0));
        assert_eq!(ledger.streak(), 2);
        assert!(ledger.expire(4500.1));
        assert_eq!(ledger.streak(), 0);
        assert!(!ledger.expire(9000.0));
    }

    #[test]
    fn test_catches_within_timeout_chain() {
        let mut ledger = ComboLedger::default();
        ledger.record_catch(0.0);
        ledger.expire(1999.0);
        assert_eq!(ledger.record_catch(1999.0), 2);
    }

    #[test]
    fn test_theft_breaks_immediately() {
        let mut ledger = ledger_with(5);
        assert!(ledger.break_streak());
        assert_eq!(ledger.streak(), 0);
        assert!(!ledger.break_streak());
    }

    #[test]
    fn test_multiplier_badge_gating() {
        assert!(!ledger_with(1).shows_multiplier());
        assert!(ledger_with(2).shows_multiplier());
    }
}
