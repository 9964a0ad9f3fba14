//! Countdown primitive standing in for "wait until the duration elapses".
//!
//! A [`Delay`] is advanced with a time budget. It consumes as much of the
//! budget as it needs and reports completion exactly once; the unused part of
//! the budget stays with the caller so the next step can use it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay {
    remaining_ms: u32,
    fired: bool,
}

impl Delay {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            remaining_ms: duration_ms,
            fired: false,
        }
    }

    /// Spend up to `*budget_ms` on this delay.
    ///
    /// Returns true on the call that completes the delay, false before and
    /// after. A zero-length delay completes on the first call even with a
    /// zero budget.
    pub fn advance(&mut self, budget_ms: &mut u32) -> bool {
        if self.fired {
            return false;
        }
        let spent = self.remaining_ms.min(*budget_ms);
        self.remaining_ms -= spent;
        *budget_ms -= spent;
        if self.remaining_ms == 0 {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_done(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_fires_once_and_returns_leftover() {
        let mut delay = Delay::new(100);
        let mut budget = 60;
        assert!(!delay.advance(&mut budget));
        assert_eq!(budget, 0);
        assert_eq!(delay.remaining_ms(), 40);

        let mut budget = 50;
        assert!(delay.advance(&mut budget));
        assert_eq!(budget, 10);

        let mut budget = 50;
        assert!(!delay.advance(&mut budget));
        assert_eq!(budget, 50);
        assert!(delay.is_done());
    }

    #[test]
    fn test_zero_delay_fires_without_budget() {
        let mut delay = Delay::new(0);
        let mut budget = 0;
        assert!(delay.advance(&mut budget));
    }
}
