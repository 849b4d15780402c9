//! Draw configuration and reveal timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::money::{Money, MAX_AMOUNT};

/// Smallest accepted wager (1.00).
pub const MIN_WAGER: Money = Money::from_cents(100);

/// Wagers move in steps of 0.50.
pub const WAGER_STEP: Money = Money::from_cents(50);

/// Delay after each revealed number.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(1000);

/// What the user asks for: how many numbers, from what range, for what stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawConfig {
    /// Numbers per draw.
    pub count: u32,
    /// Upper bound of the range, inclusive. Must be >= `count`.
    pub max_number: u32,
    pub wager: Money,
}

impl DrawConfig {
    pub fn new(count: u32, max_number: u32, wager: Money) -> Self {
        Self {
            count,
            max_number,
            wager,
        }
    }

    /// Check the constraints the input fields enforce.
    ///
    /// `count > max_number` would make the draw loop forever, so this must
    /// pass before a draw starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if self.max_number < self.count {
            return Err(ConfigError::RangeTooSmall {
                count: self.count,
                max_number: self.max_number,
            });
        }
        if self.wager < MIN_WAGER {
            return Err(ConfigError::WagerTooLow(self.wager));
        }
        if self.wager > MAX_AMOUNT {
            return Err(ConfigError::WagerTooHigh(self.wager));
        }
        if self.wager.cents() % WAGER_STEP.cents() != 0 {
            return Err(ConfigError::WagerStep(self.wager));
        }
        Ok(())
    }
}

/// Classic 6 out of 49 with a 2.00 stake.
impl Default for DrawConfig {
    fn default() -> Self {
        Self::new(6, 49, Money::from_cents(200))
    }
}

/// Pacing of the staged reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    pub interval: Duration,
}

impl RevealTiming {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(ms),
        }
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REVEAL_INTERVAL,
        }
    }
}
