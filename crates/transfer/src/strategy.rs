use core::str::FromStr;

use serde::{Deserialize, Serialize};

use rebalance_core::{DomainError, DomainResult};

/// Smallest RF surplus worth moving; smaller positive caps are raised to it.
pub const MIN_TRANSFER_BATCH: u32 = 2;

/// Allocation strategy selected by the caller.
///
/// Caps and minimums are fixed per strategy and not independently tunable.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Option A: RF surplus capped at 20% of net stock.
    #[default]
    ConservativeA,
    /// Option B: RF surplus capped at 50% of net stock; slow sellers divest first.
    EnhancedB,
}

impl Strategy {
    /// Build a strategy from its RF surplus cap, in percent of net stock.
    pub fn from_cap_percent(percent: u32) -> DomainResult<Self> {
        match percent {
            20 => Ok(Strategy::ConservativeA),
            50 => Ok(Strategy::EnhancedB),
            other => Err(DomainError::configuration(format!(
                "unsupported RF surplus cap {other}% (expected 20 or 50)"
            ))),
        }
    }

    /// RF surplus cap in percent of net stock.
    pub fn rf_cap_percent(self) -> u32 {
        match self {
            Strategy::ConservativeA => 20,
            Strategy::EnhancedB => 50,
        }
    }

    /// `ceil(cap% × net_stock)`, computed in integers.
    pub fn rf_cap(self, net_stock: u32) -> u32 {
        let scaled = u64::from(net_stock) * u64::from(self.rf_cap_percent());
        u32::try_from(scaled.div_ceil(100)).unwrap_or(u32::MAX)
    }

    /// Whether transfer-out sources are ordered by ascending sales velocity
    /// rather than by descending available quantity.
    pub fn orders_by_velocity(self) -> bool {
        matches!(self, Strategy::EnhancedB)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::ConservativeA => "conservative_a",
            Strategy::EnhancedB => "enhanced_b",
        }
    }
}

impl core::fmt::Display for Strategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = DomainError;

    /// Accepts a strategy name (`a`, `conservative`, `conservative_a`, `b`,
    /// `enhanced`, `enhanced_b`) or a cap percentage (`20`, `50%`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "a" | "option_a" | "conservative" | "conservative_a" => Ok(Strategy::ConservativeA),
            "b" | "option_b" | "enhanced" | "enhanced_b" => Ok(Strategy::EnhancedB),
            other => {
                let percent = other
                    .strip_suffix('%')
                    .unwrap_or(other)
                    .parse::<u32>()
                    .map_err(|_| {
                        DomainError::configuration(format!("unrecognized strategy '{}'", s.trim()))
                    })?;
                Strategy::from_cap_percent(percent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_round_up() {
        assert_eq!(Strategy::ConservativeA.rf_cap(100), 20);
        assert_eq!(Strategy::EnhancedB.rf_cap(100), 50);
        assert_eq!(Strategy::ConservativeA.rf_cap(11), 3);
        assert_eq!(Strategy::EnhancedB.rf_cap(3), 2);
        assert_eq!(Strategy::ConservativeA.rf_cap(0), 0);
    }

    #[test]
    fn cap_does_not_overflow_for_huge_stock() {
        assert_eq!(Strategy::EnhancedB.rf_cap(u32::MAX), u32::MAX / 2 + 1);
    }

    #[test]
    fn parses_names_and_percentages() {
        assert_eq!("A".parse::<Strategy>().unwrap(), Strategy::ConservativeA);
        assert_eq!("Conservative-A".parse::<Strategy>().unwrap(), Strategy::ConservativeA);
        assert_eq!("enhanced".parse::<Strategy>().unwrap(), Strategy::EnhancedB);
        assert_eq!(" 50% ".parse::<Strategy>().unwrap(), Strategy::EnhancedB);
        assert_eq!("20".parse::<Strategy>().unwrap(), Strategy::ConservativeA);
    }

    #[test]
    fn unknown_strategy_is_a_configuration_error() {
        for bad in ["c", "35", "35%", ""] {
            match bad.parse::<Strategy>().unwrap_err() {
                DomainError::Configuration(_) => {}
                other => panic!("Expected Configuration error for {bad:?}, got {other:?}"),
            }
        }
        assert!(Strategy::from_cap_percent(30).is_err());
    }
}
