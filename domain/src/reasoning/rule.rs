//! Agreement rules for consensus
//!
//! A perspective "agrees" with a synthesis when it does not flag an
//! irreconcilable conflict. The rule decides how many agreeing
//! perspectives are enough.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How many perspectives must agree for a synthesis to stand
///
/// # Example
///
/// ```
/// use edrr_domain::reasoning::AgreementRule;
///
/// let strict = AgreementRule::Unanimous;
/// assert!(strict.is_satisfied(3, 3));
/// assert!(!strict.is_satisfied(2, 3)); // one veto is enough
///
/// let lenient = AgreementRule::Majority;
/// assert!(lenient.is_satisfied(2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgreementRule {
    /// No perspective may flag a conflict
    #[default]
    Unanimous,

    /// More than half must agree
    Majority,

    /// At least n perspectives must agree
    AtLeast(usize),

    /// At least this percentage must agree (0-100)
    Percentage(u8),
}

impl AgreementRule {
    /// Check the rule given the agreeing count and the total perspectives
    pub fn is_satisfied(&self, agreeing: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        agreeing >= self.min_agreeing(total)
    }

    /// Minimum number of agreeing perspectives for `total`
    pub fn min_agreeing(&self, total: usize) -> usize {
        match self {
            AgreementRule::Unanimous => total,
            AgreementRule::Majority => total / 2 + 1,
            AgreementRule::AtLeast(n) => *n,
            AgreementRule::Percentage(p) => (total as f64 * (*p as f64 / 100.0)).ceil() as usize,
        }
    }

    pub fn description(&self) -> String {
        match self {
            AgreementRule::Unanimous => "unanimous (no conflicts)".to_string(),
            AgreementRule::Majority => "majority (more than half)".to_string(),
            AgreementRule::AtLeast(n) => format!("at least {} agreeing", n),
            AgreementRule::Percentage(p) => format!("at least {}% agreeing", p),
        }
    }
}

impl std::fmt::Display for AgreementRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for AgreementRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let unknown = || DomainError::UnknownRule(s.to_string());

        match lower.as_str() {
            "unanimous" => Ok(AgreementRule::Unanimous),
            "majority" => Ok(AgreementRule::Majority),
            v if v.starts_with("atleast:") || v.starts_with("at_least:") => {
                let n = v
                    .split(':')
                    .nth(1)
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(unknown)?;
                Ok(AgreementRule::AtLeast(n))
            }
            v if v.starts_with("percentage:") || v.ends_with('%') => {
                let p = v
                    .trim_start_matches("percentage:")
                    .trim_end_matches('%')
                    .parse::<u8>()
                    .ok()
                    .filter(|p| *p <= 100)
                    .ok_or_else(unknown)?;
                Ok(AgreementRule::Percentage(p))
            }
            _ => Err(unknown()),
        }
    }
}
