//! Pot-odds decision policy.
//!
//! A fixed heuristic: bet when nobody has bet, otherwise continue only when
//! equity clears the pot odds by a margin, raising against large bets and
//! calling small ones.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advice {
    /// Open the betting.
    Bet,
    /// Match the facing bet.
    Call,
    /// Re-raise over the facing bet.
    Raise,
    /// Give up the hand.
    Fold,
}

impl Advice {
    /// All actions.
    pub const ALL: [Advice; 4] = [Advice::Bet, Advice::Call, Advice::Raise, Advice::Fold];

    /// Lowercase label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Advice::Bet => "bet",
            Advice::Call => "call",
            Advice::Raise => "raise",
            Advice::Fold => "fold",
        }
    }

    /// Whether this action carries a size.
    pub fn is_sized(&self) -> bool {
        matches!(self, Advice::Bet | Advice::Raise)
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Advice {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| AdvisorError::InvalidRequest(format!("unknown action {:?}", s)))
    }
}

/// Outcome of the policy, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Recommended action.
    pub advice: Advice,
    /// Break-even equity for calling.
    pub pot_odds: f64,
    /// Bet or raise amount; present only for `Bet` and `Raise`.
    pub raise_size: Option<f64>,
}

/// Fraction of the final pot that the call contributes, or 0 with no bet.
pub fn pot_odds(pot_size: f64, facing_bet: f64) -> f64 {
    if facing_bet > 0.0 {
        facing_bet / (pot_size + facing_bet)
    } else {
        0.0
    }
}

/// Heuristic constants of the decision rule.
///
/// # Example
/// ```
/// use holdem_advisor::advisor::{Advice, DecisionPolicy};
///
/// let decision = DecisionPolicy::default().decide(0.5, 40.0, 20.0);
/// assert_eq!(decision.advice, Advice::Raise);
/// assert_eq!(decision.raise_size, Some(80.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    /// Equity needed above the pot odds to continue.
    pub equity_margin: f64,

    /// Opening bet as a fraction of the pot.
    pub open_bet_fraction: f64,

    /// Bets at or above this fraction of the pot are raised rather than
    /// called.
    pub raise_threshold_fraction: f64,

    /// Raise size is `pot + raise_bet_multiplier * facing_bet`.
    pub raise_bet_multiplier: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            equity_margin: 0.05,
            open_bet_fraction: 0.75,
            raise_threshold_fraction: 0.5,
            raise_bet_multiplier: 2.0,
        }
    }
}

impl DecisionPolicy {
    /// Create a policy with the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the equity margin.
    pub fn with_equity_margin(mut self, margin: f64) -> Self {
        self.equity_margin = margin;
        self
    }

    /// Builder method: set the opening bet fraction.
    pub fn with_open_bet_fraction(mut self, fraction: f64) -> Self {
        self.open_bet_fraction = fraction;
        self
    }

    /// Builder method: set the call/raise threshold.
    pub fn with_raise_threshold_fraction(mut self, fraction: f64) -> Self {
        self.raise_threshold_fraction = fraction;
        self
    }

    /// Builder method: set the raise multiplier.
    pub fn with_raise_bet_multiplier(mut self, multiplier: f64) -> Self {
        self.raise_bet_multiplier = multiplier;
        self
    }

    /// Decide from unrounded equity, pot and facing bet.
    pub fn decide(&self, equity: f64, pot_size: f64, facing_bet: f64) -> Decision {
        let pot_odds = pot_odds(pot_size, facing_bet);

        let (advice, raise_size) = if facing_bet == 0.0 {
            (Advice::Bet, Some(self.open_bet_fraction * pot_size))
        } else if equity > pot_odds + self.equity_margin {
            if facing_bet < self.raise_threshold_fraction * pot_size {
                (Advice::Call, None)
            } else {
                (Advice::Raise, Some(pot_size + self.raise_bet_multiplier * facing_bet))
            }
        } else {
            (Advice::Fold, None)
        };

        Decision {
            advice,
            pot_odds,
            raise_size,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("equity_margin", self.equity_margin),
            ("open_bet_fraction", self.open_bet_fraction),
            ("raise_threshold_fraction", self.raise_threshold_fraction),
            ("raise_bet_multiplier", self.raise_bet_multiplier),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AdvisorError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
