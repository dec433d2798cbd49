//! The `solve` boundary: request in, rounded advice out.
//!
//! Callers (HTTP handlers, batch jobs) hand over card tokens and amounts and
//! store or replay the response verbatim. With a fixed seed the call is
//! idempotent.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::policy::{Advice, DecisionPolicy};
use crate::cards::Card;
use crate::equity::{EquityConfig, EquitySimulator};
use crate::error::{AdvisorError, Result};

fn default_villains() -> usize {
    1
}

/// A request for advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Hero's two hole cards, e.g. `["Ah", "Kh"]`.
    pub hero_cards: Vec<String>,

    /// Known board cards (0, 3, 4 or 5).
    #[serde(default)]
    pub board_cards: Vec<String>,

    /// Current pot.
    pub pot_size: f64,

    /// Bet hero is facing; 0 when checked to.
    pub facing_bet: f64,

    /// Number of opponents.
    #[serde(default = "default_villains")]
    pub num_villains: usize,

    /// Table position; carried along, not used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Street name; carried along, not used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

impl SolveRequest {
    /// A heads-up request with no board and no context.
    pub fn new<S: Into<String>>(hero_cards: [S; 2], pot_size: f64, facing_bet: f64) -> Self {
        Self {
            hero_cards: hero_cards.into_iter().map(Into::into).collect(),
            board_cards: Vec::new(),
            pot_size,
            facing_bet,
            num_villains: 1,
            position: None,
            street: None,
        }
    }

    /// Builder method: set the board.
    pub fn with_board<S: Into<String>>(mut self, board: impl IntoIterator<Item = S>) -> Self {
        self.board_cards = board.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set the number of opponents.
    pub fn with_villains(mut self, villains: usize) -> Self {
        self.num_villains = villains;
        self
    }

    /// Check amounts and opponent count.
    pub fn validate(&self) -> Result<()> {
        if !self.pot_size.is_finite() || self.pot_size <= 0.0 {
            return Err(AdvisorError::InvalidRequest(format!(
                "pot_size must be positive, got {}",
                self.pot_size
            )));
        }
        if !self.facing_bet.is_finite() || self.facing_bet < 0.0 {
            return Err(AdvisorError::InvalidRequest(format!(
                "facing_bet must be non-negative, got {}",
                self.facing_bet
            )));
        }
        if self.num_villains == 0 {
            return Err(AdvisorError::InvalidRequest("num_villains must be at least 1".into()));
        }
        Ok(())
    }
}

/// Rounded advice returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// Win probability, 3 decimals.
    pub equity: f64,
    /// Break-even probability, 3 decimals.
    pub pot_odds: f64,
    /// Recommended action.
    pub advice: Advice,
    /// Bet or raise amount, 2 decimals; only for `bet` and `raise`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raise_size: Option<f64>,
}

/// Combined configuration for the solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Simulation settings.
    pub equity: EquityConfig,
    /// Decision constants.
    pub policy: DecisionPolicy,
}

impl AdvisorConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AdvisorError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AdvisorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.equity.validate()?;
        self.policy.validate()
    }
}

/// Equity simulator plus decision policy.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    simulator: EquitySimulator,
    policy: DecisionPolicy,
}

impl Solver {
    /// Create a solver from a configuration.
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            simulator: EquitySimulator::new(config.equity),
            policy: config.policy,
        }
    }

    /// Get reference to the simulator.
    pub fn simulator(&self) -> &EquitySimulator {
        &self.simulator
    }

    /// Get reference to the decision policy.
    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Solve with the configured seed, or fresh entropy if none is set.
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveResponse> {
        let mut rng = match self.simulator.config().seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.solve_with_rng(request, &mut rng)
    }

    /// Solve drawing all randomness from `rng`.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        request: &SolveRequest,
        rng: &mut R,
    ) -> Result<SolveResponse> {
        request.validate()?;
        let hero = Card::parse_all(&request.hero_cards)?;
        let board = Card::parse_all(&request.board_cards)?;

        let trials = self.simulator.config().trials_for(request.num_villains);
        let equity = self
            .simulator
            .simulate(&hero, &board, request.num_villains, trials, rng)?
            .equity();

        let decision = self.policy.decide(equity, request.pot_size, request.facing_bet);

        Ok(SolveResponse {
            equity: round_to(equity, 3),
            pot_odds: round_to(decision.pot_odds, 3),
            advice: decision.advice,
            raise_size: decision.raise_size.map(|size| round_to(size, 2)),
        })
    }
}

/// Solve one request with default settings and an unseeded random source.
pub fn solve(request: &SolveRequest) -> Result<SolveResponse> {
    Solver::default().solve(request)
}

/// Round to a number of decimal places for presentation.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_solver(seed: u64) -> Solver {
        Solver::new(AdvisorConfig {
            equity: EquityConfig::default().with_seed(seed),
            policy: DecisionPolicy::default(),
        })
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.33333, 3), 0.333);
        assert_eq!(round_to(0.6666, 3), 0.667);
        assert_eq!(round_to(75.0, 2), 75.0);
        assert_eq!(round_to(12.3456, 2), 12.35);
    }

    #[test]
    fn test_request_json_defaults() {
        let request: SolveRequest = serde_json::from_str(
            r#"{"hero_cards": ["Ah", "Kh"], "pot_size": 40, "facing_bet": 20, "position": "BTN"}"#,
        )
        .unwrap();
        assert!(request.board_cards.is_empty());
        assert_eq!(request.num_villains, 1);
        assert_eq!(request.position.as_deref(), Some("BTN"));
        assert_eq!(request.street, None);
    }

    #[test]
    fn test_unbet_pot_always_bets() {
        let request = SolveRequest::new(["7h", "2s"], 100.0, 0.0);
        let response = seeded_solver(1).solve(&request).unwrap();
        assert_eq!(response.advice, Advice::Bet);
        assert_eq!(response.raise_size, Some(75.0));
        assert_eq!(response.pot_odds, 0.0);
    }

    #[test]
    fn test_strong_hand_raises_large_bet() {
        let request = SolveRequest::new(["Ah", "As"], 40.0, 20.0);
        let response = seeded_solver(2).solve(&request).unwrap();
        assert_eq!(response.pot_odds, 0.333);
        assert_eq!(response.advice, Advice::Raise);
        assert_eq!(response.raise_size, Some(80.0));
        assert!(response.equity > 0.8);
    }

    #[test]
    fn test_weak_hand_folds() {
        // Hero plays the board; any spade, ten or pair beats it
        let request = SolveRequest::new(["2c", "3d"], 40.0, 20.0)
            .with_board(["As", "Ks", "Qs", "Js", "9h"])
            .with_villains(2);
        let response = seeded_solver(3).solve(&request).unwrap();
        assert!(response.equity < 0.383, "equity {}", response.equity);
        assert_eq!(response.advice, Advice::Fold);
        assert_eq!(response.raise_size, None);
    }

    #[test]
    fn test_response_json_omits_missing_size() {
        let response = SolveResponse {
            equity: 0.512,
            pot_odds: 0.2,
            advice: Advice::Call,
            raise_size: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["advice"], "call");
        assert!(json.get("raise_size").is_none());
    }

    #[test]
    fn test_seeded_solve_is_idempotent() {
        let request = SolveRequest::new(["Td", "9d"], 60.0, 30.0)
            .with_board(["8d", "2c", "Kd"])
            .with_villains(3);
        let solver = seeded_solver(21);
        assert_eq!(solver.solve(&request).unwrap(), solver.solve(&request).unwrap());
    }

    #[test]
    fn test_request_errors() {
        let solver = seeded_solver(0);

        let bad_card = SolveRequest::new(["Ah", "1h"], 10.0, 0.0);
        assert_eq!(
            solver.solve(&bad_card).unwrap_err(),
            AdvisorError::InvalidCard("1h".into())
        );

        let dup = SolveRequest::new(["Ah", "Ah"], 10.0, 0.0);
        assert!(matches!(solver.solve(&dup), Err(AdvisorError::DuplicateCard(_))));

        let one_card = SolveRequest {
            hero_cards: vec!["Ah".into()],
            ..SolveRequest::new(["Ah", "Kd"], 10.0, 0.0)
        };
        assert!(matches!(solver.solve(&one_card), Err(AdvisorError::InvalidRequest(_))));

        for (pot, bet) in [(0.0, 0.0), (-5.0, 1.0), (10.0, -1.0), (f64::NAN, 0.0)] {
            let request = SolveRequest::new(["Ah", "Kd"], pot, bet);
            assert!(
                matches!(solver.solve(&request), Err(AdvisorError::InvalidRequest(_))),
                "pot {pot} bet {bet}"
            );
        }

        let nobody = SolveRequest::new(["Ah", "Kd"], 10.0, 0.0).with_villains(0);
        assert!(matches!(solver.solve(&nobody), Err(AdvisorError::InvalidRequest(_))));

        let crowd = SolveRequest::new(["Ah", "Kd"], 10.0, 0.0).with_villains(30);
        assert!(matches!(solver.solve(&crowd), Err(AdvisorError::InsufficientCards { .. })));
    }

    #[test]
    fn test_absurd_villain_count_from_json() {
        let solver = seeded_solver(4);
        for villains in ["9223372036854775808", "18446744073709551615", "24"] {
            let request: SolveRequest = serde_json::from_str(&format!(
                r#"{{"hero_cards": ["7h", "2s"], "pot_size": 40, "facing_bet": 20, "num_villains": {}}}"#,
                villains
            ))
            .unwrap();
            assert!(
                matches!(solver.solve(&request), Err(AdvisorError::InsufficientCards { .. })),
                "{villains} villains"
            );
        }
    }

    #[test]
    fn test_config_from_json() {
        let config = AdvisorConfig::from_json_str(
            r#"{"equity": {"heads_up_trials": 100, "seed": 5}, "policy": {"equity_margin": 0.1}}"#,
        )
        .unwrap();
        assert_eq!(config.equity.heads_up_trials, 100);
        assert_eq!(config.equity.multiway_trials, 3000);
        assert_eq!(config.policy.equity_margin, 0.1);
        assert_eq!(config.policy.open_bet_fraction, 0.75);

        assert!(matches!(
            AdvisorConfig::from_json_str(r#"{"equity": {"batch_size": 0}}"#),
            Err(AdvisorError::Config(_))
        ));
        assert!(matches!(
            AdvisorConfig::from_json_str("not json"),
            Err(AdvisorError::Config(_))
        ));
        assert!(matches!(
            AdvisorConfig::from_json_file("/nonexistent/advisor.json"),
            Err(AdvisorError::Config(_))
        ));
    }

    #[test]
    fn test_unseeded_solve_runs() {
        let request = SolveRequest::new(["Kc", "Kd"], 30.0, 10.0);
        let response = solve(&request).unwrap();
        assert!((0.0..=1.0).contains(&response.equity));
        assert_eq!(response.pot_odds, 0.25);
        assert_eq!(response.advice, Advice::Call);
    }
}
