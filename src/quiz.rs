//! Quiz scenarios: random preflop spots with the solver's answer attached.
//!
//! Storage of the quiz bank is left to callers; this module only builds
//! scenarios, solves them, and grades answers.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::advisor::{round_to, Advice, SolveRequest, Solver};
use crate::cards::Deck;
use crate::error::Result;

/// Positions a scenario may be dealt from.
pub const POSITIONS: [&str; 6] = ["BTN", "CO", "HJ", "UTG", "SB", "BB"];

/// Facing bet as a fraction of the pot.
pub const BET_FRACTIONS: [f64; 3] = [0.25, 0.5, 0.75];

/// A random preflop spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScenario {
    /// Hero's two hole cards.
    pub hero_cards: [String; 2],
    /// Seat.
    pub position: String,
    /// Pot, a multiple of 5 between 10 and 115.
    pub pot_size: f64,
    /// A quarter, half or three quarters of the pot.
    pub facing_bet: f64,
}

impl QuizScenario {
    /// Deal a random scenario.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        let hero = Deck::full().sample(rng, 2)?;
        let pot_size = (rng.gen_range(2..24) * 5) as f64;
        let fraction = BET_FRACTIONS.choose(rng).copied().unwrap_or(0.5);
        let position = POSITIONS.choose(rng).copied().unwrap_or("BTN");

        Ok(Self {
            hero_cards: [hero[0].to_string(), hero[1].to_string()],
            position: position.to_string(),
            pot_size,
            facing_bet: round_to(fraction * pot_size, 2),
        })
    }

    /// The solver request for this scenario: heads-up, no board.
    pub fn to_request(&self) -> SolveRequest {
        SolveRequest {
            position: Some(self.position.clone()),
            street: Some("preflop".to_string()),
            ..SolveRequest::new(self.hero_cards.clone(), self.pot_size, self.facing_bet)
        }
    }
}

/// A scenario together with the answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizEntry {
    /// The request as sent to the solver.
    #[serde(flatten)]
    pub request: SolveRequest,
    /// Expected action.
    pub advice: Advice,
    /// Expected size for `bet` and `raise`.
    pub raise_size: Option<f64>,
}

impl QuizEntry {
    /// Solve `scenario` and record the answer.
    pub fn solve<R: Rng + ?Sized>(solver: &Solver, scenario: &QuizScenario, rng: &mut R) -> Result<Self> {
        let request = scenario.to_request();
        let response = solver.solve_with_rng(&request, rng)?;
        Ok(Self {
            request,
            advice: response.advice,
            raise_size: response.raise_size,
        })
    }

    /// Deal and solve a fresh random entry.
    pub fn random<R: Rng + ?Sized>(solver: &Solver, rng: &mut R) -> Result<Self> {
        let scenario = QuizScenario::random(rng)?;
        Self::solve(solver, &scenario, rng)
    }
}

/// Whether the user's action matches the answer key.
///
/// The comparison is exact against the lowercase label; any other string,
/// including unknown actions such as `"check"`, is simply wrong.
pub fn grade(entry: &QuizEntry, user_action: &str) -> bool {
    user_action == entry.advice.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::AdvisorConfig;
    use crate::cards::{unique_mask, Card};
    use crate::equity::EquityConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solver() -> Solver {
        Solver::new(AdvisorConfig {
            equity: EquityConfig::default().with_trials(500),
            ..AdvisorConfig::default()
        })
    }

    #[test]
    fn test_random_scenarios_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..300 {
            let scenario = QuizScenario::random(&mut rng).unwrap();
            let hero = Card::parse_all(&scenario.hero_cards).unwrap();
            assert!(unique_mask(&hero).is_ok());

            assert!((10.0..=115.0).contains(&scenario.pot_size));
            assert_eq!(scenario.pot_size % 5.0, 0.0);

            let fraction = scenario.facing_bet / scenario.pot_size;
            assert!(
                BET_FRACTIONS.iter().any(|f| (f - fraction).abs() < 1e-3),
                "bet {} pot {}",
                scenario.facing_bet,
                scenario.pot_size
            );
            assert!(POSITIONS.contains(&scenario.position.as_str()));
        }
    }

    #[test]
    fn test_request_carries_context() {
        let mut rng = StdRng::seed_from_u64(9);
        let scenario = QuizScenario::random(&mut rng).unwrap();
        let request = scenario.to_request();
        assert_eq!(request.position.as_deref(), Some(scenario.position.as_str()));
        assert_eq!(request.street.as_deref(), Some("preflop"));
        assert_eq!(request.num_villains, 1);
        assert!(request.board_cards.is_empty());
    }

    #[test]
    fn test_entry_answers_and_grading() {
        let mut rng = StdRng::seed_from_u64(10);
        let solver = solver();

        for _ in 0..20 {
            let entry = QuizEntry::random(&solver, &mut rng).unwrap();
            // Facing a bet preflop the answer is never an open bet
            assert_ne!(entry.advice, Advice::Bet);
            assert_eq!(entry.raise_size.is_some(), entry.advice == Advice::Raise);

            assert!(grade(&entry, entry.advice.as_str()));
            let wrong = Advice::ALL.into_iter().find(|a| *a != entry.advice).unwrap();
            assert!(!grade(&entry, wrong.as_str()));
        }
    }

    #[test]
    fn test_grade_is_exact() {
        let mut rng = StdRng::seed_from_u64(11);
        let entry = QuizEntry::random(&solver(), &mut rng).unwrap();
        let label = entry.advice.as_str();

        assert!(grade(&entry, label));
        assert!(!grade(&entry, &label.to_uppercase()));
        assert!(!grade(&entry, &format!(" {label}")));
        for other in ["check", "shove", ""] {
            assert!(!grade(&entry, other), "{other:?}");
        }
    }

    #[test]
    fn test_entry_json_is_flat() {
        let mut rng = StdRng::seed_from_u64(12);
        let entry = QuizEntry::random(&solver(), &mut rng).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("hero_cards").is_some());
        assert!(json.get("advice").is_some());
        assert_eq!(json["street"], "preflop");

        let back: QuizEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
