//! Monte Carlo equity simulation.
//!
//! Each trial deals every opponent two hole cards and completes the board
//! from the cards nobody holds, in a single draw without replacement. Hero
//! wins the trial by beating the strongest opponent and ties by matching it.
//! Equity is `(wins + ties / 2) / trials`.
//!
//! Trials run in batches. Every batch gets its own `StdRng` seeded from the
//! caller's random source, batches may run on rayon, and batch tallies are
//! summed once all of them finish.

use std::cmp::Ordering;
use std::ops::Add;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::config::EquityConfig;
use crate::cards::{unique_mask, Card, Deck};
use crate::eval::{Evaluator, HandRanker, PackedEvaluator};
use crate::error::{AdvisorError, Result};

/// Win/tie counts over a number of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Trials where hero beat every opponent.
    pub wins: u64,
    /// Trials where hero tied the best opponent.
    pub ties: u64,
    /// Trials played.
    pub trials: u64,
}

impl Tally {
    /// Record the outcome of hero versus the best opponent.
    pub fn record(&mut self, outcome: Ordering) {
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => {}
        }
        self.trials += 1;
    }

    /// Probability of winning, counting ties as half a win.
    pub fn equity(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / self.trials as f64
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }
}

/// The cards dealt in one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// Hole cards for each opponent.
    pub opponents: Vec<[Card; 2]>,
    /// The completed five-card board (known cards first, then the runout).
    pub board: [Card; 5],
}

/// A validated situation to simulate: hero, known board, opponent count and
/// the deck they leave behind.
#[derive(Debug, Clone)]
pub struct Spot {
    hero: [Card; 2],
    board: Vec<Card>,
    opponents: usize,
    deck: Deck,
}

impl Spot {
    /// Validate hero, board and opponent count.
    ///
    /// Hero must hold exactly two cards, the board must have 0, 3, 4 or 5
    /// cards, all cards must be distinct, and the remaining deck must be able
    /// to deal every opponent and complete the board.
    pub fn new(hero: &[Card], board: &[Card], opponents: usize) -> Result<Self> {
        let hero: [Card; 2] = hero.try_into().map_err(|_| {
            AdvisorError::InvalidRequest(format!("hero needs exactly 2 cards, got {}", hero.len()))
        })?;
        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(AdvisorError::InvalidRequest(format!(
                "board must have 0, 3, 4 or 5 cards, got {}",
                board.len()
            )));
        }
        if opponents == 0 {
            return Err(AdvisorError::InvalidRequest("need at least one opponent".into()));
        }

        let known: Vec<Card> = hero.iter().chain(board).copied().collect();
        unique_mask(&known)?;
        let deck = Deck::full().remove_known(&known)?;

        // An overflowing draw is as unsatisfiable as an oversized one
        let runout = 5 - board.len();
        let fits = opponents
            .checked_mul(2)
            .and_then(|holes| holes.checked_add(runout))
            .filter(|&draw| draw <= deck.len());
        if fits.is_none() {
            return Err(AdvisorError::InsufficientCards {
                requested: opponents.saturating_mul(2).saturating_add(runout),
                available: deck.len(),
            });
        }

        Ok(Self {
            hero,
            board: board.to_vec(),
            opponents,
            deck,
        })
    }

    /// Hero's hole cards.
    pub fn hero(&self) -> [Card; 2] {
        self.hero
    }

    /// Known board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Number of opponents.
    pub fn opponents(&self) -> usize {
        self.opponents
    }

    /// Cards left to deal from.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards drawn per trial: two per opponent plus the runout.
    pub fn draw_size(&self) -> usize {
        2 * self.opponents + (5 - self.board.len())
    }

    /// Deal opponents and complete the board.
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Deal> {
        let drawn = self.deck.sample(rng, self.draw_size())?;
        let (holes, runout) = drawn.split_at(2 * self.opponents);

        let mut board = [self.hero[0]; 5];
        for (slot, card) in board.iter_mut().zip(self.board.iter().chain(runout)) {
            *slot = *card;
        }

        Ok(Deal {
            opponents: holes.chunks_exact(2).map(|h| [h[0], h[1]]).collect(),
            board,
        })
    }

    /// Play one trial; `Greater` means hero won.
    pub fn play<E, R>(&self, ranker: &E, rng: &mut R) -> Result<Ordering>
    where
        E: HandRanker,
        R: Rng + ?Sized,
    {
        let deal = self.deal(rng)?;

        // Slots 0-1 hold the hole cards being scored, 2-6 the board
        let mut hand = [self.hero[0]; 7];
        hand[1] = self.hero[1];
        hand[2..].copy_from_slice(&deal.board);
        let hero = ranker.strength(&hand)?;

        let mut best = None;
        for hole in &deal.opponents {
            hand[..2].copy_from_slice(hole);
            let strength = ranker.strength(&hand)?;
            best = Some(best.map_or(strength, |b: E::Strength| b.max(strength)));
        }

        Ok(best.map_or(Ordering::Greater, |b| hero.cmp(&b)))
    }

    /// Play `trials` trials from one random stream.
    pub fn run<E, R>(&self, ranker: &E, trials: u64, rng: &mut R) -> Result<Tally>
    where
        E: HandRanker,
        R: Rng + ?Sized,
    {
        let mut tally = Tally::default();
        for _ in 0..trials {
            tally.record(self.play(ranker, rng)?);
        }
        Ok(tally)
    }
}

/// Monte Carlo equity estimator.
///
/// Heads-up spots are scored with the heads-up ranker (the reference
/// [`Evaluator`] by default); spots with two or more opponents use the
/// multiway ranker ([`PackedEvaluator`] by default).
///
/// # Example
/// ```
/// use holdem_advisor::cards::Card;
/// use holdem_advisor::equity::{EquityConfig, EquitySimulator};
///
/// let hero = Card::parse_all(&["Ah", "Ad"]).unwrap();
/// let simulator = EquitySimulator::new(EquityConfig::default().with_seed(1));
/// let equity = simulator.estimate(&hero, &[], 1).unwrap();
/// assert!(equity > 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct EquitySimulator<H = Evaluator, M = PackedEvaluator> {
    config: EquityConfig,
    heads_up: H,
    multiway: M,
    /// Dedicated pool for an explicit thread count of 2 or more, built once
    /// and shared by clones.
    pool: Option<Arc<ThreadPool>>,
}

impl EquitySimulator {
    /// Create a simulator with the default rankers.
    pub fn new(config: EquityConfig) -> Self {
        Self::with_rankers(config, Evaluator::new(), PackedEvaluator::new())
    }
}

impl Default for EquitySimulator {
    fn default() -> Self {
        Self::new(EquityConfig::default())
    }
}

impl<H: HandRanker, M: HandRanker> EquitySimulator<H, M> {
    /// Create a simulator with custom rankers.
    pub fn with_rankers(config: EquityConfig, heads_up: H, multiway: M) -> Self {
        let pool = match config.num_threads {
            Some(threads) if threads > 1 => {
                match ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => Some(Arc::new(pool)),
                    Err(e) => {
                        log::warn!("could not build {}-thread pool, using the global pool: {}", threads, e);
                        None
                    }
                }
            }
            _ => None,
        };

        Self {
            config,
            heads_up,
            multiway,
            pool,
        }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Estimate equity with the configured trial budget and seed.
    ///
    /// Without a configured seed the estimate draws from fresh entropy and
    /// varies between runs.
    pub fn estimate(&self, hero: &[Card], board: &[Card], opponents: usize) -> Result<f64> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let trials = self.config.trials_for(opponents);
        Ok(self.simulate(hero, board, opponents, trials, &mut rng)?.equity())
    }

    /// Run `trials` trials drawing batch seeds from `rng`.
    ///
    /// The same `rng` state always yields the same tally, whatever the
    /// thread configuration.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        hero: &[Card],
        board: &[Card],
        opponents: usize,
        trials: u64,
        rng: &mut R,
    ) -> Result<Tally> {
        self.config.validate()?;
        if trials == 0 {
            return Err(AdvisorError::InvalidRequest("trials must be positive".into()));
        }
        let spot = Spot::new(hero, board, opponents)?;

        let start = Instant::now();
        let batches = self.plan_batches(trials, rng);
        let tally = if opponents == 1 {
            self.run_batches(&spot, &self.heads_up, &batches)?
        } else {
            self.run_batches(&spot, &self.multiway, &batches)?
        };

        log::debug!(
            "{} vs {} opponent(s) on [{}]: {} trials in {} batches, {} wins, {} ties, equity {:.4} ({:.3}s)",
            spot.hero.iter().map(|c| c.to_string()).collect::<String>(),
            opponents,
            spot.board.iter().map(|c| c.to_string()).collect::<String>(),
            tally.trials,
            batches.len(),
            tally.wins,
            tally.ties,
            tally.equity(),
            start.elapsed().as_secs_f64(),
        );

        Ok(tally)
    }

    /// Split the trial budget into `(seed, trials)` batches.
    fn plan_batches<R: Rng + ?Sized>(&self, trials: u64, rng: &mut R) -> Vec<(u64, u64)> {
        let mut batches = Vec::with_capacity(trials.div_ceil(self.config.batch_size) as usize);
        let mut remaining = trials;
        while remaining > 0 {
            let size = remaining.min(self.config.batch_size);
            batches.push((rng.gen::<u64>(), size));
            remaining -= size;
        }
        batches
    }

    fn run_batches<E: HandRanker>(&self, spot: &Spot, ranker: &E, batches: &[(u64, u64)]) -> Result<Tally> {
        let run_batch = |&(seed, size): &(u64, u64)| -> Result<Tally> {
            let mut rng = StdRng::seed_from_u64(seed);
            let tally = spot.run(ranker, size, &mut rng)?;
            log::trace!("batch {:#018x}: {:?}", seed, tally);
            Ok(tally)
        };

        let tallies: Vec<Tally> = match (self.config.num_threads, &self.pool) {
            (Some(0) | Some(1), _) => batches.iter().map(run_batch).collect::<Result<_>>()?,
            (_, Some(pool)) => {
                pool.install(|| batches.par_iter().map(run_batch).collect::<Result<_>>())?
            }
            (_, None) => batches.par_iter().map(run_batch).collect::<Result<_>>()?,
        };

        Ok(tallies.into_iter().fold(Tally::default(), |acc, t| acc + t))
    }
}
