//! Reward sources: where a trial's click/no-click outcome comes from.
//!
//! The simulator treats rewards as an external collaborator behind the
//! [`RewardSource`] trait: given a 0-based trial index and an arm index,
//! return `0.0` or `1.0`.  Two implementations are provided:
//!
//! - [`RewardTable`]: a precomputed per-trial-per-arm outcome table
//!   (dataset replay: every arm's counterfactual outcome is known for
//!   every trial).
//! - [`BernoulliArms`]: on-the-fly draws from a fixed true probability per
//!   arm, seeded for reproducibility.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution};

use crate::SimError;

/// External supplier of binary rewards.
///
/// Each `(trial_index, arm)` pair is requested at most once per simulation;
/// `trial_index` is the 0-based trial counter.
pub trait RewardSource {
    /// Number of arms this source can answer for.
    fn num_arms(&self) -> usize;

    /// The reward for presenting `arm` on trial `trial_index`.
    fn reward(&mut self, trial_index: usize, arm: usize) -> Result<f64, SimError>;
}

/// Precomputed rewards: one row per trial, one column per arm.
///
/// # Example
///
/// ```rust
/// use adsim::{RewardSource, RewardTable};
///
/// let mut table = RewardTable::new(2, vec![vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
/// assert_eq!(table.reward(0, 1).unwrap(), 1.0);
/// assert_eq!(table.reward(1, 0).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardTable {
    num_arms: usize,
    rows: Vec<Vec<f64>>,
}

impl RewardTable {
    /// Build a table from per-trial rows.
    ///
    /// Every row must have exactly `num_arms` entries, each exactly `0.0`
    /// or `1.0`.  The table may be empty (a zero-trial replay).
    pub fn new(num_arms: usize, rows: Vec<Vec<f64>>) -> Result<Self, SimError> {
        for row in &rows {
            if row.len() != num_arms {
                return Err(SimError::ArmCountMismatch {
                    expected: num_arms,
                    actual: row.len(),
                });
            }
            for (arm, &r) in row.iter().enumerate() {
                if r != 0.0 && r != 1.0 {
                    return Err(SimError::InvalidReward { arm, reward: r });
                }
            }
        }
        Ok(Self { num_arms, rows })
    }

    /// Number of trials this table can answer for.
    pub fn num_trials(&self) -> usize {
        self.rows.len()
    }
}

impl RewardSource for RewardTable {
    fn num_arms(&self) -> usize {
        self.num_arms
    }

    fn reward(&mut self, trial_index: usize, arm: usize) -> Result<f64, SimError> {
        if arm >= self.num_arms {
            return Err(SimError::UnknownArm {
                arm,
                arms: self.num_arms,
            });
        }
        let row = self
            .rows
            .get(trial_index)
            .ok_or(SimError::MissingReward {
                trial: trial_index,
                arm,
            })?;
        Ok(row[arm])
    }
}

/// Synthetic rewards: each arm clicks with a fixed true probability.
///
/// Seedable, and deterministic by default (seed 0), so a simulation over
/// this source replays identically.
#[derive(Debug, Clone)]
pub struct BernoulliArms {
    probs: Vec<f64>,
    dists: Vec<Bernoulli>,
    rng: StdRng,
}

impl BernoulliArms {
    /// Create with a deterministic fixed seed (0).
    pub fn new(probs: &[f64]) -> Result<Self, SimError> {
        Self::with_seed(probs, 0)
    }

    /// Create with a fixed seed (reproducible).
    ///
    /// Every probability must be finite and in `[0, 1]`.
    pub fn with_seed(probs: &[f64], seed: u64) -> Result<Self, SimError> {
        let mut dists = Vec::with_capacity(probs.len());
        for (arm, &p) in probs.iter().enumerate() {
            let dist = Bernoulli::new(p).map_err(|_| SimError::InvalidProbability {
                arm,
                probability: p,
            })?;
            dists.push(dist);
        }
        Ok(Self {
            probs: probs.to_vec(),
            dists,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// The configured true click probabilities, for validation output.
    pub fn true_probs(&self) -> &[f64] {
        &self.probs
    }
}

impl RewardSource for BernoulliArms {
    fn num_arms(&self) -> usize {
        self.dists.len()
    }

    fn reward(&mut self, _trial_index: usize, arm: usize) -> Result<f64, SimError> {
        let dist = self.dists.get(arm).ok_or(SimError::UnknownArm {
            arm,
            arms: self.dists.len(),
        })?;
        Ok(dist.sample(&mut self.rng) as u8 as f64)
    }
}
