//! The trial loop: policy → reward source → statistics update, once per
//! trial, strictly sequentially.
//!
//! The simulator is the only component holding global trial state, and the
//! only writer of the [`ArmTable`].  Trials form a strict total order: each
//! selection depends on the exact statistics left by all prior trials, since
//! the confidence-bound score reads `ln(trial_number)` and posterior
//! sampling reads the accumulated Beta parameters.
//!
//! A reward-source failure is fatal and aborts the run; the simulator never
//! speculates with a missing reward, because a skipped trial would break the
//! `pulls`-vs-`trial_number` relationship.  Per-trial updates are atomic, so
//! an aborted run leaves the statistics at their last committed value, safe
//! to inspect.

use crate::{
    best_arm, ArmStats, ArmTable, BestArmMetric, RewardSource, SelectionNote, SelectionPolicy,
    SimError,
};

/// Lifecycle of a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimState {
    NotStarted,
    Running,
    Completed,
}

/// One decision-and-reward event, appended to the run history.
///
/// The history is write-only during a run: policies act solely on the
/// current [`ArmStats`], never on past records.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialRecord {
    /// 1-based trial number.
    pub trial_number: u64,
    /// The arm presented on this trial.
    pub arm: usize,
    /// The observed reward (`0.0` or `1.0`).
    pub reward: f64,
    /// Why the policy chose this arm.
    pub note: SelectionNote,
}

/// Final snapshot of a completed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Per-arm statistics at completion.
    pub stats: ArmTable,
    /// The ordered sequence of all trials.
    pub history: Vec<TrialRecord>,
    /// The policy's declared best-arm estimate.
    pub best_arm: usize,
    /// The convention `best_arm` was judged by.
    pub metric: BestArmMetric,
}

/// Sequential bandit simulation over one arm table.
///
/// State machine `NotStarted → Running → Completed`; single-use unless
/// explicitly [`reset`][Simulator::reset].
///
/// # Example
///
/// ```rust
/// use adsim::{ConfidenceBound, ConfidenceConfig, RewardTable, Simulator};
///
/// let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
/// let mut rewards = RewardTable::new(2, vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
///
/// let mut sim = Simulator::new(2);
/// let result = sim.run(2, &mut policy, &mut rewards).unwrap();
///
/// // The first two trials explore each arm once, in index order.
/// assert_eq!(result.history[0].arm, 0);
/// assert_eq!(result.history[1].arm, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    table: ArmTable,
    history: Vec<TrialRecord>,
    state: SimState,
}

impl Simulator {
    /// Create a simulator over `num_arms` arms, all counters zero.
    pub fn new(num_arms: usize) -> Self {
        Self {
            table: ArmTable::new(num_arms),
            history: Vec::new(),
            state: SimState::NotStarted,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// The per-arm statistics at their last committed value.
    pub fn stats(&self) -> &[ArmStats] {
        self.table.arms()
    }

    /// The trial records committed so far.
    pub fn history(&self) -> &[TrialRecord] {
        &self.history
    }

    /// Drive `num_trials` trials to completion.
    ///
    /// For each trial number `1..=num_trials`: ask `policy` to select an arm
    /// from the current statistics, ask `source` for the reward at
    /// `(trial_number - 1, arm)`, record it, and append a [`TrialRecord`].
    /// `run(0, ..)` completes immediately.
    ///
    /// Fails up front with [`SimError::AlreadyCompleted`] on a completed
    /// simulator, [`SimError::NoArms`] on an empty arm table, and
    /// [`SimError::ArmCountMismatch`] when `source` disagrees on arm count.
    /// Any mid-run failure aborts with the statistics left at their last
    /// committed value and the state at `Running`.
    pub fn run<P, S>(
        &mut self,
        num_trials: u64,
        policy: &mut P,
        source: &mut S,
    ) -> Result<SimulationResult, SimError>
    where
        P: SelectionPolicy,
        S: RewardSource,
    {
        if self.state == SimState::Completed {
            return Err(SimError::AlreadyCompleted);
        }
        if self.table.is_empty() {
            return Err(SimError::NoArms);
        }
        if source.num_arms() != self.table.len() {
            return Err(SimError::ArmCountMismatch {
                expected: self.table.len(),
                actual: source.num_arms(),
            });
        }

        self.state = SimState::Running;
        for trial_number in 1..=num_trials {
            let selection = policy.select(self.table.arms(), trial_number);
            // A policy returning an out-of-range index is a programming
            // error in the policy; surface it rather than panicking.
            if selection.chosen >= self.table.len() {
                return Err(SimError::UnknownArm {
                    arm: selection.chosen,
                    arms: self.table.len(),
                });
            }
            let reward = source.reward((trial_number - 1) as usize, selection.chosen)?;
            self.table.record(selection.chosen, reward)?;
            self.history.push(TrialRecord {
                trial_number,
                arm: selection.chosen,
                reward,
                note: selection.note,
            });
        }
        self.state = SimState::Completed;

        let metric = policy.metric();
        Ok(SimulationResult {
            stats: self.table.clone(),
            history: self.history.clone(),
            best_arm: best_arm(self.table.arms(), metric),
            metric,
        })
    }

    /// Return to `NotStarted`: zero all statistics and clear the history.
    pub fn reset(&mut self) {
        self.table.reset();
        self.history.clear();
        self.state = SimState::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ConfidenceBound, ConfidenceConfig, PosteriorConfig, PosteriorSampling, RewardTable,
    };

    fn constant_table(num_arms: usize, trials: usize) -> RewardTable {
        RewardTable::new(num_arms, vec![vec![1.0; num_arms]; trials]).unwrap()
    }

    #[test]
    fn zero_trials_completes_immediately() {
        let mut sim = Simulator::new(3);
        let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
        let mut source = constant_table(3, 0);
        let result = sim.run(0, &mut policy, &mut source).unwrap();
        assert_eq!(sim.state(), SimState::Completed);
        assert!(result.history.is_empty());
        assert_eq!(result.best_arm, 0);
    }

    #[test]
    fn rerun_without_reset_fails() {
        let mut sim = Simulator::new(2);
        let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
        let mut source = constant_table(2, 4);
        sim.run(2, &mut policy, &mut source).unwrap();
        let err = sim.run(2, &mut policy, &mut source).unwrap_err();
        assert_eq!(err, SimError::AlreadyCompleted);
    }

    #[test]
    fn reset_allows_rerun_from_zero() {
        let mut sim = Simulator::new(2);
        let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
        let mut source = constant_table(2, 8);
        sim.run(2, &mut policy, &mut source).unwrap();
        sim.reset();
        assert_eq!(sim.state(), SimState::NotStarted);
        assert_eq!(sim.stats().iter().map(|a| a.pulls).sum::<u64>(), 0);

        let result = sim.run(4, &mut policy, &mut source).unwrap();
        assert_eq!(result.history.len(), 4);
    }

    #[test]
    fn arm_count_mismatch_rejected_up_front() {
        let mut sim = Simulator::new(3);
        let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
        let mut source = constant_table(2, 4);
        let err = sim.run(1, &mut policy, &mut source).unwrap_err();
        assert_eq!(
            err,
            SimError::ArmCountMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(sim.state(), SimState::NotStarted);
    }

    #[test]
    fn empty_arm_table_rejected() {
        let mut sim = Simulator::new(0);
        let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
        let mut source = constant_table(0, 0);
        assert_eq!(
            sim.run(1, &mut policy, &mut source).unwrap_err(),
            SimError::NoArms
        );
    }

    #[test]
    fn source_failure_aborts_with_partial_stats_committed() {
        let mut sim = Simulator::new(2);
        let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
        // Only 3 trials of data, but 5 requested.
        let mut source = constant_table(2, 3);
        let err = sim.run(5, &mut policy, &mut source).unwrap_err();
        assert!(matches!(err, SimError::MissingReward { trial: 3, .. }));
        // The three committed trials are inspectable; the run is not Completed.
        assert_eq!(sim.state(), SimState::Running);
        assert_eq!(sim.history().len(), 3);
        assert_eq!(sim.stats().iter().map(|a| a.pulls).sum::<u64>(), 3);
    }

    #[test]
    fn pulls_sum_to_trials_and_tally_invariant_holds() {
        let mut sim = Simulator::new(4);
        let mut policy = PosteriorSampling::with_seed(PosteriorConfig::default(), 17);
        let mut source =
            RewardTable::new(4, (0..50).map(|i| vec![(i % 2) as f64; 4]).collect()).unwrap();
        let result = sim.run(50, &mut policy, &mut source).unwrap();

        assert_eq!(result.stats.total_pulls(), 50);
        for a in result.stats.arms() {
            assert_eq!(a.successes + a.failures, a.pulls);
            assert_eq!(a.cumulative_reward, a.successes as f64);
        }
    }

    #[test]
    fn history_is_ordered_and_consistent() {
        let mut sim = Simulator::new(2);
        let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
        let mut source = constant_table(2, 6);
        let result = sim.run(6, &mut policy, &mut source).unwrap();
        for (i, rec) in result.history.iter().enumerate() {
            assert_eq!(rec.trial_number, i as u64 + 1);
            assert!(rec.arm < 2);
            assert!(rec.reward == 0.0 || rec.reward == 1.0);
        }
    }
}
