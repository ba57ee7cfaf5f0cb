//! Error kinds for the simulation.
//!
//! Every variant is a programmer or data error, not a runtime condition to
//! recover from: a trial is a pure computation over supplied counts, so a
//! failure aborts the run instead of being silently skipped.  Skipping a
//! trial would desynchronize per-arm pull counts from the global trial
//! number, which the confidence-bound policy depends on.

use thiserror::Error;

/// Errors surfaced by statistics updates, reward sources, and the simulator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A reward outside the binary `{0, 1}` domain was recorded.
    #[error("reward {reward} for arm {arm} is outside the binary domain {{0, 1}}")]
    InvalidReward { arm: usize, reward: f64 },

    /// `run` was invoked on a simulator that already completed a run.
    #[error("simulation already completed; call reset() before running again")]
    AlreadyCompleted,

    /// An empirical statistic was requested for an arm with zero pulls.
    #[error("empirical statistic undefined for arm {arm} with zero pulls")]
    UndefinedStatistic { arm: usize },

    /// The simulator's arm table and the reward source disagree on arm count.
    #[error("arm count mismatch: simulator has {expected} arms, reward source has {actual}")]
    ArmCountMismatch { expected: usize, actual: usize },

    /// An arm index outside `[0, arms)` was used.
    #[error("arm index {arm} out of range for {arms} arms")]
    UnknownArm { arm: usize, arms: usize },

    /// There are no arms to select from.
    #[error("no arms to select from")]
    NoArms,

    /// A precomputed reward table has no entry for the requested trial.
    #[error("no reward recorded for trial {trial}, arm {arm}")]
    MissingReward { trial: usize, arm: usize },

    /// A Bernoulli arm was configured with a probability outside `[0, 1]`.
    #[error("true probability {probability} for arm {arm} is outside [0, 1]")]
    InvalidProbability { arm: usize, probability: f64 },
}
