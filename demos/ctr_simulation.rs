//! Ad click-through simulation, offline and deterministic.
//!
//! Runs both selection policies over the same set of ten synthetic ads and
//! prints each policy's report:
//! - posterior sampling (Thompson) concentrates trials on the strong arms
//!   quickly,
//! - confidence-bound (UCB) spends longer sweeping the weak arms before
//!   committing.
//!
//! Run:
//! `cargo run --example ctr_simulation`

use adsim::{
    BernoulliArms, ConfidenceBound, ConfidenceConfig, PosteriorConfig, PosteriorSampling, Report,
    Simulator,
};

fn main() {
    // True click probabilities per ad.  Ad 3 is the planted winner.
    let true_probs = [0.05, 0.13, 0.09, 0.25, 0.02, 0.18, 0.15, 0.01, 0.12, 0.08];
    let trials = 10_000u64;

    println!("== ctr_simulation: posterior sampling ==");
    let mut policy = PosteriorSampling::with_seed(PosteriorConfig::default(), 42);
    let mut ads = BernoulliArms::with_seed(&true_probs, 42).unwrap();
    let mut sim = Simulator::new(true_probs.len());
    let ts_result = sim.run(trials, &mut policy, &mut ads).unwrap();
    println!(
        "{}",
        Report::new(&ts_result).true_probs(ads.true_probs())
    );

    println!();
    println!("== ctr_simulation: confidence bound ==");
    let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
    let mut ads = BernoulliArms::with_seed(&true_probs, 42).unwrap();
    let mut sim = Simulator::new(true_probs.len());
    let cb_result = sim.run(trials, &mut policy, &mut ads).unwrap();
    println!(
        "{}",
        Report::new(&cb_result).true_probs(ads.true_probs())
    );

    // Every ad should have been tried at least once.
    for (i, a) in cb_result.stats.arms().iter().enumerate() {
        assert!(a.pulls > 0, "ad {i} never presented");
    }

    let ts_reward: f64 = ts_result
        .stats
        .arms()
        .iter()
        .map(|a| a.cumulative_reward)
        .sum();
    let cb_reward: f64 = cb_result
        .stats
        .arms()
        .iter()
        .map(|a| a.cumulative_reward)
        .sum();
    println!();
    println!("clicks over {trials} users: thompson={ts_reward} ucb={cb_reward}");
}
