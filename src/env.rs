use crate::{error::Result, spaces::*};
use rand::prelude::*;
use serde_json::{Map, Value};

/// Auxiliary diagnostic information returned alongside a step.
pub type Info = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    pub observation: Discrete,
    pub reward: f64,
    pub done: bool,
    pub info: Info,
}

impl StepInfo {
    pub fn new(observation: Discrete, reward: f64, done: bool) -> Self {
        Self {
            observation,
            reward,
            done,
            info: Info::new(),
        }
    }
}

/// The reset/step/seed contract every environment in this crate follows.
/// Refer: https://gymnasium.farama.org/api/env/
pub trait Env {
    /// Registered id, e.g. `ModelWin-v0`.
    fn id(&self) -> &'static str;

    /// The Space object corresponding to valid actions. Discrete(2) means the
    /// valid actions are 0 & 1.
    fn action_space(&self) -> &DiscreteSpace;

    /// The Space object corresponding to valid observations.
    fn observation_space(&self) -> &DiscreteSpace;

    /// Starts a new episode and returns the initial observation.
    fn reset(&mut self) -> Discrete;

    /// Runs one timestep of the environment's dynamics.
    fn step(&mut self, action: Discrete) -> Result<StepInfo>;

    /// Re-initializes the environment's generator. Returns the seeds actually used.
    fn seed(&mut self, seed: Option<u64>) -> Vec<u64>;
}

/// Builds a generator from `seed`, or from a freshly drawn seed when none is given.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(random::<u64>);
    (StdRng::seed_from_u64(seed), seed)
}
