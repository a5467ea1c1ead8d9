use crate::spaces::{Continous, Discrete};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next_state: Discrete,
    pub probability: Continous,
    pub reward: f64,
    pub done: bool,
}

impl Transition {
    pub fn new(next_state: Discrete, probability: Continous, reward: f64, done: bool) -> Self {
        Self {
            next_state,
            probability,
            reward,
            done,
        }
    }
}

/// Keyed by `(state, action)`. Terminal states have no entries.
pub type Transitions = HashMap<(Discrete, Discrete), Vec<Transition>>;

/// Markov Decision Process - Sutton & Barto 2018.
///
/// States here are the environment's true states, which need not be what
/// the environment reveals as observations.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn transitions(&self) -> Rc<Transitions>;

    /// Fixed number of steps per episode, if the episode is time-bounded.
    fn horizon(&self) -> Option<usize>;
}

/// Expected immediate reward of taking `a` in `s`.
pub fn expected_reward(transitions: &Transitions, s: Discrete, a: Discrete) -> Option<f64> {
    transitions
        .get(&(s, a))
        .map(|ts| ts.iter().map(|t| t.probability * t.reward).sum())
}
