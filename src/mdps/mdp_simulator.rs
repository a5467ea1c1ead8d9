use super::mdp::{Mdp, Transition, Transitions};
use crate::{
    env::{seeded_rng, Env},
    error::*,
    spaces::*,
};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// `s` is the state (or observation) reached at this timestep and `r` the
/// reward received on arriving there. The first event of an episode carries
/// the start state and a zero reward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEvent {
    pub s: Discrete,
    pub r: f64,
}

pub type Episode = Vec<EpisodeEvent>;

pub trait EpisodeGenerator {
    fn generate(&mut self, n: usize, seed: Option<u64>) -> Result<Vec<Episode>>;
}

pub trait Policy {
    fn policy(&mut self, s: &Discrete) -> Discrete;
}

/// Always picks the same action.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPolicy(pub Discrete);

impl Policy for ConstantPolicy {
    fn policy(&mut self, _s: &Discrete) -> Discrete {
        self.0
    }
}

/// Samples the action space uniformly, ignoring the state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    space: DiscreteSpace,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(space: DiscreteSpace, seed: u64) -> Self {
        Self {
            space,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn policy(&mut self, _s: &Discrete) -> Discrete {
        self.space.sample(&mut self.rng)
    }
}

pub trait Weighted<S> {
    fn s(&self) -> S;

    fn p(&self) -> f64;
}

impl Weighted<Discrete> for Transition {
    fn s(&self) -> Discrete {
        self.next_state
    }

    fn p(&self) -> f64 {
        self.probability
    }
}

/// Picks one item with probability proportional to its weight. `None` when
/// the weights do not form a valid distribution (e.g. empty or all zero).
pub fn pick_next<'a, T>(rng: &mut StdRng, ts: &'a [T]) -> Option<&'a T>
where
    T: Weighted<Discrete>,
{
    let dist = WeightedIndex::new(ts.iter().map(|item| item.p())).ok()?;
    ts.get(dist.sample(rng))
}

/// Rolls out episodes by driving an environment with a policy. Events record
/// what the agent observes, not the hidden state.
pub struct EnvEpisodeGenerator<E: Env, P: Policy> {
    pub env: E,
    pub policy: P,
}

impl<E: Env, P: Policy> EpisodeGenerator for EnvEpisodeGenerator<E, P> {
    fn generate(&mut self, n: usize, seed: Option<u64>) -> Result<Vec<Episode>> {
        if seed.is_some() {
            self.env.seed(seed);
        }

        let mut eps = Vec::with_capacity(n);
        for _ in 0..n {
            let mut s = self.env.reset();
            let mut ep = vec![EpisodeEvent { s, r: 0. }];
            loop {
                let a = self.policy.policy(&s);
                let si = self.env.step(a)?;
                ep.push(EpisodeEvent {
                    s: si.observation,
                    r: si.reward,
                });
                if si.done {
                    break;
                }

                s = si.observation;
            }
            eps.push(ep);
        }

        Ok(eps)
    }
}

/// Samples episodes straight from a transition table, starting in state 0.
/// An episode ends on a `done` transition, on reaching a state with no
/// outgoing transitions, or after `horizon` steps.
///
/// Like [`EnvEpisodeGenerator`], `generate(.., None)` keeps drawing from the
/// current generator and `Some(seed)` re-seeds it first.
pub struct TransitionsEpisodeGenerator<P: Policy> {
    transitions: Rc<Transitions>,
    horizon: Option<usize>,
    policy: P,
    rng: StdRng,
}

impl<P: Policy> TransitionsEpisodeGenerator<P> {
    /// Seeded from entropy.
    pub fn new(mdp: &dyn Mdp, policy: P) -> Self {
        Self::with_seed(mdp, policy, seeded_rng(None).1)
    }

    pub fn with_seed(mdp: &dyn Mdp, policy: P, seed: u64) -> Self {
        Self {
            transitions: mdp.transitions(),
            horizon: mdp.horizon(),
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn is_terminal(&self, s: Discrete) -> bool {
        !self.transitions.keys().any(|&(ks, _)| ks == s)
    }
}

impl<P: Policy> EpisodeGenerator for TransitionsEpisodeGenerator<P> {
    fn generate(&mut self, n: usize, seed: Option<u64>) -> Result<Vec<Episode>> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        let mut eps = Vec::with_capacity(n);
        for _ in 0..n {
            let mut s: Discrete = Default::default();
            let mut ep = vec![EpisodeEvent { s, r: 0. }];
            while !self.is_terminal(s) && self.horizon.map_or(true, |h| ep.len() <= h) {
                let a = self.policy.policy(&s);
                let next = self
                    .transitions
                    .get(&(s, a))
                    .and_then(|ts| pick_next(&mut self.rng, ts))
                    .ok_or_else(|| {
                        EnvError::InvalidArgument(format!("no transitions for ({s}, {a})."))
                    })?;
                ep.push(EpisodeEvent {
                    s: next.next_state,
                    r: next.reward,
                });
                if next.done {
                    break;
                }

                s = next.next_state;
            }
            eps.push(ep);
        }

        Ok(eps)
    }
}
