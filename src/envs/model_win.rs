use crate::{env::*, error::*, mdps::mdp::*, spaces::*};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const MODEL_WIN_ID: &str = "ModelWin-v0";

/// Fixed number of steps per episode.
pub const MODEL_WIN_HORIZON: usize = 20;

const START: Discrete = 0;
const GOOD: Discrete = 1;
const BAD: Discrete = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelWinConfig {
    pub r: f64,
    pub p: f64,
}

impl Default for ModelWinConfig {
    fn default() -> Self {
        Self { r: 1., p: 0.4 }
    }
}

/// ModelWin environment.
///
/// The agent always starts in s1 (0). There, action 0 leads to s2 (1) with
/// probability `p` and to s3 (2) otherwise; action 1 flips those odds.
/// Arriving in s2 is worth `r`, arriving in s3 `-r`. From s2 and s3 both
/// actions return the agent to s1 for a reward of 0.
///
/// Horizon H = 20, regardless of the states visited.
#[derive(Debug)]
pub struct ModelWin {
    state: Discrete,
    h: usize,
    r: f64,
    p: f64,
    action_space: DiscreteSpace,
    observation_space: DiscreteSpace,
    transitions: Rc<Transitions>,
    rng: StdRng,
}

impl ModelWin {
    pub fn new(r: f64, p: f64) -> Result<Self> {
        if !r.is_finite() {
            return Err(EnvError::InvalidArgument(format!(
                "reward scale must be finite, got {r}."
            )));
        }
        if !(0. ..=1.).contains(&p) {
            return Err(EnvError::InvalidArgument(format!(
                "transition probability must be in [0, 1], got {p}."
            )));
        }

        Ok(Self::build(r, p))
    }

    pub fn from_config(config: ModelWinConfig) -> Result<Self> {
        Self::new(config.r, config.p)
    }

    fn build(r: f64, p: f64) -> Self {
        Self {
            state: START,
            h: 0,
            r,
            p,
            action_space: DiscreteSpace::new(2),
            observation_space: DiscreteSpace::new(3),
            transitions: Rc::new(build_transitions(r, p)),
            rng: seeded_rng(None).0,
        }
    }

    pub fn state(&self) -> Discrete {
        self.state
    }

    /// Steps taken since the last reset.
    pub fn step_count(&self) -> usize {
        self.h
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn outcome(&self, good: bool) -> (Discrete, f64) {
        if good {
            (GOOD, self.r)
        } else {
            (BAD, -self.r)
        }
    }
}

impl Default for ModelWin {
    fn default() -> Self {
        let config = ModelWinConfig::default();
        Self::build(config.r, config.p)
    }
}

fn build_transitions(r: f64, p: f64) -> Transitions {
    let mut transitions = Transitions::from([
        (
            (START, 0),
            vec![
                Transition::new(GOOD, p, r, false),
                Transition::new(BAD, 1. - p, -r, false),
            ],
        ),
        (
            (START, 1),
            vec![
                Transition::new(GOOD, 1. - p, r, false),
                Transition::new(BAD, p, -r, false),
            ],
        ),
    ]);
    for s in [GOOD, BAD] {
        for a in 0..2 {
            transitions.insert((s, a), vec![Transition::new(START, 1., 0., false)]);
        }
    }

    transitions
}

impl Env for ModelWin {
    fn id(&self) -> &'static str {
        MODEL_WIN_ID
    }

    fn action_space(&self) -> &DiscreteSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &DiscreteSpace {
        &self.observation_space
    }

    fn reset(&mut self) -> Discrete {
        self.state = START;
        self.h = 0;
        tracing::debug!(env = MODEL_WIN_ID, "reset");
        self.state
    }

    fn step(&mut self, action: Discrete) -> Result<StepInfo> {
        let action = self.action_space.check(action)?;

        let (s1, reward) = if self.state != START {
            (START, 0.)
        } else {
            let u = self.rng.gen::<f64>();
            match action {
                0 => self.outcome(u < self.p),
                _ => self.outcome(u >= self.p),
            }
        };
        tracing::trace!(env = MODEL_WIN_ID, s = self.state, a = action, s1, reward, "step");

        self.state = s1;
        self.h += 1;

        Ok(StepInfo::new(self.state, reward, self.h == MODEL_WIN_HORIZON))
    }

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let (rng, seed) = seeded_rng(seed);
        self.rng = rng;
        tracing::debug!(env = MODEL_WIN_ID, seed, "seeded");
        vec![seed]
    }
}

impl Mdp for ModelWin {
    fn n_s(&self) -> usize {
        self.observation_space.n as usize
    }

    fn n_a(&self) -> usize {
        self.action_space.n as usize
    }

    fn transitions(&self) -> Rc<Transitions> {
        Rc::clone(&self.transitions)
    }

    fn horizon(&self) -> Option<usize> {
        Some(MODEL_WIN_HORIZON)
    }
}
