use crate::{env::*, error::*, mdps::mdp::*, spaces::*};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const MODEL_FAIL_ID: &str = "ModelFail-v0";
pub const MODEL_FAIL_REVEALED_ID: &str = "ModelFailRevealed-v0";

const LEFT: Discrete = 0;
const UPPER: Discrete = 1;
const LOWER: Discrete = 2;
const TERMINAL: Discrete = 3;

/// How much of the chain the agent gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observability {
    /// Every observation is 0. The reward arrives on the step into the
    /// terminal state.
    Hidden,
    /// Observations are the true state. The reward arrives on the first step.
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelFailConfig {
    pub r: f64,
}

impl Default for ModelFailConfig {
    fn default() -> Self {
        Self { r: 1. }
    }
}

/// ModelFail environment.
///
/// The agent always starts in the left state (0) and has two actions. The
/// first moves it to the upper state (1), the second to the lower state (2).
/// From either of those, any action moves it to the terminal state (3). Going
/// through the upper state is worth `r`, going through the lower one `-r`.
///
/// Horizon H = 2.
#[derive(Debug)]
pub struct ModelFail {
    state: Discrete,
    r: f64,
    observability: Observability,
    action_space: DiscreteSpace,
    observation_space: DiscreteSpace,
    transitions: Rc<Transitions>,
    rng: StdRng,
}

impl ModelFail {
    /// The variant where the agent cannot tell which state it is in.
    pub fn new(r: f64) -> Result<Self> {
        Self::with_observability(r, Observability::Hidden)
    }

    /// The variant that reveals the true state and rewards the first step.
    pub fn revealed(r: f64) -> Result<Self> {
        Self::with_observability(r, Observability::Revealed)
    }

    pub fn from_config(config: ModelFailConfig, observability: Observability) -> Result<Self> {
        Self::with_observability(config.r, observability)
    }

    pub fn with_observability(r: f64, observability: Observability) -> Result<Self> {
        if !r.is_finite() {
            return Err(EnvError::InvalidArgument(format!(
                "reward scale must be finite, got {r}."
            )));
        }

        Ok(Self::build(r, observability))
    }

    fn build(r: f64, observability: Observability) -> Self {
        let observation_space = match observability {
            Observability::Hidden => DiscreteSpace::new(1),
            Observability::Revealed => DiscreteSpace::new(4),
        };

        Self {
            state: LEFT,
            r,
            observability,
            action_space: DiscreteSpace::new(2),
            observation_space,
            transitions: Rc::new(build_transitions(r, observability)),
            rng: seeded_rng(None).0,
        }
    }

    pub fn state(&self) -> Discrete {
        self.state
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn observability(&self) -> Observability {
        self.observability
    }

    /// The environment's own generator. ModelFail never draws from it, but
    /// agents may share it for reproducible exploration.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn observe(&self) -> Discrete {
        match self.observability {
            Observability::Hidden => 0,
            Observability::Revealed => self.state,
        }
    }
}

impl Default for ModelFail {
    fn default() -> Self {
        Self::build(ModelFailConfig::default().r, Observability::Hidden)
    }
}

/// `(next_state, reward)` for taking `action` in `state`.
fn next(
    state: Discrete,
    action: Discrete,
    r: f64,
    observability: Observability,
) -> (Discrete, f64) {
    let (on_first, on_last) = match observability {
        Observability::Hidden => (0., r),
        Observability::Revealed => (r, 0.),
    };

    // Only the revealed chain is absorbing. The hidden one leaves the
    // terminal state exactly like the left state.
    match state {
        UPPER => (TERMINAL, on_last),
        LOWER => (TERMINAL, -on_last),
        TERMINAL if observability == Observability::Revealed => (TERMINAL, 0.),
        _ if action == 0 => (UPPER, on_first),
        _ => (LOWER, -on_first),
    }
}

fn build_transitions(r: f64, observability: Observability) -> Transitions {
    let mut transitions = Transitions::new();
    for s in [LEFT, UPPER, LOWER] {
        for a in 0..2 {
            let (s1, reward) = next(s, a, r, observability);
            let t = Transition::new(s1, 1., reward, s1 == TERMINAL);
            transitions.insert((s, a), vec![t]);
        }
    }

    transitions
}

impl Env for ModelFail {
    fn id(&self) -> &'static str {
        match self.observability {
            Observability::Hidden => MODEL_FAIL_ID,
            Observability::Revealed => MODEL_FAIL_REVEALED_ID,
        }
    }

    fn action_space(&self) -> &DiscreteSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &DiscreteSpace {
        &self.observation_space
    }

    fn reset(&mut self) -> Discrete {
        self.state = LEFT;
        tracing::debug!(env = self.id(), "reset");
        self.observe()
    }

    fn step(&mut self, action: Discrete) -> Result<StepInfo> {
        let action = self.action_space.check(action)?;

        let (s1, reward) = next(self.state, action, self.r, self.observability);
        tracing::trace!(env = self.id(), s = self.state, a = action, s1, reward, "step");
        self.state = s1;

        Ok(StepInfo::new(self.observe(), reward, self.state == TERMINAL))
    }

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let (rng, seed) = seeded_rng(seed);
        self.rng = rng;
        tracing::debug!(env = self.id(), seed, "seeded");
        vec![seed]
    }
}

impl Mdp for ModelFail {
    fn n_s(&self) -> usize {
        4
    }

    fn n_a(&self) -> usize {
        self.action_space.n as usize
    }

    fn transitions(&self) -> Rc<Transitions> {
        Rc::clone(&self.transitions)
    }

    fn horizon(&self) -> Option<usize> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;
    use rand::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(Observability::Hidden)]
    #[case(Observability::Revealed)]
    fn transitions_agree_with_step(#[case] observability: Observability) {
        let env = &mut ModelFail::with_observability(2.5, observability).unwrap();
        let transitions = env.transitions();

        for (&(s, a), ts) in transitions.iter() {
            assert_eq!(ts.len(), 1);
            env.state = s;
            let si = env.step(a).unwrap();
            assert_eq!(env.state(), ts[0].next_state);
            assert_float_eq!(si.reward, ts[0].reward, abs <= 1e-12);
            assert_eq!(si.done, ts[0].done);
        }
    }

    #[test]
    fn terminal_state_has_no_transitions() {
        let env = ModelFail::default();
        assert_eq!(env.transitions().len(), 6);
        assert!(!env.transitions().keys().any(|&(s, _)| s == TERMINAL));
    }

    #[rstest]
    #[case(0, UPPER, 1.)]
    #[case(1, LOWER, -1.)]
    fn hidden_chain_restarts_past_terminal(
        #[case] action: Discrete,
        #[case] state: Discrete,
        #[case] reward: f64,
    ) {
        let env = &mut ModelFail::default();
        env.reset();
        env.step(0).unwrap();
        env.step(0).unwrap();
        assert_eq!(env.state(), TERMINAL);

        let si = env.step(action).unwrap();
        assert_eq!(env.state(), state);
        assert_eq!(si, StepInfo::new(0, 0., false));

        let si = env.step(0).unwrap();
        assert_eq!(env.state(), TERMINAL);
        assert_eq!(si, StepInfo::new(0, reward, true));
    }

    #[test]
    fn revealed_chain_stays_done_past_terminal() {
        let env = &mut ModelFail::revealed(1.).unwrap();
        env.reset();
        env.step(1).unwrap();
        env.step(1).unwrap();

        for a in [0, 1] {
            let si = env.step(a).unwrap();
            assert_eq!(env.state(), TERMINAL);
            assert_eq!(si, StepInfo::new(TERMINAL, 0., true));
        }
    }

    #[test]
    fn rng_follows_seed() {
        let env = &mut ModelFail::default();
        env.seed(Some(9));
        let expected = StdRng::seed_from_u64(9).gen::<u64>();
        assert_eq!(env.rng().gen::<u64>(), expected);
    }

    #[test]
    fn invalid_action_leaves_state_untouched() {
        let env = &mut ModelFail::default();
        env.reset();
        env.step(1).unwrap();

        assert!(env.step(2).is_err());
        assert_eq!(env.state(), LOWER);
    }

    #[test]
    fn rejects_non_finite_reward() {
        let err = ModelFail::new(f64::NAN).unwrap_err();
        assert!(matches!(err, EnvError::InvalidArgument(_)));
    }

    #[test]
    fn ids_follow_observability() {
        assert_eq!(ModelFail::new(1.).unwrap().id(), MODEL_FAIL_ID);
        assert_eq!(ModelFail::revealed(1.).unwrap().id(), MODEL_FAIL_REVEALED_ID);
    }
}
