extern crate modelenvs;
extern crate serde_json;
mod common;

use common::*;
use float_eq::*;
use modelenvs::*;
use rstest::rstest;
use serde_json::to_value;

#[rstest]
#[case(MODEL_FAIL_ID, 1)]
#[case(MODEL_FAIL_REVEALED_ID, 4)]
#[case(MODEL_WIN_ID, 3)]
fn make_registered_env(#[case] id: &str, #[case] n_obs: Discrete) {
    init_tracing();
    let env = make(id, &[]).unwrap();
    assert_eq!(env.id(), id);
    assert_eq!(env.action_space().n, 2);
    assert_eq!(env.observation_space().n, n_obs);
}

#[test]
fn envs_lists_every_id() {
    let ids = envs().into_iter().map(|(id, _)| id).collect::<Vec<_>>();
    assert_eq!(ids, vec![MODEL_FAIL_ID, MODEL_FAIL_REVEALED_ID, MODEL_WIN_ID]);
}

#[test]
fn make_model_fail_with_reward_scale() {
    let mut env = make(MODEL_FAIL_ID, &[("r", to_value(5.).unwrap())]).unwrap();
    let steps = rollout(&mut *env, &[0, 0]);
    assert_float_eq!(total_reward(&steps), 5., abs <= 1e-12);
}

#[test]
fn make_model_win_with_certain_transitions() {
    let mut env = make(
        MODEL_WIN_ID,
        &[("r", to_value(2.).unwrap()), ("p", to_value(0.).unwrap())],
    )
    .unwrap();
    env.seed(Some(0));

    let steps = rollout(&mut *env, &[1; MODEL_WIN_HORIZON]);
    assert_eq!(steps.len(), MODEL_WIN_HORIZON);
    assert_float_eq!(total_reward(&steps), 20., abs <= 1e-12);
}

#[rstest]
#[case("p", to_value(1.5).unwrap())]
#[case("r", to_value("big").unwrap())]
fn make_rejects_bad_kwargs(#[case] key: &str, #[case] value: serde_json::Value) {
    let err = make(MODEL_WIN_ID, &[(key, value)]).err().unwrap();
    assert!(matches!(
        err,
        EnvError::InvalidArgument(_) | EnvError::InvalidConfig(_)
    ));
}

#[test]
fn make_unknown_env() {
    let err = make("ModelLose-v0", &[]).err().unwrap();
    assert!(matches!(err, EnvError::UnknownEnv { .. }));
}
