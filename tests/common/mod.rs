use modelenvs::*;

#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Resets `env`, then plays `actions` until the episode ends or they run out.
#[allow(dead_code)]
pub fn rollout(env: &mut dyn Env, actions: &[Discrete]) -> Vec<StepInfo> {
    env.reset();
    let mut steps = vec![];
    for &a in actions {
        let si = env.step(a).unwrap();
        let done = si.done;
        steps.push(si);
        if done {
            break;
        }
    }

    steps
}

#[allow(dead_code)]
pub fn total_reward(steps: &[StepInfo]) -> f64 {
    steps.iter().map(|si| si.reward).sum()
}
