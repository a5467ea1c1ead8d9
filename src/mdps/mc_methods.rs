use super::mdp_simulator::*;
use crate::{error::*, spaces::*};
use std::iter::zip;

/// First-visit Monte-Carlo prediction of state values.
/// Ref: https://youtu.be/P0ZvxeQqv0A?si=RLKdOUTNEfKXE63C
pub fn mc_first_visit(
    ep_gen: &mut dyn EpisodeGenerator,
    gamma: Continous,
    n_s: usize,
    n_ep: usize,
) -> Result<Vec<Continous>> {
    mc_core(ep_gen, gamma, n_s, n_ep, is_first_visit)
}

/// Every-visit Monte-Carlo prediction of state values.
pub fn mc_every_visit(
    ep_gen: &mut dyn EpisodeGenerator,
    gamma: Continous,
    n_s: usize,
    n_ep: usize,
) -> Result<Vec<Continous>> {
    mc_core(ep_gen, gamma, n_s, n_ep, |_, _, _| true)
}

fn mc_core(
    ep_gen: &mut dyn EpisodeGenerator,
    gamma: Continous,
    n_s: usize,
    n_ep: usize,
    counts_visit: fn(&[EpisodeEvent], usize, Discrete) -> bool,
) -> Result<Vec<Continous>> {
    let mut returns = vec![0 as Continous; n_s];
    let mut visits = vec![0usize; n_s];

    let eps = ep_gen.generate(n_ep, None)?;
    for ep in eps.iter().take(n_ep) {
        let mut g = 0.;
        for t in (0..ep.len().saturating_sub(1)).rev() {
            g = gamma * g + ep[t + 1].r;
            if counts_visit(ep, t, ep[t].s) {
                let i = usize::try_from(ep[t].s)
                    .ok()
                    .filter(|&i| i < n_s)
                    .ok_or_else(|| {
                        EnvError::InvalidArgument(format!(
                            "state {} is outside 0..{n_s}.",
                            ep[t].s
                        ))
                    })?;
                returns[i] += g;
                visits[i] += 1;
            }
        }
    }

    tracing::debug!(n_ep = eps.len(), ?visits, "monte-carlo prediction done");

    Ok(zip(returns, visits)
        .map(|(r, v)| if v == 0 { 0. } else { r / (v as Continous) })
        .collect())
}

fn is_first_visit(ep: &[EpisodeEvent], t: usize, s: Discrete) -> bool {
    !ep.iter().take(t).any(|x| x.s == s)
}
