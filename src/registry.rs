use crate::{env::Env, envs::model_fail::*, envs::model_win::*, error::*};
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Registered ids paired with a one-line description.
pub fn envs() -> Vec<(&'static str, &'static str)> {
    vec![
        (MODEL_FAIL_ID, "4-state chain, observation always 0, horizon 2"),
        (
            MODEL_FAIL_REVEALED_ID,
            "4-state chain, true state observed, horizon 2",
        ),
        (MODEL_WIN_ID, "3-state stochastic MDP, horizon 20"),
    ]
}

/// Creates a registered environment, configured from `kwargs` (e.g.
/// `[("r", to_value(2.0)?)]`). Missing keys take their defaults.
pub fn make(id: &str, kwargs: &[(&str, Value)]) -> Result<Box<dyn Env>> {
    let env: Box<dyn Env> = match id {
        MODEL_FAIL_ID => Box::new(ModelFail::from_config(
            config_from_kwargs(kwargs)?,
            Observability::Hidden,
        )?),
        MODEL_FAIL_REVEALED_ID => Box::new(ModelFail::from_config(
            config_from_kwargs(kwargs)?,
            Observability::Revealed,
        )?),
        MODEL_WIN_ID => Box::new(ModelWin::from_config(config_from_kwargs(kwargs)?)?),
        _ => {
            return Err(EnvError::UnknownEnv {
                id: id.to_string(),
                available: envs().iter().map(|(id, _)| id).join(", "),
            })
        }
    };

    tracing::debug!(id, n_kwargs = kwargs.len(), "made environment");
    Ok(env)
}

fn config_from_kwargs<T: DeserializeOwned>(kwargs: &[(&str, Value)]) -> Result<T> {
    let obj = kwargs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect::<Map<String, Value>>();

    Ok(serde_json::from_value(Value::Object(obj))?)
}
