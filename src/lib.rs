extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod env;
pub mod envs;
pub mod error;
pub mod mdps;
pub mod registry;
pub mod spaces;

pub use env::*;
pub use envs::{model_fail::*, model_win::*};
pub use error::*;
pub use mdps::{mc_methods::*, mdp::*, mdp_simulator::*};
pub use registry::*;
pub use spaces::*;
