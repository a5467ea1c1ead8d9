pub mod mc_methods;
pub mod mdp;
pub mod mdp_simulator;
