//! ModelFail and ModelWin, as described in Thomas & Brunskill, "Data-Efficient
//! Off-Policy Policy Evaluation for Reinforcement Learning"
//! (https://arxiv.org/pdf/1604.00923.pdf).

pub mod model_fail;
pub mod model_win;
