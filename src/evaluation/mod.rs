//! Cost evaluation shared by the optimizers.

mod cost;

pub use cost::CostEvaluator;
