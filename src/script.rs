#![forbid(unsafe_code)]

//! Script evaluation for script-derived placeholder values

mod evaluator;
mod rhai_engine;

pub use evaluator::ScriptEvaluator;
pub use rhai_engine::{RhaiEvaluator, ScriptLimits};
