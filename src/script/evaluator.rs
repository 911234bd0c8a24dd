use crate::error::ScriptEvaluationError;
use crate::types::Bindings;

/// Evaluates a snippet and reports the variables it binds
///
/// Implementations must not keep state between calls: every evaluation starts
/// from an empty context seeded only with `inputs`. This is what makes it
/// safe to validate several rule templates on different threads with the same
/// evaluator.
pub trait ScriptEvaluator: Send + Sync {
    /// Run `script` once and return every top-level variable it binds, stringified
    ///
    /// `inputs` are visible to the script as variables. They appear in the
    /// result only if the script binds them again.
    ///
    /// # Errors
    ///
    /// Returns `ScriptEvaluationError` if the script does not parse, fails at
    /// runtime, or exceeds the evaluator's resource limits.
    fn evaluate(&self, script: &str, inputs: &Bindings) -> Result<Bindings, ScriptEvaluationError>;
}
