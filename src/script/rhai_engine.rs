//! Rhai-backed script evaluator
//!
//! Rule template scripts are short variable-binding snippets such as
//! `var total = ${price} * ${quantity};`. They run in an embedded Rhai engine
//! with a fresh scope per call and bounded resources.

use super::ScriptEvaluator;
use crate::error::ScriptEvaluationError;
use crate::types::Bindings;
use rhai::{Engine, Scope, Token};
use tracing::debug;

/// Resource bounds for a single script evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLimits {
    /// Maximum number of engine operations before the script is aborted
    pub max_operations: u64,
    /// Maximum function call nesting
    pub max_call_levels: usize,
    /// Maximum length of any string value
    pub max_string_size: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_operations: 100_000,
            max_call_levels: 32,
            max_string_size: 64 * 1024,
        }
    }
}

/// Evaluates scripts with the Rhai interpreter
///
/// JavaScript-style `var` declarations are accepted and treated as `let`; the
/// keyword is mapped while tokenizing, so string literals are left alone.
/// Assignments to undeclared names (`x = 5;`) are not implicit globals as in
/// JavaScript: they fail with a "variable not found" error.
/// Output of `print` and `debug` is discarded and `eval` is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct RhaiEvaluator {
    limits: ScriptLimits,
}

impl RhaiEvaluator {
    pub fn new(limits: ScriptLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ScriptLimits {
        self.limits
    }

    fn engine(&self) -> Engine {
        let mut engine = Engine::new();
        engine.set_max_operations(self.limits.max_operations);
        engine.set_max_call_levels(self.limits.max_call_levels);
        engine.set_max_string_size(self.limits.max_string_size);
        engine.on_print(|_| {});
        engine.on_debug(|_, _, _| {});
        engine.disable_symbol("eval");
        #[allow(deprecated)]
        engine.on_parse_token(|token, _, _| match token {
            Token::Reserved(word) if &*word == "var" => Token::Let,
            _ => token,
        });
        engine
    }
}

impl ScriptEvaluator for RhaiEvaluator {
    fn evaluate(&self, script: &str, inputs: &Bindings) -> Result<Bindings, ScriptEvaluationError> {
        let engine = self.engine();
        let mut scope = Scope::new();
        for (name, value) in inputs {
            scope.push(name.clone(), value.clone());
        }
        let seeded = scope.len();

        engine
            .run_with_scope(&mut scope, script)
            .map_err(|e| ScriptEvaluationError {
                script: script.to_string(),
                message: e.to_string(),
            })?;

        // Later entries shadow earlier ones with the same name
        let variables: Bindings = scope
            .iter()
            .skip(seeded)
            .map(|(name, _, value)| (name.to_string(), value.to_string()))
            .collect();

        debug!(count = variables.len(), "script evaluated");
        Ok(variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(script: &str) -> Result<Bindings, ScriptEvaluationError> {
        RhaiEvaluator::default().evaluate(script, &Bindings::new())
    }

    #[test]
    fn test_var_declaration_is_harvested() {
        let vars = evaluate("var x = 5 + 5;").unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("x").map(String::as_str), Some("10"));
    }

    #[test]
    fn test_let_and_string_values() {
        let vars = evaluate("let name = \"stock\" + \"Alert\"; let ratio = 5.0 / 2.0;").unwrap();
        assert_eq!(vars["name"], "stockAlert");
        assert_eq!(vars["ratio"], "2.5");
    }

    #[test]
    fn test_shadowed_variable_keeps_last_value() {
        let vars = evaluate("let x = 1; let x = x + 1;").unwrap();
        assert_eq!(vars["x"], "2");
    }

    #[test]
    fn test_empty_script_binds_nothing() {
        assert!(evaluate("").unwrap().is_empty());
        assert!(evaluate("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_inputs_are_visible_but_not_returned() {
        let inputs: Bindings = [("price".to_string(), "10".to_string())].into();
        let vars = RhaiEvaluator::default()
            .evaluate("let label = \"price:\" + price;", &inputs)
            .unwrap();

        assert_eq!(vars.len(), 1);
        assert_eq!(vars["label"], "price:10");
    }

    #[test]
    fn test_syntax_error_includes_script() {
        let err = evaluate("let = ;").unwrap_err();
        assert_eq!(err.script, "let = ;");
        assert!(err.to_string().contains("let = ;"));
    }

    #[test]
    fn test_runtime_error() {
        assert!(evaluate("let x = undefined_function(1);").is_err());
    }

    #[test]
    fn test_infinite_loop_is_bounded() {
        let evaluator = RhaiEvaluator::new(ScriptLimits {
            max_operations: 1_000,
            ..ScriptLimits::default()
        });
        assert!(evaluator.evaluate("loop { }", &Bindings::new()).is_err());
    }

    #[test]
    fn test_contexts_are_not_shared() {
        let evaluator = RhaiEvaluator::default();
        evaluator.evaluate("let leaked = 1;", &Bindings::new()).unwrap();
        assert!(evaluator.evaluate("let y = leaked;", &Bindings::new()).is_err());
    }

    #[test]
    fn test_var_inside_string_is_untouched() {
        let vars = evaluate("var s = \"a; var b\";").unwrap();
        assert_eq!(vars["s"], "a; var b");

        let vars = evaluate("var t = \"{ var c }\"; // var d\nvar variance = 2;").unwrap();
        assert_eq!(vars["t"], "{ var c }");
        assert_eq!(vars["variance"], "2");
    }

    #[test]
    fn test_var_declarations_in_sequence() {
        let vars = evaluate("var a = 1; var b = a + 1;\nvar c = b * 3;").unwrap();
        assert_eq!(vars["a"], "1");
        assert_eq!(vars["b"], "2");
        assert_eq!(vars["c"], "6");
    }

    #[test]
    fn test_assignment_without_declaration_fails() {
        let err = evaluate("x = 5;").unwrap_err();
        assert_eq!(err.script, "x = 5;");
        assert!(err.message.contains('x'));
    }
}
