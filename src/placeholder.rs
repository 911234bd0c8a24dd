#![forbid(unsafe_code)]

//! Placeholder discovery and substitution
//!
//! Placeholders are `${name}` tokens. Content templates and scripts share the
//! same syntax. The pattern is compiled once for the whole process.

use crate::error::UnresolvedPlaceholderError;
use crate::types::Bindings;
use regex::Regex;
use std::sync::LazyLock;

/// `${name}`: the single capture group is the placeholder name
pub static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}\s]+)\}").expect("placeholder pattern is valid"));

/// Replace every placeholder in `text` with its value from `replacements`
///
/// Replacement values are inserted literally; placeholders they contain are
/// not resolved again.
///
/// # Errors
///
/// Returns `UnresolvedPlaceholderError` for the first placeholder that has no
/// replacement. Nothing is returned for the text in that case.
pub fn resolve(text: &str, replacements: &Bindings) -> Result<String, UnresolvedPlaceholderError> {
    resolve_with(text, &PLACEHOLDER_PATTERN, replacements)
}

/// Same as [`resolve`], for any pattern whose first capture group is the name
pub fn resolve_with(
    text: &str,
    pattern: &Regex,
    replacements: &Bindings,
) -> Result<String, UnresolvedPlaceholderError> {
    let mut resolved = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let replacement = replacements.get(name.as_str()).ok_or_else(|| {
            UnresolvedPlaceholderError {
                name: name.as_str().to_string(),
            }
        })?;

        resolved.push_str(&text[last_end..whole.start()]);
        resolved.push_str(replacement);
        last_end = whole.end();
    }
    resolved.push_str(&text[last_end..]);

    Ok(resolved)
}

/// Names of all placeholders in `text`, in order of appearance
///
/// A name appears once per occurrence.
pub fn placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Check that every placeholder in `text` has a replacement without building the output
pub fn ensure_resolvable(
    text: &str,
    replacements: &Bindings,
) -> Result<(), UnresolvedPlaceholderError> {
    match placeholders(text)
        .into_iter()
        .find(|name| !replacements.contains_key(*name))
    {
        Some(name) => Err(UnresolvedPlaceholderError {
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}
