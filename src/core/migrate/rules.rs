//! Literal replacement rules and the pure text transform.
//!
//! A rule replaces every non-overlapping occurrence of `from` with `to`,
//! scanning left to right. Rules run in list order and each one sees the
//! output of the rules before it. Nothing is iterated to a fixpoint.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One literal substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub from: String,
    pub to: String,
}

impl Rule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Rule {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Apply this rule once over `text`.
    ///
    /// Returns the new text and the number of occurrences replaced.
    pub fn apply(&self, text: &str) -> (String, usize) {
        if self.from.is_empty() {
            return (text.to_string(), 0);
        }

        let count = text.matches(self.from.as_str()).count();
        if count == 0 {
            return (text.to_string(), 0);
        }

        (text.replace(self.from.as_str(), &self.to), count)
    }
}

/// Fold every rule over `text` in order.
///
/// Returns the final text and the total number of replacements made.
pub fn apply_rules(rules: &[Rule], text: &str) -> (String, usize) {
    rules
        .iter()
        .fold((text.to_string(), 0), |(current, total), rule| {
            let (next, count) = rule.apply(&current);
            (next, total + count)
        })
}

/// Reject rules that cannot be applied as literals.
pub fn validate_rules(rules: &[Rule]) -> Result<()> {
    for (index, rule) in rules.iter().enumerate() {
        if rule.from.is_empty() {
            return Err(Error::validation_invalid_argument(
                format!("rules[{}].from", index),
                "Match text must not be empty",
            ));
        }
    }
    Ok(())
}
