use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::rules::{validate_rules, Rule};
use crate::error::{Error, Result};

/// Mini-App → Bot renames, most specific phrases first, then the two
/// deprecated workspace lines.
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("Mini-App Ecosystem", "Bot Ecosystem"),
    ("Mini-App Framework", "Bot Framework"),
    ("Mini-App Marketplace", "Bot Marketplace"),
    ("Mini-App SDK", "Bot SDK"),
    ("Mini-App Manager", "Bot Manager"),
    ("Mini-App UI Renderer", "Bot UI Renderer"),
    ("Mini-App UI", "Bot UI"),
    ("Mini-App module", "Bot module"),
    ("Mini-App code", "Bot code"),
    ("Mini-App bundle", "Bot bundle"),
    ("Mini-App Package", "Bot Package"),
    ("Mini-App package", "Bot package"),
    ("Mini-App logic", "Bot logic"),
    ("Mini-App metadata", "Bot metadata"),
    ("Mini-App must", "Bot must"),
    ("Mini-App cannot", "Bot cannot"),
    ("Mini-App monetization", "Bot monetization"),
    ("Mini-App bundles", "Bot bundles"),
    ("Mini-App Panel", "Bot Panel"),
    ("Mini-App panel", "Bot panel"),
    ("Mini-App task", "Bot task"),
    ("Mini-App's dedicated", "Bot's dedicated"),
    ("Mini-App is installed", "Bot is installed"),
    ("Mini-App is backed", "Bot is backed"),
    ("a Mini-App", "a Bot"),
    ("each Mini-App", "each Bot"),
    ("Every installed Mini-App", "Every installed Bot"),
    ("Mini-Apps are modular", "Bots are modular"),
    ("2–3 Mini-Apps", "2–3 Bots"),
    ("2 Mini-Apps", "2 Bots"),
    ("Malicious Mini-App", "Malicious Bot"),
    ("Mini-Apps = ", "Bots = "),
    ("Mini-Apps.", "Bots."),
    ("Mini-Apps,", "Bots,"),
    ("Mini-Apps", "Bots"),
    ("Mini-App", "Bot"),
    ("miniapps/", "bots/"),
    ("MiniAppVersions", "BotVersions"),
    ("MiniApps", "Bots"),
    ("- Workspace management\n", ""),
    ("- Manage workspace\n", ""),
];

const BUILTIN_TARGETS: &[&str] = &["docs/product-concept.md", "docs/technical-architecture.md"];

/// Ordered rules plus ordered target documents.
///
/// Fields missing from a JSON plan fall back to the built-in values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationPlan {
    #[serde(default = "builtin_rules")]
    pub rules: Vec<Rule>,

    #[serde(default = "builtin_targets")]
    pub targets: Vec<PathBuf>,
}

impl Default for MigrationPlan {
    fn default() -> Self {
        Self {
            rules: builtin_rules(),
            targets: builtin_targets(),
        }
    }
}

pub fn builtin_rules() -> Vec<Rule> {
    BUILTIN_RULES
        .iter()
        .map(|(from, to)| Rule::new(*from, *to))
        .collect()
}

fn builtin_targets() -> Vec<PathBuf> {
    BUILTIN_TARGETS.iter().map(PathBuf::from).collect()
}

impl MigrationPlan {
    pub fn new(rules: Vec<Rule>, targets: Vec<PathBuf>) -> Self {
        Self { rules, targets }
    }

    /// Parse a plan from JSON text and validate it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let plan: MigrationPlan = serde_json::from_str(raw).map_err(|e| {
            Error::validation_invalid_json(
                e,
                Some("parse migration plan".to_string()),
                Some(raw.chars().take(200).collect::<String>()),
            )
        })?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<()> {
        validate_rules(&self.rules)?;

        for (index, target) in self.targets.iter().enumerate() {
            if target.as_os_str().is_empty() {
                return Err(Error::validation_invalid_argument(
                    format!("targets[{}]", index),
                    "Target path must not be empty",
                ));
            }
        }

        Ok(())
    }

    /// Anchor relative targets at `root`. Absolute targets are kept as-is.
    pub fn resolve_targets(mut self, root: &Path) -> Self {
        self.targets = self
            .targets
            .into_iter()
            .map(|t| if t.is_absolute() { t } else { root.join(t) })
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::apply_rules;

    fn migrate(text: &str) -> String {
        apply_rules(&builtin_rules(), text).0
    }

    #[test]
    fn builtin_plan_has_fixed_shape() {
        let plan = MigrationPlan::default();
        assert_eq!(plan.rules.len(), 41);
        assert_eq!(plan.rules[0], Rule::new("Mini-App Ecosystem", "Bot Ecosystem"));
        assert_eq!(plan.rules[35], Rule::new("Mini-App", "Bot"));
        assert_eq!(plan.targets.len(), 2);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn specific_phrases_precede_generic_term() {
        let rules = builtin_rules();
        let generic = rules.iter().position(|r| r.from == "Mini-App").unwrap();
        for (index, rule) in rules.iter().enumerate() {
            if rule.from != "Mini-App" && rule.from.contains("Mini-App") {
                assert!(index < generic, "'{}' must run before 'Mini-App'", rule.from);
            }
        }
    }

    #[test]
    fn renames_ecosystem_sentence() {
        assert_eq!(
            migrate("The Mini-App Ecosystem supports a Mini-App and 2 Mini-Apps total."),
            "The Bot Ecosystem supports a Bot and 2 Bots total."
        );
    }

    #[test]
    fn removes_workspace_lines_entirely() {
        let input = "## Features\n- Workspace management\n- Chat\n- Manage workspace\n- Search\n";
        assert_eq!(migrate(input), "## Features\n- Chat\n- Search\n");
    }

    #[test]
    fn workspace_line_without_newline_is_kept() {
        assert_eq!(migrate("- Workspace management"), "- Workspace management");
    }

    #[test]
    fn text_without_matches_is_unchanged() {
        let input = "# Architecture\n\nThe runtime loads skills from disk.\n";
        assert_eq!(migrate(input), input);
    }

    #[test]
    fn code_identifiers_and_paths_are_renamed() {
        assert_eq!(
            migrate("See miniapps/ and MiniAppVersions in the MiniApps table."),
            "See bots/ and BotVersions in the Bots table."
        );
    }

    #[test]
    fn no_match_text_survives_migration() {
        let input = "A Mini-App bundle. Every installed Mini-App. Malicious Mini-App's dedicated \
                     Mini-App UI Renderer; 2–3 Mini-Apps, Mini-Apps = many. miniapps/MiniApps\n\
                     - Workspace management\n- Manage workspace\n";
        let output = migrate(input);
        for rule in builtin_rules() {
            assert!(
                !output.contains(&rule.from),
                "'{}' still present in:\n{}",
                rule.from.escape_debug(),
                output
            );
        }
    }

    #[test]
    fn migration_is_idempotent() {
        let once = migrate("The Mini-App Marketplace lists each Mini-App.\n- Manage workspace\n");
        assert_eq!(migrate(&once), once);
    }

    #[test]
    fn running_deletions_first_changes_output() {
        // Deleting the workspace line can splice a new "Mini-App" together.
        // In the fixed order the generic rename has already run by then.
        let input = "Mini-- Workspace management\nApp";
        assert_eq!(migrate(input), "Mini-App");

        let mut reordered = builtin_rules();
        let deletions: Vec<Rule> = reordered.split_off(reordered.len() - 2);
        let reordered: Vec<Rule> = deletions.into_iter().chain(reordered).collect();
        assert_eq!(apply_rules(&reordered, input).0, "Bot");
    }

    #[test]
    fn generic_rule_first_shadows_specific_phrase() {
        let ordered = vec![Rule::new("Mini-App bundle", "Bot package"), Rule::new("Mini-App", "Bot")];
        let reversed: Vec<Rule> = ordered.iter().rev().cloned().collect();
        let input = "Ship the Mini-App bundle.";

        assert_eq!(apply_rules(&ordered, input).0, "Ship the Bot package.");
        assert_eq!(apply_rules(&reversed, input).0, "Ship the Bot bundle.");
    }

    #[test]
    fn from_json_fills_missing_fields_with_builtins() {
        let plan = MigrationPlan::from_json(r#"{"targets": ["/tmp/a.md"]}"#).unwrap();
        assert_eq!(plan.rules, builtin_rules());
        assert_eq!(plan.targets, vec![PathBuf::from("/tmp/a.md")]);
    }

    #[test]
    fn from_json_reads_custom_rules() {
        let plan = MigrationPlan::from_json(
            r#"{"rules": [{"from": "widget", "to": "gadget"}], "targets": []}"#,
        )
        .unwrap();
        assert_eq!(plan.rules, vec![Rule::new("widget", "gadget")]);
        assert!(plan.targets.is_empty());
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = MigrationPlan::from_json("{not json").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_json");
    }

    #[test]
    fn from_json_rejects_empty_match_text() {
        let err = MigrationPlan::from_json(r#"{"rules": [{"from": "", "to": "x"}]}"#).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn resolve_targets_anchors_relative_paths() {
        let plan = MigrationPlan::new(
            vec![],
            vec![PathBuf::from("docs/a.md"), PathBuf::from("/abs/b.md")],
        )
        .resolve_targets(Path::new("/repo"));
        assert_eq!(
            plan.targets,
            vec![PathBuf::from("/repo/docs/a.md"), PathBuf::from("/abs/b.md")]
        );
    }
}
