use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};

use doc_rewriter::migrate::MigrationPlan;

pub type CmdResult<T> = doc_rewriter::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub plan: PlanArgs,
}

/// Where the migration plan comes from and what relative targets hang off.
#[derive(Args, Default, Debug)]
pub struct PlanArgs {
    /// Base directory for relative target paths (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Migration plan JSON (inline, @file, or - for stdin). Omitted fields use the built-in plan
    #[arg(long, global = true, value_name = "JSON")]
    pub plan: Option<String>,
}

// ============================================================================
// Plan loading (CLI layer)
// ============================================================================

/// Read JSON spec from string, file (@path), or stdin (-).
fn read_json_spec_to_string(spec: &str) -> doc_rewriter::Result<String> {
    if spec.trim() == "-" {
        let mut buf = String::new();
        if crate::tty::is_stdin_tty() {
            return Err(doc_rewriter::Error::validation_invalid_argument(
                "plan",
                "Cannot read JSON from stdin when stdin is a TTY",
            ));
        }
        std::io::stdin().read_to_string(&mut buf).map_err(|e| {
            doc_rewriter::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(doc_rewriter::Error::validation_invalid_argument(
                "plan",
                "Invalid JSON spec '@' (missing file path)",
            ));
        }
        return doc_rewriter::io::read_text(Path::new(path));
    }

    Ok(spec.to_string())
}

/// Build the effective plan: explicit JSON or the built-in one, with
/// relative targets anchored at `--root`.
pub(crate) fn load_plan(args: &PlanArgs) -> doc_rewriter::Result<MigrationPlan> {
    let plan = match args.plan.as_deref() {
        Some(spec) => MigrationPlan::from_json(&read_json_spec_to_string(spec)?)?,
        None => MigrationPlan::default(),
    };

    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().map_err(|e| {
            doc_rewriter::Error::internal_io(
                e.to_string(),
                Some("resolve current directory".to_string()),
            )
        })?,
    };

    Ok(plan.resolve_targets(&root))
}

pub mod migrate;
pub mod rules;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($global))
    };
}

pub(crate) fn run_text(command: crate::Commands, global: &GlobalArgs) -> doc_rewriter::Result<i32> {
    match command {
        crate::Commands::Migrate => migrate::run_text(global),
        _ => Err(doc_rewriter::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support text output",
        )),
    }
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (doc_rewriter::Result<serde_json::Value>, i32) {
    crate::tty::status("doc-rewriter is working...");

    match command {
        crate::Commands::Migrate => dispatch!(global, migrate),
        crate::Commands::Rules => dispatch!(global, rules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_plan_defaults_to_builtin_under_root() {
        let args = PlanArgs {
            root: Some(PathBuf::from("/repo")),
            plan: None,
        };

        let plan = load_plan(&args).unwrap();

        assert_eq!(plan.rules.len(), 41);
        assert_eq!(
            plan.targets,
            vec![
                PathBuf::from("/repo/docs/product-concept.md"),
                PathBuf::from("/repo/docs/technical-architecture.md"),
            ]
        );
    }

    #[test]
    fn load_plan_reads_inline_json() {
        let args = PlanArgs {
            root: Some(PathBuf::from("/repo")),
            plan: Some(r#"{"rules": [{"from": "a", "to": "b"}], "targets": ["x.md"]}"#.to_string()),
        };

        let plan = load_plan(&args).unwrap();

        assert_eq!(plan.rules.len(), 1);
        assert_eq!(plan.targets, vec![PathBuf::from("/repo/x.md")]);
    }

    #[test]
    fn load_plan_reads_file_reference() {
        let dir = TempDir::new().unwrap();
        let plan_path = dir.path().join("plan.json");
        fs::write(&plan_path, r#"{"targets": ["/abs/readme.md"]}"#).unwrap();

        let args = PlanArgs {
            root: None,
            plan: Some(format!("@{}", plan_path.display())),
        };

        let plan = load_plan(&args).unwrap();

        assert_eq!(plan.targets, vec![PathBuf::from("/abs/readme.md")]);
    }

    #[test]
    fn load_plan_rejects_bare_at_sign() {
        let args = PlanArgs {
            root: None,
            plan: Some("@".to_string()),
        };

        let err = load_plan(&args).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }
}
