use serde::Serialize;
use std::path::PathBuf;

use doc_rewriter::migrate::Rule;

use crate::commands::{load_plan, CmdResult, GlobalArgs};

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules")]
    Rules {
        rules: Vec<Rule>,
        targets: Vec<PathBuf>,
    },
}

/// Show the effective plan without reading or writing any target.
pub fn run(global: &GlobalArgs) -> CmdResult<RulesOutput> {
    let plan = load_plan(&global.plan)?;

    Ok((
        RulesOutput::Rules {
            rules: plan.rules,
            targets: plan.targets,
        },
        0,
    ))
}
