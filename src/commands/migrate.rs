use serde::Serialize;
use std::io::{self, Write};

use doc_rewriter::migrate::{self, MigrationPlan};
use doc_rewriter::FileUpdate;

use crate::commands::{load_plan, CmdResult, GlobalArgs};
use crate::output;

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum MigrateOutput {
    #[serde(rename = "migrate", rename_all = "camelCase")]
    Migrate {
        rules: usize,
        files: Vec<FileUpdate>,
        total_replacements: usize,
    },
}

/// JSON mode: run silently and report the summary.
pub fn run(global: &GlobalArgs) -> CmdResult<MigrateOutput> {
    let plan = load_plan(&global.plan)?;
    let summary = migrate::run(&plan, |_| Ok(()))?;

    Ok((
        MigrateOutput::Migrate {
            rules: summary.rules,
            files: summary.files,
            total_replacements: summary.total_replacements,
        },
        0,
    ))
}

/// Text mode: one `Updated:` line per file as it lands, then `Done`.
pub fn run_text(global: &GlobalArgs) -> doc_rewriter::Result<i32> {
    let plan = load_plan(&global.plan)?;
    write_progress(&plan, &mut io::stdout().lock())
}

fn write_progress<W: Write>(plan: &MigrationPlan, out: &mut W) -> doc_rewriter::Result<i32> {
    migrate::run(plan, |update| {
        output::write_line(&mut *out, &format!("Updated: {}", update.path.display()))
    })?;

    output::write_line(out, "Done")?;
    Ok(0)
}
