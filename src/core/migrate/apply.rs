use super::plan::MigrationPlan;
use super::rules::apply_rules;
use crate::error::Result;
use crate::output::{FileUpdate, MigrationSummary};
use crate::utils::io;
use std::path::Path;

/// Rewrite a single document in place.
///
/// The file is read in full before anything is written, so a missing or
/// unreadable target fails without being touched.
pub fn rewrite_file(path: &Path, plan: &MigrationPlan) -> Result<FileUpdate> {
    let original = io::read_text(path)?;
    let (rewritten, replacements) = apply_rules(&plan.rules, &original);
    io::write_text(path, &rewritten)?;

    Ok(FileUpdate {
        path: path.to_path_buf(),
        replacements,
        changed: rewritten != original,
    })
}

/// Run the whole plan, one target at a time, in list order.
///
/// `on_update` is called after each successful write; an error from it ends
/// the pass like any other. The first failure stops the pass: earlier targets
/// stay rewritten and later ones are left alone.
pub fn run<F>(plan: &MigrationPlan, mut on_update: F) -> Result<MigrationSummary>
where
    F: FnMut(&FileUpdate) -> Result<()>,
{
    plan.validate()?;

    let mut summary = MigrationSummary {
        rules: plan.rules.len(),
        ..Default::default()
    };

    for target in &plan.targets {
        let update = rewrite_file(target, plan)?;
        crate::log_status!(
            "migrate",
            "{} replacement(s) in {}",
            update.replacements,
            target.display()
        );
        on_update(&update)?;
        summary.record(update);
    }

    Ok(summary)
}
