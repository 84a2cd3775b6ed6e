use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::shared::triage::{print_result, run_analysis};
use crate::context::AppContext;
use crate::progress::Progress;

/// Handle `vigil analyze <report-id>`.
pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let orchestrator = ctx.orchestrator()?;

    let progress = Progress::spinner(&format!("Fetching report {}", args.report_id));
    let report = store.fetch_report(&args.report_id).await;
    progress.finish_clear();

    let report = report
        .with_context(|| format!("failed to fetch report '{}'", args.report_id))?
        .with_context(|| format!("report '{}' not found", args.report_id))?;

    let result = run_analysis(&orchestrator, &report.id, &report.description)
        .await
        .with_context(|| format!("cannot analyze report '{}'", report.id))?;
    print_result(&ctx.presenter(), &result, flags)
}
