use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::commands::shared::triage::{print_result, run_analysis};
use crate::context::AppContext;

/// Report id used for text that did not come from the store.
pub const ADHOC_REPORT_ID: &str = "adhoc";

/// Handle `vigil classify <text>`.
pub async fn handle(args: &ClassifyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let orchestrator = ctx.orchestrator()?;
    let text = args.text.join(" ");
    let result = run_analysis(&orchestrator, ADHOC_REPORT_ID, &text).await?;
    print_result(&ctx.presenter(), &result, flags)
}
