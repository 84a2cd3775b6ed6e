use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use vigil_triage::{Submission, TriageSession};

use crate::cli::GlobalFlags;
use crate::commands::shared::triage::print_result;
use crate::context::AppContext;

/// Handle `vigil interactive`.
///
/// Each stdin line is a new description. A line arriving while an earlier one
/// is still being classified supersedes it; only current results are printed.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = Arc::new(TriageSession::new(ctx.orchestrator()?));
    let presenter = ctx.presenter();
    let flags = flags.clone();

    if !flags.quiet {
        eprintln!("Enter one incident description per line (Ctrl-D to finish).");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await? {
        let description = line.trim().to_string();
        if description.is_empty() {
            continue;
        }
        line_no += 1;

        let session = Arc::clone(&session);
        let presenter = presenter.clone();
        let flags = flags.clone();
        in_flight.spawn(async move {
            let report_id = format!("line-{line_no}");
            match session.submit(&report_id, &description).await {
                Ok(Submission::Current { generation, result }) => {
                    // A newer line may have committed since this one did.
                    if !session.is_latest(generation) {
                        tracing::debug!(generation, report_id, "skipping superseded output");
                        return;
                    }
                    if let Err(error) = print_result(&presenter, &result, &flags) {
                        tracing::warn!(%error, "failed to render result");
                    }
                }
                Ok(Submission::Superseded { generation }) => {
                    tracing::debug!(generation, report_id, "dropped superseded analysis");
                }
                Err(error) => eprintln!("{report_id}: {error}"),
            }
        });

        // Reap finished tasks so the set does not grow with the session.
        while in_flight.try_join_next().is_some() {}
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(error) = joined {
            tracing::warn!(%error, "interactive analysis task failed");
        }
    }
    Ok(())
}
