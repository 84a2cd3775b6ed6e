use vigil_core::TriageResult;
use vigil_triage::{ResultPresenter, TriageOrchestrator};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::{output, text};
use crate::progress::Progress;

/// Run one analysis behind a spinner.
pub async fn run_analysis(
    orchestrator: &TriageOrchestrator,
    report_id: &str,
    description: &str,
) -> anyhow::Result<TriageResult> {
    let progress = Progress::spinner(&format!(
        "Classifying {report_id} across {} aspects",
        orchestrator.registry().len()
    ));
    match orchestrator.analyze(report_id, description).await {
        Ok(result) => {
            progress.finish_clear();
            Ok(result)
        }
        Err(error) => {
            progress.finish_err("analysis failed");
            Err(error.into())
        }
    }
}

/// Print a result as a [`vigil_triage::TriageView`].
pub fn print_result(
    presenter: &ResultPresenter,
    result: &TriageResult,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let view = presenter.present(result);
    match flags.format {
        OutputFormat::Text => {
            println!("{}", text::render_triage(&view));
            Ok(())
        }
        OutputFormat::Table => {
            let rows = result
                .aspects()
                .iter()
                .map(|aspect| AspectRow {
                    aspect: aspect.aspect_id.clone(),
                    label: aspect.top_label.clone(),
                    score: format!("{:.2}", vigil_triage::round_half_up(aspect.top_score * 100.0)),
                })
                .collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&view, flags.format),
    }
}

#[derive(serde::Serialize)]
struct AspectRow {
    aspect: String,
    label: String,
    score: String,
}
