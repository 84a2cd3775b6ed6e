use serde::Serialize;
use vigil_triage::AspectRegistry;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

#[derive(Serialize)]
struct AspectRow<'a> {
    id: &'a str,
    name: &'a str,
    labels: String,
}

/// Handle `vigil aspects`.
pub fn handle(registry: &AspectRegistry, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Json | OutputFormat::Raw => output(&registry.list_aspects(), flags.format),
        OutputFormat::Text | OutputFormat::Table => output(&rows(registry), flags.format),
    }
}

fn rows(registry: &AspectRegistry) -> Vec<AspectRow<'_>> {
    registry
        .list_aspects()
        .iter()
        .map(|aspect| AspectRow {
            id: &aspect.aspect_id,
            name: &aspect.display_name,
            labels: aspect.candidate_labels.join(", "),
        })
        .collect()
}
