use anyhow::bail;
use schemars::{JsonSchema, Schema, schema_for};
use vigil_core::{AspectDefinition, AspectResult, ChartSeries, CrimeReport, TriageResult, UserProfile};
use vigil_triage::TriageView;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;

pub const TYPE_NAMES: &[&str] = &[
    "triage-result",
    "triage-view",
    "aspect-result",
    "aspect-definition",
    "chart-series",
    "crime-report",
    "user-profile",
];

/// Handle `vigil schema <type>`.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_by_name(&args.type_name)?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn schema_by_name(name: &str) -> anyhow::Result<Schema> {
    Ok(match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "triage-result" => schema::<TriageResult>(),
        "triage-view" => schema::<TriageView>(),
        "aspect-result" => schema::<AspectResult>(),
        "aspect-definition" => schema::<AspectDefinition>(),
        "chart-series" => schema::<ChartSeries>(),
        "crime-report" => schema::<CrimeReport>(),
        "user-profile" => schema::<UserProfile>(),
        _ => bail!(
            "unknown schema type '{name}' (expected one of: {})",
            TYPE_NAMES.join(", ")
        ),
    })
}

fn schema<T: JsonSchema>() -> Schema {
    schema_for!(T)
}
