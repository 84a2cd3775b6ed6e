use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use vigil_core::window::{filter_reports, reports_for_email};
use vigil_core::{CrimeReport, TimeWindow, UserProfile};

use crate::cli::{GlobalFlags, OutputFormat, ReportsCommands};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `vigil reports <action>`.
pub async fn handle(
    action: &ReportsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportsCommands::List { window, email } => {
            list(window.as_deref(), email.as_deref(), ctx, flags).await
        }
        ReportsCommands::Get { id } => get(id, ctx, flags).await,
    }
}

async fn list(
    window: Option<&str>,
    email: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let window = match window {
        Some(raw) => raw.parse::<TimeWindow>().map_err(anyhow::Error::msg)?,
        None => ctx.config.default_window()?,
    };
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let store = ctx.store()?;

    let progress = Progress::spinner("Fetching reports");
    let reports = store.list_reports().await;
    progress.finish_clear();
    let reports = reports.context("failed to list reports")?;

    let mut reports = select(&reports, window, email, Utc::now().timestamp_millis());
    reports.truncate(limit);

    match flags.format {
        OutputFormat::Json | OutputFormat::Raw => output(&reports, flags.format),
        OutputFormat::Text | OutputFormat::Table => {
            let rows = reports.iter().map(ReportRow::from).collect::<Vec<_>>();
            output(&rows, flags.format)
        }
    }
}

/// Window filter, then the optional reporter filter. Input is newest first.
fn select(
    reports: &[CrimeReport],
    window: TimeWindow,
    email: Option<&str>,
    now_ms: i64,
) -> Vec<CrimeReport> {
    let recent = filter_reports(reports, window, now_ms);
    match email {
        Some(email) => reports_for_email(&recent, email),
        None => recent,
    }
}

#[derive(Serialize)]
struct ReportDetail {
    report: CrimeReport,
    reporter: Option<UserProfile>,
}

async fn get(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let report = store
        .fetch_report(id)
        .await
        .with_context(|| format!("failed to fetch report '{id}'"))?
        .with_context(|| format!("report '{id}' not found"))?;

    let reporter = match report.user_id.as_deref().filter(|uid| !uid.is_empty()) {
        Some(uid) => store.fetch_user(uid).await.unwrap_or_else(|error| {
            tracing::warn!(uid, %error, "could not load reporter profile");
            None
        }),
        None => None,
    };

    output(&ReportDetail { report, reporter }, flags.format)
}

#[derive(Serialize)]
struct ReportRow {
    id: String,
    submitted: String,
    crime_type: String,
    location: String,
    reporter: String,
}

impl From<&CrimeReport> for ReportRow {
    fn from(report: &CrimeReport) -> Self {
        let reporter = if report.is_anonymous {
            String::from("anonymous")
        } else {
            report
                .email
                .clone()
                .or_else(|| report.full_name.clone())
                .unwrap_or_else(|| String::from("-"))
        };
        Self {
            id: report.id.clone(),
            submitted: DateTime::<Utc>::from_timestamp_millis(report.timestamp)
                .filter(|_| report.timestamp > 0)
                .map_or_else(|| String::from("-"), |dt| dt.format("%Y-%m-%d %H:%M").to_string()),
            crime_type: report.crime_type.clone(),
            location: report.location.clone(),
            reporter,
        }
    }
}
