use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Triage a stored report by id.
    Analyze(AnalyzeArgs),
    /// Triage free text without touching the store.
    Classify(ClassifyArgs),
    /// List the registered aspects and their candidate labels.
    Aspects,
    /// Browse stored reports.
    Reports {
        #[command(subcommand)]
        action: ReportsCommands,
    },
    /// Print the JSON Schema of an output type.
    Schema(SchemaArgs),
    /// Read descriptions from stdin; each line supersedes the one before.
    Interactive,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Report key under `crimes/` (generated keys start with '-').
    #[arg(allow_hyphen_values = true)]
    pub report_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// Incident description (multiple words are joined with spaces).
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ReportsCommands {
    /// List reports, newest first.
    List {
        /// Time window: all, 1h, 24h, week (defaults to general.default_window).
        #[arg(short, long)]
        window: Option<String>,
        /// Only reports filed with this email address.
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Show one report with its reporter's profile.
    Get {
        /// Report key under `crimes/`.
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: triage-result, triage-view, aspect-result, aspect-definition,
    /// chart-series, crime-report, user-profile.
    pub type_name: String,
}
