use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags).await,
        Commands::Classify(args) => commands::classify::handle(&args, ctx, flags).await,
        Commands::Reports { action } => commands::reports::handle(&action, ctx, flags).await,
        Commands::Interactive => commands::interactive::handle(ctx, flags).await,
        Commands::Aspects | Commands::Schema(_) => {
            unreachable!("aspects/schema are pre-dispatched in main")
        }
    }
}
