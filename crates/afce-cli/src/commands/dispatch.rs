use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::State => commands::state::handle(ctx, flags),
        Commands::Geometry(args) => commands::geometry::handle(&args, ctx, flags),
        Commands::Radar => commands::radar::handle(ctx, flags),
        Commands::Perturb(args) => commands::perturb::handle(&args, ctx, flags).await,
        Commands::Assess(args) => commands::assess::handle(&args, ctx, flags).await,
        Commands::Ask(args) => commands::ask::handle(&args, ctx, flags).await,
        Commands::Session => commands::session::handle(ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
