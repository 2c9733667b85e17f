use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afce radar`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.dashboard.radar(), flags.format)
}
