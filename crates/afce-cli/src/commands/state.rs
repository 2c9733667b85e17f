use crate::cli::GlobalFlags;
use crate::commands::views;
use crate::context::AppContext;

/// Handle `afce state`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    views::print_state(ctx.dashboard.patient(), flags)
}
