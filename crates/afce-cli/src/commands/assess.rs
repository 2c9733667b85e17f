use anyhow::Context;
use afce_engine::ingest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AssessArgs;
use crate::commands::views;
use crate::context::AppContext;
use crate::progress::Progress;

/// Handle `afce assess`.
pub async fn handle(args: &AssessArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_gemini()?;
    let image = ingest::load_image(args.image.as_deref()).context("failed to attach image")?;
    ctx.dashboard.set_active_image(image);

    let progress = Progress::assessment(ctx.dashboard.active_image().is_some());
    let assessed = ctx.dashboard.assess().await;
    progress.finish(&assessed, "assessment failed");
    views::print_assessment(assessed.context("analysis failed")?, flags)
}
