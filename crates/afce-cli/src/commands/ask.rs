use anyhow::Context;
use afce_engine::ingest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AskArgs;
use crate::commands::views;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `afce ask`: one chat turn, then the whole transcript.
pub async fn handle(args: &AskArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_gemini()?;
    let image = ingest::load_image(args.image.as_deref()).context("failed to attach image")?;

    let progress = Progress::chat();
    let sent = ctx.dashboard.send_message(&args.text(), image).await;
    progress.finish(&sent, "no reply recorded");
    sent.context("message not sent")?;

    output(&views::transcript(&ctx.dashboard.patient().chat_history), flags.format)
}
