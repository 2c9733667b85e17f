use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PerturbArgs;
use crate::commands::views;
use crate::context::AppContext;
use crate::progress::Progress;

/// Handle `afce perturb`: apply `rounds` perturbations back to back, each
/// after its latency window, then print the resulting state.
pub async fn handle(args: &PerturbArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let latency = ctx.dashboard.scheduler().latency();
    for round in 1..=args.rounds {
        let progress = Progress::perturbation(args.challenge, round, args.rounds, latency);
        let landed = ctx.dashboard.perturb(args.challenge).await;
        progress.finish(&landed, "perturbation rejected");
        landed.with_context(|| format!("failed to apply {}", args.challenge))?;
    }
    views::print_state(ctx.dashboard.patient(), flags)
}
