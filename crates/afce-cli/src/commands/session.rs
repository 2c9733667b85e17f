//! `afce session`: an interactive loop over stdin against one dashboard.

use std::io::Write;

use afce_engine::ingest;
use anyhow::Context;
use clap::CommandFactory;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::GlobalFlags;
use crate::cli::repl::{ReplCommand, ReplLine};
use crate::commands::views::{self, GeometryView};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

enum Flow {
    Continue,
    Quit,
}

/// Handle `afce session`.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !flags.quiet {
        eprintln!(
            "AFCE-M session for {} ({}). Type 'help' for commands.",
            ctx.dashboard.patient().name,
            ctx.dashboard.patient().id
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(flags);
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        let command = match ReplLine::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        };

        match execute(command, ctx, flags).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(error) => eprintln!("error: {error:#}"),
        }
    }
    Ok(())
}

fn prompt(flags: &GlobalFlags) {
    if flags.quiet {
        return;
    }
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "afce> ");
    let _ = stderr.flush();
}

async fn execute(
    command: ReplCommand,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Flow> {
    let dashboard = &mut ctx.dashboard;
    match command {
        ReplCommand::State => views::print_state(dashboard.patient(), flags)?,
        ReplCommand::Geometry => {
            output(&GeometryView::new(dashboard.geometry(), false), flags.format)?;
        }
        ReplCommand::Radar => output(&dashboard.radar(), flags.format)?,
        ReplCommand::Perturb { challenge } => {
            let latency = dashboard.scheduler().latency();
            let progress = Progress::perturbation(challenge, 1, 1, latency);
            let landed = dashboard.perturb(challenge).await;
            progress.finish(&landed, "perturbation rejected");
            landed?;
            views::print_state(dashboard.patient(), flags)?;
        }
        ReplCommand::Edit {
            domain,
            field,
            value,
        } => {
            dashboard.edit_domain(domain, field, &value);
            let metric = dashboard
                .patient()
                .domain(domain)
                .context("domain missing from patient state")?;
            eprintln!("{domain}.{field} = {}", metric.field(field));
        }
        ReplCommand::Index { index, value } => {
            dashboard.edit_index(index, &value);
            output(&dashboard.readout(), flags.format)?;
        }
        ReplCommand::Image { path } => {
            let image = ingest::load_image(path.as_deref()).context("failed to attach image")?;
            match &image {
                Some(image) => eprintln!("selected {} ({})", image.label, image.mime_type),
                None => eprintln!("image cleared"),
            }
            dashboard.set_active_image(image);
        }
        ReplCommand::Assess => {
            ctx.require_gemini()?;
            let progress = Progress::assessment(ctx.dashboard.active_image().is_some());
            let assessed = ctx.dashboard.assess().await;
            progress.finish(&assessed, "assessment failed");
            views::print_assessment(assessed.context("analysis failed")?, flags)?;
        }
        ReplCommand::Ask { words } => {
            ctx.require_gemini()?;
            let image = ctx.dashboard.active_image().cloned();
            let progress = Progress::chat();
            let reply = ctx.dashboard.send_message(&words.join(" "), image).await;
            progress.finish(&reply, "no reply recorded");
            println!("{}", reply.context("message not sent")?.text);
        }
        ReplCommand::History => {
            output(&views::transcript(&dashboard.patient().chat_history), flags.format)?;
        }
        ReplCommand::Reset => {
            dashboard.reset_assessment();
            eprintln!("assessment and image cleared");
        }
        ReplCommand::Help => {
            let help = ReplLine::command().render_long_help();
            eprintln!("{help}");
        }
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
