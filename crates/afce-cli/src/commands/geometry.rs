use afce_core::enums::SystemIndex;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GeometryArgs;
use crate::commands::views::GeometryView;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afce geometry`. Overrides go through the device-feed coercion,
/// exactly as an edit would.
pub fn handle(args: &GeometryArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(raw) = &args.variability {
        ctx.dashboard.edit_index(SystemIndex::VariabilityIndex, raw);
    }
    if let Some(raw) = &args.volume {
        ctx.dashboard.edit_index(SystemIndex::StateSpaceVolume, raw);
    }
    let grid = ctx.dashboard.geometry();
    output(&GeometryView::new(grid, args.points), flags.format)
}
