//! Handler command handler: edits the handlers stored in the profile.

use anyhow::Result;
use pedal_core::domain::axis_name;
use pedal_core::{AlertHandler, HandlerId};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handler_commands::{HandlerCommand, HandlerValues};
use crate::presentation::handler_summary;

/// Execute the handler command.
pub fn execute(ctx: &mut CliContext, command: HandlerCommand) -> Result<()> {
    match command {
        HandlerCommand::List { axis } => {
            list(ctx, axis);
            Ok(())
        }
        HandlerCommand::Add { axis, values } => add(ctx, axis, &values),
        HandlerCommand::Set { axis, id, values } => {
            let update = values.to_update();
            if update.is_empty() {
                return Err(CliError::Arguments(
                    "nothing to change; pass --min, --max, --frequency, --volume or --waveform"
                        .to_string(),
                )
                .into());
            }
            let id = HandlerId::from(id.as_str());
            let handler = ctx.profile.edit_handler(axis, &id, &update).map_err(CliError::from)?;
            println!("✓ Updated on axis {} ({})", axis, axis_name(axis));
            println!("  {}", handler_summary(handler));
            ctx.save()?;
            Ok(())
        }
        HandlerCommand::Remove { axis, id } => {
            let id = HandlerId::from(id.as_str());
            let removed = ctx.profile.remove_handler(axis, &id).map_err(CliError::from)?;
            ctx.save()?;
            println!("✓ Removed {} from axis {} ({})", removed.id, axis, axis_name(axis));
            Ok(())
        }
        HandlerCommand::Clear { axis } => {
            let removed = ctx.profile.clear_axis(axis);
            ctx.save()?;
            println!("✓ Removed {removed} handler(s) from axis {axis} ({})", axis_name(axis));
            Ok(())
        }
    }
}

fn add(ctx: &mut CliContext, axis: usize, values: &HandlerValues) -> Result<()> {
    let mut handler = AlertHandler::default();
    handler.apply(&values.to_update());
    let id = ctx.profile.add_handler(axis, handler);
    ctx.save()?;

    println!("✓ Added handler {id} to axis {axis} ({})", axis_name(axis));
    if let Some(handler) = ctx.profile.handlers(axis).iter().find(|h| h.id == id) {
        println!("  {}", handler_summary(handler));
    }
    Ok(())
}

fn list(ctx: &CliContext, axis: Option<usize>) {
    let axes: Vec<usize> = match axis {
        Some(axis) => vec![axis],
        None => ctx.profile.axes.keys().copied().collect(),
    };

    if axes.iter().all(|a| ctx.profile.handlers(*a).is_empty()) {
        println!("No handlers configured. Add one with: pedal-assistant handler add <AXIS> --min 80");
        return;
    }

    for axis in axes {
        let handlers = ctx.profile.handlers(axis);
        if handlers.is_empty() {
            continue;
        }
        println!("Axis {axis} ({}):", axis_name(axis));
        for handler in handlers {
            println!("  {}", handler_summary(handler));
        }
    }
}
