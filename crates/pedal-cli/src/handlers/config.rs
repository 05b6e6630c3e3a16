//! Config command handler.

use anyhow::Result;
use pedal_core::{Settings, SettingsUpdate, validate_settings};

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

/// Execute the config command.
pub fn execute(ctx: &mut CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            print_settings(ctx.settings());
            Ok(())
        }
        ConfigCommand::Set {
            refresh_ms,
            device_check_ms,
            block_size,
            default_device,
            python,
            manifest,
            script,
            upgrade_installer,
            pause,
        } => {
            let update = SettingsUpdate {
                refresh_interval_ms: refresh_ms.map(Some),
                device_check_interval_ms: device_check_ms.map(Some),
                block_size: block_size.map(Some),
                default_device: default_device.map(Some),
                python_candidates: python.map(Some),
                manifest_path: manifest.map(Some),
                entry_script: script.map(Some),
                upgrade_installer: upgrade_installer.map(Some),
                pause: pause.map(Some),
            };
            apply_update(ctx, &update)
        }
        ConfigCommand::Reset => {
            ctx.profile.settings = Settings::default();
            ctx.save()?;
            println!("✓ Settings reset to defaults.");
            Ok(())
        }
    }
}

fn apply_update(ctx: &mut CliContext, update: &SettingsUpdate) -> Result<()> {
    if is_empty(update) {
        println!("No settings provided. Use --help to see available options.");
        return Ok(());
    }

    // Validate on a copy so a rejected value never reaches the file.
    let mut candidate = ctx.profile.settings.clone();
    candidate.merge(update);
    validate_settings(&candidate).map_err(|e| CliError::Config(e.to_string()))?;

    ctx.profile.settings = candidate;
    ctx.save()?;
    println!("✓ Settings updated.");
    print_settings(ctx.settings());
    Ok(())
}

const fn is_empty(update: &SettingsUpdate) -> bool {
    update.refresh_interval_ms.is_none()
        && update.device_check_interval_ms.is_none()
        && update.block_size.is_none()
        && update.default_device.is_none()
        && update.python_candidates.is_none()
        && update.manifest_path.is_none()
        && update.entry_script.is_none()
        && update.upgrade_installer.is_none()
        && update.pause.is_none()
}

/// Stored value, or the effective default marked as such.
fn show<T: std::fmt::Display>(stored: Option<&T>, effective: impl std::fmt::Display) -> String {
    stored.map_or_else(|| format!("{effective} (default)"), ToString::to_string)
}

fn print_settings(settings: &Settings) {
    println!("Current settings:");
    println!(
        "  refresh_interval_ms:      {}",
        show(settings.refresh_interval_ms.as_ref(), settings.refresh_interval().as_millis())
    );
    println!(
        "  device_check_interval_ms: {}",
        show(
            settings.device_check_interval_ms.as_ref(),
            settings.device_check_interval().as_millis()
        )
    );
    println!(
        "  block_size:               {}",
        show(settings.block_size.as_ref(), settings.effective_block_size())
    );
    println!(
        "  default_device:           {}",
        show(settings.default_device.as_ref(), "first found")
    );
    println!(
        "  python_candidates:        {}",
        show(
            settings.python_candidates.as_ref().map(|c| c.join(", ")).as_ref(),
            settings.effective_python_candidates().join(", ")
        )
    );
    println!(
        "  manifest_path:            {}",
        show(settings.manifest_path.as_ref(), settings.effective_manifest_path())
    );
    println!(
        "  entry_script:             {}",
        show(settings.entry_script.as_ref(), settings.effective_entry_script())
    );
    println!(
        "  upgrade_installer:        {}",
        show(settings.upgrade_installer.as_ref(), settings.effective_upgrade_installer())
    );
    println!(
        "  pause:                    {}",
        show(settings.pause.as_ref(), settings.effective_pause())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap;
    use pedal_core::PauseMode;

    fn set_command(block_size: Option<u32>, pause: Option<PauseMode>) -> ConfigCommand {
        ConfigCommand::Set {
            refresh_ms: None,
            device_check_ms: None,
            block_size,
            default_device: None,
            python: None,
            manifest: None,
            script: None,
            upgrade_installer: None,
            pause,
        }
    }

    #[test]
    fn test_set_persists() {
        let temp = tempfile::tempdir().unwrap();
        let mut ctx = bootstrap(temp.path().to_str()).unwrap();
        execute(&mut ctx, set_command(Some(256), Some(PauseMode::Never))).unwrap();

        let reloaded = bootstrap(temp.path().to_str()).unwrap();
        assert_eq!(reloaded.settings().block_size, Some(256));
        assert_eq!(reloaded.settings().effective_pause(), PauseMode::Never);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let mut ctx = bootstrap(temp.path().to_str()).unwrap();

        let err = execute(&mut ctx, set_command(Some(3), None)).unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli.exit_code(), 78);
        assert_eq!(ctx.settings().block_size, None);
        assert!(!ctx.paths.profile.exists());
    }

    #[test]
    fn test_reset_keeps_handlers() {
        let temp = tempfile::tempdir().unwrap();
        let mut ctx = bootstrap(temp.path().to_str()).unwrap();
        ctx.profile.add_handler(0, pedal_core::AlertHandler::default());
        execute(&mut ctx, set_command(Some(1024), None)).unwrap();

        execute(&mut ctx, ConfigCommand::Reset).unwrap();
        let reloaded = bootstrap(temp.path().to_str()).unwrap();
        assert_eq!(reloaded.settings(), &Settings::default());
        assert_eq!(reloaded.profile.handler_count(), 1);
    }

    #[test]
    fn test_show_marks_defaults() {
        assert_eq!(show(None::<&u32>, 512), "512 (default)");
        assert_eq!(show(Some(&64), 512), "64");
    }
}
