//! Main CLI parser and top-level argument handling.

use clap::Parser;
use pedal_core::paths::DATA_DIR_ENV;

use crate::commands::Commands;

/// Command-line interface for the pedal monitor.
///
/// Running without a subcommand starts the monitor on the configured device.
#[derive(Parser)]
#[command(name = "pedal-assistant")]
#[command(about = "Watch game controller axes and sound alert tones inside configured ranges")]
#[command(version)]
pub struct Cli {
    /// Override the data directory (profile and .env) for this invocation
    #[arg(long = "data-dir", global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LaunchArgs;
    use crate::config_commands::ConfigCommand;
    use crate::handler_commands::HandlerCommand;
    use clap::CommandFactory;
    use pedal_core::{PauseMode, Waveform};

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["pedal-assistant", "--verbose", "--data-dir", "/tmp/pedal", "paths"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some("/tmp/pedal".to_string()));
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["pedal-assistant"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_args() {
        let cli = Cli::parse_from(["pedal-assistant", "run", "--device", "2"]);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.device, Some(2));
        assert!(args.replay.is_none());
    }

    #[test]
    fn test_launch_trailing_args() {
        let cli = Cli::parse_from([
            "pedal-assistant",
            "launch",
            "--skip-upgrade",
            "--python",
            "python3.12",
            "--",
            "--fullscreen",
            "extra",
        ]);
        let Some(Commands::Launch(LaunchArgs {
            skip_upgrade,
            python,
            args,
            ..
        })) = cli.command
        else {
            panic!("expected launch");
        };
        assert!(skip_upgrade);
        assert_eq!(python.as_deref(), Some("python3.12"));
        assert_eq!(args, vec!["--fullscreen", "extra"]);
    }

    #[test]
    fn test_handler_add_parses_percentages() {
        let cli = Cli::parse_from([
            "pedal-assistant",
            "handler",
            "add",
            "1",
            "--min",
            "80",
            "--max",
            "150",
            "--waveform",
            "SQUARE",
            "--frequency",
            "50",
        ]);
        let Some(Commands::Handler {
            command: HandlerCommand::Add { axis, values },
        }) = cli.command
        else {
            panic!("expected handler add");
        };
        assert_eq!(axis, 1);
        assert_eq!(values.min, Some(0.8));
        assert_eq!(values.max, Some(1.0));
        assert_eq!(values.frequency, Some(100));
        assert_eq!(values.waveform, Some(Waveform::Square));
    }

    #[test]
    fn test_handler_rejects_fractional_percent() {
        let result = Cli::try_parse_from(["pedal-assistant", "handler", "add", "0", "--min", "12.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from([
            "pedal-assistant",
            "config",
            "set",
            "--pause",
            "always",
            "--python",
            "python3,python",
        ]);
        let Some(Commands::Config {
            command: ConfigCommand::Set { pause, python, .. },
        }) = cli.command
        else {
            panic!("expected config set");
        };
        assert_eq!(pause, Some(PauseMode::Always));
        assert_eq!(python, Some(vec!["python3".to_string(), "python".to_string()]));
    }

    #[test]
    fn test_tone_defaults() {
        let cli = Cli::parse_from(["pedal-assistant", "tone"]);
        let Some(Commands::Tone {
            frequency,
            waveform,
            volume,
            duration_ms,
        }) = cli.command
        else {
            panic!("expected tone");
        };
        assert_eq!(frequency, 440);
        assert_eq!(waveform, Waveform::Sine);
        assert!((volume - 0.5).abs() < f32::EPSILON);
        assert_eq!(duration_ms, 1000);
    }
}
