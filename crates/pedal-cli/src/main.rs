//! `pedal-assistant` entry point.
//!
//! Parses arguments, loads stored state through bootstrap and dispatches to
//! the command handlers.

use std::time::Duration;

use clap::Parser;

use pedal_cli::logging::init_logging;
use pedal_cli::{
    Cli, Commands, bootstrap, exit_code_for, handlers, load_env_files, log_env_files,
};
use pedal_runtime::DefaultSystemProbe;

#[tokio::main]
async fn main() {
    // `.env` in the working directory may set PEDAL_DATA_DIR, so load it
    // before parsing.
    let env_files = load_env_files(None);

    let cli = Cli::parse();
    init_logging(cli.verbose);
    log_env_files(&env_files);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code_for(&e));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ctx = bootstrap(cli.data_dir.as_deref())?;

    let command = cli.command.unwrap_or_else(|| Commands::Run(Default::default()));
    match command {
        Commands::Run(args) => handlers::run::execute(&ctx, args).await?,
        Commands::Devices => handlers::devices::execute(&ctx)?,
        Commands::CheckDeps => {
            let probe = DefaultSystemProbe::new(ctx.settings().effective_python_candidates());
            handlers::check_deps::execute(&probe)?;
        }
        Commands::Launch(args) => {
            let code = handlers::launch::execute(ctx.settings(), args).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Handler { command } => handlers::handler::execute(&mut ctx, command)?,
        Commands::Tone {
            frequency,
            waveform,
            volume,
            duration_ms,
        } => {
            let duration = Duration::from_millis(duration_ms);
            handlers::tone::execute(&ctx, frequency, waveform, volume, duration).await?;
        }
        Commands::Config { command } => handlers::config::execute(&mut ctx, command)?,
        Commands::Paths => handlers::paths::execute(&ctx)?,
    }

    Ok(())
}
