//! `pedal-launch`: install requirements and start the Python edition.
//!
//! Takes no arguments so it can be started by double-click; everything is
//! read from the stored settings. Use `pedal-assistant launch` for overrides.
//! Exits with 0, 1 or the program's own exit code.

use pedal_cli::commands::LaunchArgs;
use pedal_cli::handlers::launch::{execute, standalone_settings};
use pedal_cli::logging::init_logging;
use pedal_cli::utils::input::wait_for_enter;
use pedal_cli::{load_env_files, log_env_files};

#[tokio::main]
async fn main() {
    let env_files = load_env_files(None);
    init_logging(false);
    log_env_files(&env_files);

    let settings = standalone_settings(None);
    let code = match execute(&settings, LaunchArgs::default()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let _ = wait_for_enter("Press Enter to close...");
            1
        }
    };
    std::process::exit(code);
}
