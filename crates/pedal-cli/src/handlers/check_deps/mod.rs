//! Check system dependencies handler.
//!
//! Probes the tools `launch` needs and the native libraries the monitor is
//! built against, and prints them as a table.

mod display;

use anyhow::Result;
use pedal_core::ports::SystemProbePort;
use pedal_core::utils::system::{Dependency, DependencyStatus};

use display::{print_dependency, print_installation_hints};

// ANSI color codes for better UX
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Execute the check-deps command.
///
/// Returns an error when any required dependency is missing.
pub fn execute(probe: &dyn SystemProbePort) -> Result<()> {
    println!("{BOLD}{BLUE}Checking system dependencies...{RESET}\n");

    let dependencies = probe.check_all_dependencies();

    println!(
        "{BOLD}{:<20} {:<15} {:<50}{RESET}",
        "DEPENDENCY", "STATUS", "NOTES"
    );
    println!("{}", "=".repeat(85));

    for dep in &dependencies {
        print_dependency(dep);
    }

    println!();

    let missing_required: Vec<&Dependency> = dependencies
        .iter()
        .filter(|d| d.is_missing_required())
        .collect();

    let present_required = dependencies
        .iter()
        .filter(|d| d.required && matches!(d.status, DependencyStatus::Present { .. }))
        .count();
    let total_required = dependencies.iter().filter(|d| d.required).count();

    println!("{}", "=".repeat(85));
    if missing_required.is_empty() {
        println!(
            "{GREEN}✓ All required dependencies are installed!{RESET} ({present_required}/{total_required})"
        );
        println!("\n{BOLD}You can now run: {BLUE}pedal-assistant launch{RESET}");
        Ok(())
    } else {
        println!(
            "{RED}✗ {} required dependencies are missing.{RESET} ({present_required}/{total_required})",
            missing_required.len()
        );
        println!();
        print_installation_hints(&missing_required);
        anyhow::bail!("Missing required dependencies")
    }
}
