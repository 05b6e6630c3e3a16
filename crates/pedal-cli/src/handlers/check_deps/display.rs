//! Display utilities for dependency status output.

use pedal_core::utils::system::{Dependency, DependencyStatus};

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// One row of the status table.
pub fn format_dependency(dep: &Dependency) -> String {
    let status_str = match &dep.status {
        DependencyStatus::Present { version } if version.is_empty() => {
            format!("{GREEN}✓ installed{RESET}")
        }
        DependencyStatus::Present { version } => format!("{GREEN}✓ v{version}{RESET}"),
        DependencyStatus::Missing if dep.required => format!("{RED}✗ missing{RESET}"),
        DependencyStatus::Missing => format!("{YELLOW}○ missing{RESET}"),
        DependencyStatus::Optional => format!("{YELLOW}○ optional{RESET}"),
    };

    let req_indicator = if dep.required {
        format!("{RED}*{RESET}")
    } else {
        " ".to_string()
    };

    format!(
        "{req_indicator}{:<19} {status_str:<24} {}",
        dep.name, dep.description
    )
}

/// Print a single dependency row in the status table.
pub fn print_dependency(dep: &Dependency) {
    println!("{}", format_dependency(dep));
}

/// Print install hints for the given dependencies.
pub fn print_installation_hints(missing: &[&Dependency]) {
    println!("{BOLD}To install the missing dependencies:{RESET}");
    for dep in missing {
        match &dep.install_hint {
            Some(hint) => println!("  {:<12} {hint}", dep.name),
            None => println!("  {:<12} (install it with your package manager)", dep.name),
        }
    }
}
