//! System probe implementation.
//!
//! `DefaultSystemProbe` implements `SystemProbePort` from pedal-core by
//! running the tools it checks for.

mod commands;
mod deps;

use pedal_core::ports::SystemProbePort;
use pedal_core::settings::DEFAULT_PYTHON_CANDIDATES;
use pedal_core::utils::system::Dependency;

pub use commands::{find_python3, get_command_version, get_pip_version, get_pkgconfig_version};
#[cfg(target_os = "linux")]
use deps::{check_libasound, check_libudev};
pub use deps::check_pkg_config_lib;

/// Default implementation of `SystemProbePort`.
///
/// Constructed in the CLI and passed to the `check-deps` handler.
pub struct DefaultSystemProbe {
    python_candidates: Vec<String>,
}

impl DefaultSystemProbe {
    pub fn new(python_candidates: Vec<String>) -> Self {
        Self { python_candidates }
    }
}

impl Default for DefaultSystemProbe {
    fn default() -> Self {
        Self::new(
            DEFAULT_PYTHON_CANDIDATES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        )
    }
}

impl SystemProbePort for DefaultSystemProbe {
    fn check_all_dependencies(&self) -> Vec<Dependency> {
        let python = find_python3(&self.python_candidates);
        let pip_version = python.as_ref().and_then(|(cmd, _)| get_pip_version(cmd));

        #[allow(unused_mut)]
        let mut deps = vec![
            Dependency::required("python", "Runs the Python edition via `launch`")
                .with_hint("https://www.python.org/downloads/")
                .with_version(python.map(|(_, version)| version)),
            Dependency::required("pip", "Installs requirements.txt for `launch`")
                .with_hint("python3 -m ensurepip --upgrade")
                .with_version(pip_version),
        ];

        #[cfg(target_os = "linux")]
        deps.extend([
            Dependency::optional("pkg-config", "Locates native libraries")
                .with_hint("apt install pkg-config")
                .with_version(get_pkgconfig_version()),
            Dependency::optional("libasound2-dev", "ALSA audio output")
                .with_hint("apt install libasound2-dev")
                .with_version(check_libasound()),
            Dependency::optional("libudev-dev", "Game controller hotplug")
                .with_hint("apt install libudev-dev")
                .with_version(check_libudev()),
        ]);

        deps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_and_pip_are_required() {
        let probe = DefaultSystemProbe::new(vec!["definitely_not_a_real_command_12345".to_string()]);
        let deps = probe.check_all_dependencies();

        let python = deps.iter().find(|d| d.name == "python").unwrap();
        assert!(python.is_missing_required());
        let pip = deps.iter().find(|d| d.name == "pip").unwrap();
        assert!(pip.is_missing_required());

        assert!(deps.iter().filter(|d| !d.required).all(|d| !d.is_missing_required()));
    }
}
