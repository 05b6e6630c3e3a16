//! Native library checks via pkg-config.

use std::process::Command;

/// Check if the ALSA development files are installed (cpal on Linux).
#[cfg(target_os = "linux")]
pub fn check_libasound() -> Option<String> {
    check_pkg_config_lib("alsa")
}

/// Check if libudev is installed (gamepad hotplug on Linux).
#[cfg(target_os = "linux")]
pub fn check_libudev() -> Option<String> {
    check_pkg_config_lib("libudev")
}

/// Check for a library using pkg-config.
pub fn check_pkg_config_lib(lib_name: &str) -> Option<String> {
    let output = Command::new("pkg-config")
        .args(["--modversion", lib_name])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pkg_config_lib_nonexistent() {
        assert!(check_pkg_config_lib("nonexistent-library-12345").is_none());
    }
}
