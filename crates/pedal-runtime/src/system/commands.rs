//! Command existence and version extraction.

use std::process::Command;

/// Get the version line of a command by running it with `args`.
pub fn get_command_version(cmd: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(cmd).args(args).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Older interpreters print --version to stderr
    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    text.lines().next().map(|s| s.trim().to_string())
}

/// First Python 3 interpreter among `candidates`, with its version.
pub fn find_python3(candidates: &[String]) -> Option<(String, String)> {
    candidates.iter().find_map(|candidate| {
        let output = get_command_version(candidate, &["--version"])?;
        // "Python 3.12.1" -> "3.12.1"
        let version = parse_second_word(&output)?;
        version
            .starts_with('3')
            .then(|| (candidate.clone(), version))
    })
}

/// Version of pip as seen by `python`.
pub fn get_pip_version(python: &str) -> Option<String> {
    let output = get_command_version(python, &["-m", "pip", "--version"])?;
    // "pip 24.0 from /usr/lib/python3/dist-packages/pip (python 3.12)" -> "24.0"
    parse_second_word(&output)
}

/// Get pkg-config version.
pub fn get_pkgconfig_version() -> Option<String> {
    get_command_version("pkg-config", &["--version"])
}

fn parse_second_word(line: &str) -> Option<String> {
    line.split_whitespace().nth(1).map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_second_word() {
        assert_eq!(parse_second_word("Python 3.12.1"), Some("3.12.1".to_string()));
        assert_eq!(
            parse_second_word("pip 24.0 from /usr/lib/python3 (python 3.12)"),
            Some("24.0".to_string())
        );
        assert_eq!(parse_second_word("pip"), None);
    }

    #[test]
    fn test_missing_command_has_no_version() {
        assert!(get_command_version("definitely_not_a_real_command_12345", &["--version"]).is_none());
        assert!(find_python3(&["definitely_not_a_real_command_12345".to_string()]).is_none());
    }
}
