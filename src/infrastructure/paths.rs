//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! usually resolves to the directory Zellij was started from.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Returns the directory holding the watched list and trace output.
///
/// # Examples
///
/// ```
/// use popcorn::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/popcorn"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("popcorn")
}

/// Maps `~` and `~/...` onto the sandbox host root.
///
/// Used for the `theme_file` option, which users naturally write relative to
/// their home directory.
///
/// # Examples
///
/// ```
/// use popcorn::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/popcorn.toml"), "/host/themes/popcorn.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/popcorn.toml"), "/etc/popcorn.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{HOST_ROOT}/{rest}")
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_inside_path_is_left_alone() {
        assert_eq!(expand_tilde("/tmp/~backup"), "/tmp/~backup");
        assert_eq!(expand_tilde("~user/file"), "~user/file");
    }
}
