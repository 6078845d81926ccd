//! Path handling for the Zellij sandbox.

use std::path::PathBuf;

/// Directory for plugin-owned files such as trace output.
///
/// `/host` is the directory Zellij was started from (usually the home
/// directory), so this is normally `~/.local/share/zellij/postboard`.
///
/// ```
/// use postboard::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/postboard"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("postboard")
}

/// Maps a `~`-prefixed path to its location under `/host`.
///
/// ```
/// use postboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("~bob/x"), "~bob/x");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        "/host".to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else {
        path.to_string()
    }
}
