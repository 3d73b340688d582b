//! Path helpers for the Zellij sandbox, where the host filesystem appears
//! under `/host`.

use std::path::PathBuf;

/// Returns the Bookfinder data directory, `/host/.local/share/zellij/bookfinder`.
///
/// `/host` is the cwd of the last focused terminal (or where Zellij was
/// started), which normally makes this `~/.local/share/zellij/bookfinder`.
/// The span log lives here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookfinder")
}

/// Expands a leading `~` to the `/host` mount.
///
/// Used for the `theme_file` option so users can write `~/themes/x.toml`.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host_share() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/bookfinder")
        );
    }

    #[test]
    fn tilde_expands_to_host_mount() {
        assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
        assert_eq!(expand_tilde("dir/~file"), "dir/~file");
    }
}
