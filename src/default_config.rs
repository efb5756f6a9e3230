//! Per-user config file discovery.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Location of the per-user `config.toml`, if the platform has a config dir.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("io", "cellgraph", "cellgraph")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// The config file to load: an explicit `--config` wins, then the default
/// file when it exists and defaults are allowed.
pub(crate) fn resolve_config_path(
    explicit: Option<&PathBuf>,
    no_default_config: bool,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.clone());
    }
    if no_default_config {
        return None;
    }
    default_config_path().filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_path_is_deterministic() {
        // Should never panic and should either be Some(path) or None.
        assert_eq!(default_config_path(), default_config_path());
    }

    #[test]
    fn explicit_config_wins() {
        let explicit = PathBuf::from("custom.toml");
        assert_eq!(
            resolve_config_path(Some(&explicit), true),
            Some(PathBuf::from("custom.toml"))
        );
    }

    #[test]
    fn no_default_config_skips_lookup() {
        assert_eq!(resolve_config_path(None, true), None);
    }
}
