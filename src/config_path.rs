use directories::ProjectDirs;
use std::path::PathBuf;

pub(crate) const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config dir>/reformula/config.toml`, if the platform has a config dir.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "reformula")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push(CONFIG_FILE_NAME);
    Some(path)
}
