use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "gallery";

/// Environment variable overriding the log file written while the terminal UI runs.
pub const LOG_PATH_ENV: &str = "GALLERY_LOG_PATH";

pub const LOG_FILE_NAME: &str = "gallery.log";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `<config dir>/gallery`, or `./gallery` when the platform has none.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Resolves a path from `env_var` when set and non-blank, else `<config dir>/gallery/<file_name>`.
pub(crate) fn env_or_config_path(env_var: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = env::var(env_var)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }
    app_config_dir().join(file_name)
}

pub fn default_log_path() -> PathBuf {
    env_or_config_path(LOG_PATH_ENV, LOG_FILE_NAME)
}
