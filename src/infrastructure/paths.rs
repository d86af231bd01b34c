//! Path utilities for user-specific locations.
//!
//! Locations follow the XDG base directory conventions: `$XDG_CONFIG_HOME`
//! and `$XDG_DATA_HOME` when set, otherwise `~/.config` and `~/.local/share`.
//! Every public function has a `*_from` twin that takes the environment as a
//! lookup function, which is what the tests use.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "saral";
const CONFIG_FILE: &str = "config.toml";

type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn xdg_dir(env: Env<'_>, var: &str, fallback: &str) -> Option<PathBuf> {
    env(var)
        .map(PathBuf::from)
        .or_else(|| env("HOME").map(|home| Path::new(&home).join(fallback)))
        .map(|base| base.join(APP_DIR))
}

/// Directory holding `config.toml`, e.g. `~/.config/saral`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(&process_env)
}

fn config_dir_from(env: Env<'_>) -> Option<PathBuf> {
    xdg_dir(env, "XDG_CONFIG_HOME", ".config")
}

/// Directory for files the client writes, e.g. `~/.local/share/saral`.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    data_dir_from(&process_env)
}

fn data_dir_from(env: Env<'_>) -> Option<PathBuf> {
    xdg_dir(env, "XDG_DATA_HOME", ".local/share")
}

/// The configuration file, if one exists at the default location.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .filter(|path| path.is_file())
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use saral::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("relative/~"), "relative/~");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_from(path, &process_env)
}

fn expand_tilde_from(path: &str, env: Env<'_>) -> String {
    let Some(home) = env("HOME") else {
        return path.to_string();
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        Path::new(&home).join(rest).to_string_lossy().into_owned()
    } else {
        path.to_string()
    }
}

/// Expands `~` and places relative paths under [`data_dir`].
#[must_use]
pub fn resolve_data_path(path: &str) -> PathBuf {
    resolve_data_path_from(path, &process_env)
}

fn resolve_data_path_from(path: &str, env: Env<'_>) -> PathBuf {
    let expanded = PathBuf::from(expand_tilde_from(path, env));
    if expanded.is_absolute() {
        return expanded;
    }
    data_dir_from(env).map_or_else(|| expanded.clone(), |dir| dir.join(&expanded))
}
