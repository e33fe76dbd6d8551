mod admin;
mod auth;

use std::{env, io, path::PathBuf, process::ExitStatus, string::FromUtf8Error};

use thiserror::Error;

pub use admin::Config;
pub use auth::AuthConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} should be set")]
    MissingVar(&'static str),
    #[error("config file {} is not readable: {source}", .path.display())]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("config is not parseable: {0}")]
    Invalid(#[from] toml::de::Error),
    #[error("cookie_cmd should specify a program")]
    EmptyCookieCmd,
    #[error("cookie_cmd is not executable: {0}")]
    CookieCmd(io::Error),
    #[error("cookie_cmd exited with {0}")]
    CookieCmdFailed(ExitStatus),
    #[error("cookie_cmd did not print any cookies")]
    NoCookies,
    #[error("cookie_cmd output is not utf-8: {0}")]
    NotUtf8(#[from] FromUtf8Error),
}

fn home() -> Result<PathBuf, ConfigError> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::MissingVar("HOME"))
}

/// `$<var>/<package>`, falling back to `$HOME/<fallback>/<package>`.
fn xdg_dir(var: &str, fallback: &str) -> Result<PathBuf, ConfigError> {
    let mut dir = match env::var_os(var).filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home()?.join(fallback),
    };
    dir.push(env!("CARGO_PKG_NAME"));
    Ok(dir)
}

pub fn default_location() -> Result<PathBuf, ConfigError> {
    Ok(xdg_dir("XDG_CONFIG_HOME", ".config")?.join("config.toml"))
}

fn default_statedir() -> Result<PathBuf, ConfigError> {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}
