use std::process::Command;

use log::debug;
use serde::Deserialize;

use crate::{api::CookieJar, config::ConfigError};

/// How the session cookies of the platform are obtained.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum AuthConfig {
    Cookie { cookie: String },
    /// Command printing the `Cookie` header, e.g. `pass show learn/cookie`.
    CookieCmd { cookie_cmd: String },
}

impl AuthConfig {
    pub fn cookies(&self) -> Result<CookieJar, ConfigError> {
        match self {
            AuthConfig::Cookie { cookie } => Ok(CookieJar::new(cookie.as_str())),
            AuthConfig::CookieCmd { cookie_cmd } => run_cookie_cmd(cookie_cmd),
        }
    }
}

fn run_cookie_cmd(cookie_cmd: &str) -> Result<CookieJar, ConfigError> {
    let mut cmd_parts = cookie_cmd.split_whitespace();
    let program = cmd_parts.next().ok_or(ConfigError::EmptyCookieCmd)?;
    debug!("retrieving cookies through {program}");
    let output = Command::new(program)
        .args(cmd_parts)
        .output()
        .map_err(ConfigError::CookieCmd)?;
    if !output.status.success() {
        return Err(ConfigError::CookieCmdFailed(output.status));
    }
    let cookies = CookieJar::new(String::from_utf8(output.stdout)?);
    if cookies.header().is_empty() {
        return Err(ConfigError::NoCookies);
    }
    Ok(cookies)
}
