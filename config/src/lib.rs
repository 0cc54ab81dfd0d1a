//! Load configuration from XDG `config.toml` and a project `.env`, then apply it to the
//! process environment with priority: **existing env > .env > XDG**.
//!
//! Proposal Studio reads everything it needs (`OPENAI_API_KEY`, `PROPOSAL_MODEL`,
//! `PROPOSAL_ADDR`, ...) from the environment once at startup, so this crate only has to
//! make sure those variables are populated before typed settings are built.

mod dotenv;
mod xdg_toml;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Application name used for the XDG directory: `$XDG_CONFIG_HOME/proposal/config.toml`.
pub const APP_NAME: &str = "proposal";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(#[from] ::dotenv::Error),
}

/// Where a resolved key came from. Returned by [`resolve`] so callers can log it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Env,
    Dotenv,
    Xdg,
}

/// Merges `.env` and XDG values without touching the process environment.
///
/// Keys already present in the environment are reported as [`Source::Env`] and keep
/// their current value; the rest come from `.env` first, then XDG.
pub fn resolve(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<BTreeMap<String, (String, Source)>, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir)?;

    let mut keys: HashSet<&String> = xdg_map.keys().collect();
    keys.extend(dotenv_map.keys());

    let mut out = BTreeMap::new();
    for key in keys {
        if let Ok(existing) = std::env::var(key) {
            out.insert(key.clone(), (existing, Source::Env));
        } else if let Some(v) = dotenv_map.get(key) {
            out.insert(key.clone(), (v.clone(), Source::Dotenv));
        } else if let Some(v) = xdg_map.get(key) {
            out.insert(key.clone(), (v.clone(), Source::Xdg));
        }
    }
    Ok(out)
}

/// Loads `.env` and XDG `config.toml`, then sets environment variables only for keys
/// that are **not** already set.
///
/// * `app_name`: normally [`APP_NAME`]; selects `~/.config/<app_name>/config.toml`.
/// * `override_dir`: look for `.env` here instead of the current directory.
///
/// Returns the number of variables that were newly set.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<usize, LoadError> {
    let resolved = resolve(app_name, override_dir)?;
    let mut applied = 0;
    for (key, (value, source)) in resolved {
        if source == Source::Env {
            continue;
        }
        std::env::set_var(&key, value);
        applied += 1;
    }
    Ok(applied)
}
