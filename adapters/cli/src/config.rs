//! TOML-backed configuration for the garden CLI.
//!
//! Values resolve in three layers: command-line flags win, the optional
//! config file fills the gaps, and the world defaults cover the rest.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use garden_core::Config;
use serde::Deserialize;

/// Settings accepted from a TOML config file.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) columns: Option<u32>,
    pub(crate) rows: Option<u32>,
    pub(crate) seed: Option<u64>,
    pub(crate) step_ms: Option<u64>,
    pub(crate) reduced_motion: Option<bool>,
}

/// Settings provided on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) columns: Option<u32>,
    pub(crate) rows: Option<u32>,
    pub(crate) seed: Option<u64>,
    pub(crate) step_ms: Option<u64>,
    pub(crate) reduced_motion: bool,
}

pub(crate) fn load(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

fn parse(raw: &str) -> Result<FileConfig> {
    Ok(toml::from_str(raw)?)
}

/// Resolves the layered settings into a world configuration.
///
/// `fallback_seed` is used only when neither the flags nor the file name a
/// seed; callers draw it from OS entropy so unseeded runs still differ.
pub(crate) fn resolve(flags: &Overrides, file: FileConfig, fallback_seed: u64) -> Config {
    let defaults = Config::default();
    let step_ms = flags
        .step_ms
        .or(file.step_ms)
        .unwrap_or(defaults.step_interval.as_millis() as u64);

    Config {
        columns: flags.columns.or(file.columns).unwrap_or(defaults.columns),
        rows: flags.rows.or(file.rows).unwrap_or(defaults.rows),
        step_interval: Duration::from_millis(step_ms),
        rng_seed: flags.seed.or(file.seed).unwrap_or(fallback_seed),
        reduced_motion: flags.reduced_motion || file.reduced_motion.unwrap_or(false),
        species: defaults.species,
    }
}
