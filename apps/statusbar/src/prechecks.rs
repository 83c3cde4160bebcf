//! Startup validation: everything that can be rejected before the first round.

use anyhow::{Result, bail};
use std::env;
use std::ffi::OsStr;
use std::path::Path;
use wsb::domain::config::StatusBarConfigInner;
use wsb::features::{self, Requirement};

/// Operating systems the providers have been tested on.
const TESTED_OS: &[&str] = &["linux"];

/// Validates `config` for the requested `names`.
///
/// # Errors
/// The first failed check, phrased as advice for the user.
pub fn check(config: &StatusBarConfigInner, names: &[String]) -> Result<()> {
    check_values(config, names)?;
    if config.ignore_os {
        return Ok(());
    }
    check_os(env::consts::OS)?;
    check_requirements(names, env::var_os("PATH").as_deref())
}

fn check_values(config: &StatusBarConfigInner, names: &[String]) -> Result<()> {
    if config.interval_secs == 0 && !config.oneshot {
        bail!("--interval must be > 0");
    }
    if config.timeout_secs == 0 {
        bail!("--timeout must be > 0");
    }

    if names.iter().any(|name| name == features::clock::DATE) {
        features::clock::validate_format(&config.feature.date.format)
            .map_err(|e| anyhow::anyhow!("--feature-date-format: {e}"))?;
    }

    if names.iter().any(|name| name == "weather") {
        let weather = &config.feature.weather;
        if weather.city.trim().is_empty() {
            bail!("feature \"weather\" requires --feature-weather-city");
        }
        if weather.timeout_secs == 0 {
            bail!("--feature-weather-timeout must be > 0");
        }
    }
    Ok(())
}

fn check_os(os: &str) -> Result<()> {
    if !TESTED_OS.contains(&os) {
        bail!("unsupported OS \"{os}\"; use --ignoreos");
    }
    Ok(())
}

fn check_requirements(names: &[String], path_var: Option<&OsStr>) -> Result<()> {
    for name in names {
        match features::requirement(name) {
            Some(Requirement::Command(program)) if !in_path(program, path_var) => {
                bail!("command \"{program}\" not found, try it without the {name} feature");
            }
            Some(Requirement::File(file)) if !Path::new(file).exists() => {
                bail!("file \"{file}\" does not exist, try it without the {name} feature");
            }
            _ => {}
        }
    }
    Ok(())
}

fn in_path(program: &str, path_var: Option<&OsStr>) -> bool {
    path_var.is_some_and(|paths| env::split_paths(paths).any(|dir| dir.join(program).is_file()))
}
