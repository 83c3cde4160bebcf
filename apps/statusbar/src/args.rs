use clap::Parser;
use std::path::PathBuf;
use wsb::domain::config::{OutputKind, StatusBarConfigInner};

/// Command-line flags. Every value flag is optional so that unset flags leave the
/// config file and `WMSTATUSBAR__*` values alone.
#[derive(Debug, Default, Parser)]
#[command(
    name = "wmstatusbar",
    version,
    about = "wmstatusbar - window manager status bar",
    after_help = "EXAMPLES:\n  \
        wmstatusbar --interval 5 --features loadavg,date\n  \
        wmstatusbar --oneshot --features weather,date --feature-weather-city Narva\n  \
        wmstatusbar --oneshot --parallel=false --output xsetroot"
)]
pub struct Args {
    /// Config file (TOML, YAML or JSON)
    #[arg(long, env = "WMSTATUSBAR_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Comma-separated list of features [default: date]
    #[arg(long, value_name = "LIST")]
    pub features: Option<String>,

    /// String used as a separator for feature outputs [default: " | "]
    #[arg(long = "feature-separator", value_name = "SEP")]
    pub separator: Option<String>,

    /// Seconds to wait between updates [default: 1]
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Sends the output to "stdout", "stderr" or "xsetroot" [default: stdout]
    #[arg(long, value_parser = parse_output)]
    pub output: Option<OutputKind>,

    /// Prints the status line once and terminates
    #[arg(long)]
    pub oneshot: bool,

    /// Runs features concurrently [default: true]
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub parallel: Option<bool>,

    /// Upper bound in seconds for a single feature in a round [default: 5]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Does not check for the OS prerequisites
    #[arg(long)]
    pub ignoreos: bool,

    /// Prints the available features and exits
    #[arg(long)]
    pub list_features: bool,

    /// Date/time format (strftime) [default: "%a %b %-d %H:%M:%S"]
    #[arg(long = "feature-date-format", value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Shows the current keyboard layout variant
    #[arg(long = "feature-keyboard-variant")]
    pub keyboard_variant: bool,

    /// City to request from wttr.in (required by the weather feature)
    #[arg(long = "feature-weather-city", value_name = "CITY")]
    pub weather_city: Option<String>,

    /// Custom format string understood by wttr.in [default: "%t"]
    #[arg(long = "feature-weather-format", value_name = "FORMAT")]
    pub weather_format: Option<String>,

    /// HTTP timeout in seconds for the weather feature [default: 5]
    #[arg(long = "feature-weather-timeout", value_name = "SECS")]
    pub weather_timeout: Option<u64>,

    /// Directory for rolling log files (stderr only when unset)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace or off [default: info]
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    /// Overlays the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut StatusBarConfigInner) {
        if let Some(features) = &self.features {
            config.features.clone_from(features);
        }
        if let Some(separator) = &self.separator {
            config.separator.clone_from(separator);
        }
        if let Some(interval) = self.interval {
            config.interval_secs = interval;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config.oneshot |= self.oneshot;
        config.ignore_os |= self.ignoreos;

        let feature = &mut config.feature;
        if let Some(format) = &self.date_format {
            feature.date.format.clone_from(format);
        }
        feature.keyboard.variant |= self.keyboard_variant;
        if let Some(city) = &self.weather_city {
            feature.weather.city.clone_from(city);
        }
        if let Some(format) = &self.weather_format {
            feature.weather.format.clone_from(format);
        }
        if let Some(timeout) = self.weather_timeout {
            feature.weather.timeout_secs = timeout;
        }

        if let Some(dir) = &self.log_dir {
            config.log.dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.log.level.clone_from(level);
        }
    }
}

fn parse_output(value: &str) -> Result<OutputKind, String> {
    match value {
        "stdout" => Ok(OutputKind::Stdout),
        "stderr" => Ok(OutputKind::Stderr),
        "xsetroot" => Ok(OutputKind::Xsetroot),
        other => Err(format!("\"{other}\" is not one of \"stdout\", \"stderr\" or \"xsetroot\"")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_unset_flags_keep_config_values() {
        let mut config = StatusBarConfigInner { separator: " - ".to_owned(), ..Default::default() };
        Args::parse_from(["wmstatusbar"]).apply(&mut config);
        assert_eq!(config.separator, " - ");
        assert!(config.parallel);
        assert_eq!(config.features, "date");
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = StatusBarConfigInner::default();
        Args::parse_from([
            "wmstatusbar",
            "--features",
            "loadavg,date",
            "--feature-separator",
            " :: ",
            "--parallel=false",
            "--output",
            "xsetroot",
            "--oneshot",
            "--feature-weather-city",
            "Narva",
            "--feature-keyboard-variant",
        ])
        .apply(&mut config);

        assert_eq!(config.features, "loadavg,date");
        assert_eq!(config.separator, " :: ");
        assert!(!config.parallel);
        assert_eq!(config.output, OutputKind::Xsetroot);
        assert!(config.oneshot);
        assert_eq!(config.feature.weather.city, "Narva");
        assert!(config.feature.keyboard.variant);
    }

    #[test]
    fn test_bare_parallel_flag_means_true() {
        let args = Args::parse_from(["wmstatusbar", "--parallel"]);
        assert_eq!(args.parallel, Some(true));
    }

    #[test]
    fn test_unknown_output_is_rejected() {
        assert!(Args::try_parse_from(["wmstatusbar", "--output", "nowhere"]).is_err());
    }
}
