use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Prefix of the environment overrides, e.g. `WMSTATUSBAR__SEPARATOR` or
/// `WMSTATUSBAR__FEATURE__DATE__FORMAT`.
pub const ENV_PREFIX: &str = "WMSTATUSBAR";
const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[wsb_derive::wsb_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest precedence first:
/// 1. **Defaults**: whatever `T`'s `#[serde(default)]` provides.
/// 2. **File**: `path`, when given. The format follows the extension (`.toml`, `.yaml`,
///    `.json`, ...)
///    and the file must exist.
/// 3. **Environment**: variables prefixed with `WMSTATUSBAR__`. Nested keys are separated by double
///    underscores, e.g. `WMSTATUSBAR__FEATURE__WEATHER__CITY` maps to `feature.weather.city`.
///
/// Command-line flags are applied on top of the result by the binary.
///
/// # Errors
/// * The given file cannot be found or parsed.
/// * A value does not match the structure of `T`.
///
/// # Example
/// ```rust
/// use wsb_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct BarConfig {
///     separator: String,
/// }
///
/// let cfg: BarConfig = load_config(None).unwrap_or_default();
/// # let _ = cfg.separator;
/// ```
pub fn load_config<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`], reading the overrides from `vars` instead of the process
/// environment when given. Keys keep their `WMSTATUSBAR__` prefix.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<&Path>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path {
        debug!(path = %path.display(), "Loading config file");
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(vars),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
