//! Facade crate for wmstatusbar features and shared modules.
//! Re-exports domain/kernel primitives and composes the enabled feature crates into a
//! [`Directory`](kernel::directory::Directory).
//! Keep this crate thin: it should compose other crates, not implement provider logic.
//!
//! ## Usage
//! - Add `wsb` with the desired feature flags (all providers are on by default).
//! - Call [`directory`] once at startup and build the registry from it.

pub use wsb_domain as domain;
pub use wsb_kernel as kernel;

use tracing::debug;
use wsb_domain::config::FeatureSettings;
use wsb_kernel::directory::Directory;
use wsb_kernel::env::SessionEnv;

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "date")]
    pub use wsb_clock as clock;
    #[cfg(feature = "companion")]
    pub use wsb_companion as companion;
    #[cfg(any(feature = "audio", feature = "keyboard"))]
    pub use wsb_desktop as desktop;
    #[cfg(any(feature = "camera", feature = "loadavg"))]
    pub use wsb_system as system;
    #[cfg(feature = "weather")]
    pub use wsb_weather as weather;

    /// Build-time enabled features (by Cargo feature), sorted.
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "audio")]
        "audio",
        #[cfg(feature = "camera")]
        "camera",
        #[cfg(feature = "date")]
        "date",
        #[cfg(feature = "companion")]
        "gorum",
        #[cfg(feature = "keyboard")]
        "keyboard",
        #[cfg(feature = "loadavg")]
        "loadavg",
        #[cfg(feature = "companion")]
        "lru",
        #[cfg(feature = "weather")]
        "weather",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }

    /// Something a feature needs from the host before it can work.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Requirement {
        /// A program on `PATH`.
        Command(&'static str),
        /// A file that must exist.
        File(&'static str),
    }

    /// Host requirement of `feature`, if it has one.
    #[must_use]
    pub fn requirement(feature: &str) -> Option<Requirement> {
        match feature {
            "audio" => Some(Requirement::Command("pactl")),
            "keyboard" => Some(Requirement::Command("setxkbmap")),
            "loadavg" => Some(Requirement::File("/proc/loadavg")),
            "camera" => Some(Requirement::File("/proc/modules")),
            _ => None,
        }
    }
}

/// Builds the provider directory from every enabled feature.
#[must_use]
#[cfg_attr(
    not(all(
        any(feature = "date", feature = "keyboard", feature = "weather"),
        feature = "companion"
    )),
    allow(unused_variables)
)]
#[cfg_attr(
    not(any(
        feature = "audio",
        feature = "camera",
        feature = "companion",
        feature = "date",
        feature = "keyboard",
        feature = "loadavg",
        feature = "weather"
    )),
    allow(unused_mut)
)]
pub fn directory(settings: &FeatureSettings, session: &SessionEnv) -> Directory {
    let mut directory = Directory::new();

    #[cfg(feature = "audio")]
    {
        directory = wsb_desktop::register_audio(directory);
    }
    #[cfg(feature = "camera")]
    {
        directory = wsb_system::register_camera(directory);
    }
    #[cfg(feature = "companion")]
    {
        directory = wsb_companion::register(directory, session);
    }
    #[cfg(feature = "date")]
    {
        directory = wsb_clock::register(directory, &settings.date);
    }
    #[cfg(feature = "keyboard")]
    {
        directory = wsb_desktop::register_keyboard(directory, &settings.keyboard);
    }
    #[cfg(feature = "loadavg")]
    {
        directory = wsb_system::register_loadavg(directory);
    }
    #[cfg(feature = "weather")]
    {
        directory = wsb_weather::register(directory, &settings.weather);
    }

    debug!(features = ?directory.names(), "Feature directory ready");
    directory
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_matches_enabled_features() {
        let directory = directory(&FeatureSettings::default(), &SessionEnv::new("/tmp", "tester"));
        assert_eq!(directory.names(), features::ENABLED);
    }

    #[test]
    fn test_requirements() {
        assert_eq!(features::requirement("audio"), Some(features::Requirement::Command("pactl")));
        assert_eq!(
            features::requirement("camera"),
            Some(features::Requirement::File("/proc/modules"))
        );
        assert_eq!(features::requirement("date"), None);
    }
}
