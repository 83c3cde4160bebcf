use crate::command;
use regex::Regex;
use std::sync::LazyLock;
use wsb_kernel::prelude::*;

pub const AUDIO: &str = "audio";
const PACTL: &str = "pactl";
const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

static VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+%").expect("volume pattern is valid"));

/// Default sink volume via `pactl`, e.g. `vol: 40%` or `vol: left: 40% / right: 60%`.
///
/// A `(muted)` suffix is added when the sink is muted. Without `pactl` the feature
/// stays empty.
#[derive(Debug, Clone, Default)]
pub struct AudioProvider;

#[async_trait]
impl Provider for AudioProvider {
    fn name(&self) -> &str {
        AUDIO
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        let Some(volume) = command::run(deadline, PACTL, &["get-sink-volume", DEFAULT_SINK]).await?
        else {
            return Ok(String::new());
        };

        let mut text = format_volume(&volume);
        if text.is_empty() {
            return Ok(text);
        }

        if let Some(mute) = command::run(deadline, PACTL, &["get-sink-mute", DEFAULT_SINK]).await?
            && is_muted(&mute)
        {
            text.push_str(" (muted)");
        }
        Ok(text)
    }
}

/// Uses the first two percentages (front left / front right).
fn format_volume(output: &str) -> String {
    let mut levels = VOLUME.find_iter(output).map(|m| m.as_str());
    match (levels.next(), levels.next()) {
        (None, _) => String::new(),
        (Some(level), None) => format!("vol: {level}"),
        (Some(left), Some(right)) if left == right => format!("vol: {left}"),
        (Some(left), Some(right)) => format!("vol: left: {left} / right: {right}"),
    }
}

fn is_muted(output: &str) -> bool {
    output.contains("Mute: yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume_balanced() {
        let out = concat!(
            "Volume: front-left: 26214 /  40% / -23.88 dB,   ",
            "front-right: 26214 /  40% / -23.88 dB\n",
            "        balance 0.00\n",
        );
        assert_eq!(format_volume(out), "vol: 40%");
    }

    #[test]
    fn test_format_volume_unbalanced() {
        let out = concat!(
            "Volume: front-left: 26214 /  40% / -23.88 dB,   ",
            "front-right: 39321 /  60% / -13.31 dB\n",
        );
        assert_eq!(format_volume(out), "vol: left: 40% / right: 60%");
    }

    #[test]
    fn test_format_volume_mono_and_empty() {
        assert_eq!(format_volume("Volume: mono: 65536 / 100% / 0.00 dB"), "vol: 100%");
        assert_eq!(format_volume("No sink"), "");
    }

    #[test]
    fn test_is_muted() {
        assert!(is_muted("Mute: yes\n"));
        assert!(!is_muted("Mute: no\n"));
    }
}
