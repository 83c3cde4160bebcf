use crate::command;
use regex::Regex;
use std::sync::LazyLock;
use wsb_kernel::domain::config::KeyboardConfig;
use wsb_kernel::prelude::*;

pub const KEYBOARD: &str = "keyboard";
const SETXKBMAP: &str = "setxkbmap";

static LAYOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^layout:\s+(\S+)\s*$").expect("layout pattern is valid"));
static VARIANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^variant:\s+(\S+)\s*$").expect("variant pattern is valid"));

/// Current keyboard layout from `setxkbmap -query`, optionally with its variant.
#[derive(Debug, Clone, Default)]
pub struct KeyboardProvider {
    variant: bool,
}

impl KeyboardProvider {
    #[must_use]
    pub const fn new(config: &KeyboardConfig) -> Self {
        Self { variant: config.variant }
    }
}

#[async_trait]
impl Provider for KeyboardProvider {
    fn name(&self) -> &str {
        KEYBOARD
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        let Some(query) = command::run(deadline, SETXKBMAP, &["-query"]).await? else {
            return Ok(String::new());
        };
        Ok(format_layout(&query, self.variant))
    }
}

fn format_layout(query: &str, with_variant: bool) -> String {
    let Some(layout) = LAYOUT.captures(query).map(|c| c[1].to_owned()) else {
        return String::new();
    };
    if !with_variant {
        return layout;
    }
    match VARIANT.captures(query) {
        Some(variant) => format!("{layout} {}", &variant[1]),
        None => layout,
    }
}
