//! Desktop session features backed by external commands.
//!
//! Both features shell out, so both honour the round deadline by killing their child
//! process when the round is cancelled.
mod audio;
mod command;
mod keyboard;

pub use crate::audio::{AUDIO, AudioProvider};
pub use crate::keyboard::{KEYBOARD, KeyboardProvider};

use wsb_kernel::directory::Directory;
use wsb_kernel::domain::config::KeyboardConfig;

#[must_use]
pub fn register_audio(directory: Directory) -> Directory {
    directory.register(AUDIO, AudioProvider::default)
}

#[must_use]
pub fn register_keyboard(directory: Directory, config: &KeyboardConfig) -> Directory {
    let config = config.clone();
    directory.register(KEYBOARD, move || KeyboardProvider::new(&config))
}
