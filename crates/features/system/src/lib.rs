//! Proc file features.
//!
//! * `loadavg`: `load average: 0.10, 0.20, 0.15` from `/proc/loadavg`.
//! * `camera`: `cam: on` / `cam: off` from the `uvcvideo` use count in `/proc/modules`.
mod camera;
mod loadavg;

pub use crate::camera::{CAMERA, CameraProvider};
pub use crate::loadavg::{LOADAVG, LoadavgProvider};

use wsb_kernel::directory::Directory;

#[must_use]
pub fn register_loadavg(directory: Directory) -> Directory {
    directory.register(LOADAVG, LoadavgProvider::default)
}

#[must_use]
pub fn register_camera(directory: Directory) -> Directory {
    directory.register(CAMERA, CameraProvider::default)
}
