//! # Domain Models
//!
//! Pure configuration types shared by the status bar crates.
//! Keep it lean: no I/O or heavy logic, just data, defaults and simple helpers.

pub mod config;
