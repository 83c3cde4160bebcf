//! Status aggregation core.
//!
//! * [`provider`]: the [`Provider`](provider::Provider) contract every feature implements.
//! * [`deadline`]: cooperative cancellation threaded through every provider call.
//! * [`directory`]: feature name to constructor, built once at startup.
//! * [`registry`]: the validated, ordered providers of one status bar.
//! * `Registry::status`: one round, sequential or parallel, first error wins.
//!
//! ## Example
//! ```rust
//! use wsb_kernel::prelude::*;
//!
//! #[derive(Debug)]
//! struct Hello;
//!
//! #[async_trait]
//! impl Provider for Hello {
//!     fn name(&self) -> &str {
//!         "hello"
//!     }
//!
//!     async fn fetch(&self, _deadline: &Deadline) -> Result<String, ProviderError> {
//!         Ok("hello".to_owned())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let directory = Directory::new().register("hello", || Hello);
//! let registry = Registry::builder().separator(", ").build(&directory, &["hello", "hello"])?;
//! assert_eq!(registry.status(&Deadline::new()).await?, "hello, hello");
//! # Ok::<(), StatusError>(())
//! # }).unwrap();
//! ```
pub mod config;
pub mod deadline;
pub mod directory;
pub mod engine;
pub mod env;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod registry;

pub use wsb_domain as domain;
