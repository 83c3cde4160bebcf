pub use crate::deadline::Deadline;
pub use crate::directory::Directory;
pub use crate::engine::join;
pub use crate::env::SessionEnv;
pub use crate::error::{StatusError, StatusErrorExt};
pub use crate::provider::{Provider, ProviderError, ProviderErrorExt, ProviderFactory};
pub use crate::registry::{ExecutionMode, Registry, RegistryBuilder, parse_list};
pub use async_trait::async_trait;
