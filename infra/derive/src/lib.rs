#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the status bar infrastructure.
//! This crate provides attribute macros that remove boilerplate from the
//! runtime bootstrap and from the error enums declared across the workspace.
//!
//! ## Usage
//! Add the crate as a regular dependency of the consuming crate:
//! ```toml
//! [dependencies]
//! wsb-derive = { path = "../infra/derive" }
//! ```
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap the status bar Tokio runtime.
///
/// This macro transforms an `async fn main` into a standard `fn main` that builds
/// a Tokio runtime from the selected [`RuntimeConfig`] preset and blocks on the body.
///
/// # Arguments
///
/// * `lightweight` - Two workers and small stacks; the right choice for a status bar.
/// * `default` - Worker threads auto-detected from the available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[wsb_runtime::main(lightweight)]
/// async fn main() -> anyhow::Result<()> {
/// # Ok(())
/// }
/// ```
///
/// [`RuntimeConfig`]: https://docs.rs/wsb-runtime
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for declaring error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants whose only fields are
///   a source and a context, enabling `?` on upstream errors.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), plus a context field.
/// 4. Tuple or unit variants are rejected to keep error wiring explicit.
///
/// Variants carrying extra fields next to `source` (for example a provider name) are
/// still valid, but no `From` conversion is generated for them since the extra fields
/// cannot be filled in automatically.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[wsb_derive::wsb_error]
/// pub enum ProbeError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, ProbeError> {
///     std::fs::read_to_string("/proc/loadavg").context("Reading load average")
/// }
/// ```
#[proc_macro_attribute]
pub fn wsb_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
