//! # panrun-pandoc
//!
//! Locate an installed pandoc and run it as a subprocess.
//!
//! This crate provides:
//!
//! - **Discovery** ([`locate`]) -- scan the `PANRUN_PANDOC_DIR` override,
//!   `PATH` and `~/opt/pandoc`, keep the newest pandoc, cache it for the
//!   process lifetime.
//! - **Versions** ([`Version`], [`get_version`]) -- parse `pandoc --version`
//!   into a comparable value.
//! - **Environment sanitization** ([`Sanitizer`]) -- clear the locale
//!   variables that make pandoc hang, restoring them afterwards.
//! - **Conversion** ([`Pandoc::convert`]) -- build and run the argument
//!   vector for a [`ConvertRequest`].
//! - **Self-contained HTML** ([`Pandoc::to_self_contained_html`]).
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use panrun_pandoc::{convert, ConvertRequest, Version};
//!
//! if panrun_pandoc::is_available(Some(&Version::new([2, 19]))) {
//!     convert(&ConvertRequest::new("notes.md").to("html").output("notes.html"))?;
//! }
//! # Ok::<(), panrun_pandoc::Error>(())
//! ```
//!
//! Every call mutates process-global environment variables for its
//! duration, so conversions must not run concurrently in one process.

pub mod command;
pub mod convert;
pub mod env;
mod error;
pub mod html;
pub mod locate;
pub mod version;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use convert::{resolve_working_dir, ConvertRequest, Pandoc, DEFAULT_STACK_SIZE};
pub use env::{with_sanitized_environment, EnvGuard, LocaleSource, Platform, Sanitizer};
pub use error::{Error, Result};
pub use locate::{locate, ToolLocation};
pub use version::{get_version, Version};

use std::path::{Path, PathBuf};

/// Whether a pandoc at least `min_version` (or any pandoc) is installed.
pub fn is_available(min_version: Option<&Version>) -> bool {
    locate().is_some_and(|loc| loc.satisfies(min_version))
}

/// Path of the discovered pandoc binary.
pub fn tool_path() -> Result<PathBuf> {
    locate().map(ToolLocation::binary).ok_or(Error::ToolNotFound)
}

/// Version of the discovered pandoc.
pub fn version() -> Result<Version> {
    locate()
        .map(|loc| loc.version.clone())
        .ok_or(Error::ToolNotFound)
}

/// Convert with the discovered pandoc.
pub fn convert(request: &ConvertRequest) -> Result<()> {
    Pandoc::discover()?.convert(request)
}

/// Bundle `input` into a self-contained HTML file at `output` with the
/// discovered pandoc, returning the absolute output path.
pub fn to_self_contained_html(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<PathBuf> {
    Pandoc::discover()?.to_self_contained_html(input, output)
}
