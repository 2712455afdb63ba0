//! Dotted numeric versions and the `--version` oracle.

use crate::command::ToolCommand;
use crate::env::with_sanitized_environment;
use crate::locate::binary_path;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A dotted numeric version such as `3.1.11.1`.
///
/// Ordering compares components left to right; when one version is a prefix
/// of the other, the shorter one sorts first (`1.12 < 1.12.0`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(Vec<u64>);

impl Version {
    /// Build a version from its components.
    pub fn new(components: impl Into<Vec<u64>>) -> Self {
        Self(components.into())
    }

    /// The version `0`, reported for candidates that are not installed.
    pub fn zero() -> Self {
        Self(vec![0])
    }

    /// The numeric components.
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::version_parse(s));
        }
        s.split(['.', '-'])
            .map(|part| part.parse::<u64>().map_err(|_| Error::version_parse(s)))
            .collect::<Result<Vec<_>>>()
            .map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{c}")?;
            first = false;
        }
        Ok(())
    }
}

/// Extract the version from `--version` output.
///
/// The first line is expected to read `<name> <version> ...`.
pub fn parse_version_output(output: &str) -> Result<Version> {
    let first_line = output.lines().next().unwrap_or_default();
    first_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| Error::version_parse(first_line))?
        .parse()
        .map_err(|_| Error::version_parse(first_line))
}

/// Ask the pandoc installed in `dir` for its version.
///
/// Fails if the binary cannot be executed or its output does not parse.
pub fn get_version(dir: &Path) -> Result<Version> {
    let program = binary_path(dir);
    let output =
        with_sanitized_environment(|| ToolCommand::new(&program).arg("--version").output())?;
    let version = parse_version_output(&output.stdout)?;

    #[cfg(feature = "tracing")]
    tracing::debug!("{} reports version {}", program.display(), version);

    Ok(version)
}
