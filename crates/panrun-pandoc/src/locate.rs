//! Discovery of the pandoc installation.
//!
//! Candidates are searched in priority order: the directory named by
//! [`DIR_ENV_VAR`], the directory of the `pandoc` found on `PATH`, then (off
//! Windows) [`FALLBACK_DIR`]. The highest version wins; equal versions keep
//! the earlier candidate. A found installation is cached for the rest of
//! the process; while nothing has been found, every lookup scans again.

use crate::version::{get_version, Version};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable naming a directory that contains pandoc.
pub const DIR_ENV_VAR: &str = "PANRUN_PANDOC_DIR";

/// User-local install directory checked last on non-Windows platforms.
pub const FALLBACK_DIR: &str = "~/opt/pandoc";

static LOCATION: OnceLock<ToolLocation> = OnceLock::new();

/// A discovered pandoc installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLocation {
    /// Directory containing the binary.
    pub dir: PathBuf,
    /// Version the binary reported.
    pub version: Version,
}

impl ToolLocation {
    /// Full path of the pandoc binary.
    pub fn binary(&self) -> PathBuf {
        binary_path(&self.dir)
    }

    /// Whether this installation is at least `min`; no minimum always holds.
    pub fn satisfies(&self, min: Option<&Version>) -> bool {
        min.map_or(true, |min| self.version >= *min)
    }
}

/// File name of the pandoc executable on this platform.
pub fn binary_name() -> &'static str {
    if cfg!(windows) {
        "pandoc.exe"
    } else {
        "pandoc"
    }
}

/// Path of the pandoc executable inside `dir`.
pub fn binary_path(dir: &Path) -> PathBuf {
    dir.join(binary_name())
}

/// Candidate install directories, highest priority first.
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(dir) = std::env::var_os(DIR_ENV_VAR).filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(dir));
    }

    if let Some(dir) = which::which("pandoc")
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(dir);
    }

    if !cfg!(windows) {
        dirs.push(PathBuf::from(shellexpand::tilde(FALLBACK_DIR).as_ref()));
    }

    dirs
}

/// Pick the candidate with the strictly highest version.
///
/// `version_of` is consulted for every candidate; ties keep the earlier
/// candidate. Returns `None` when nothing beats version `0`.
pub fn select_best<I, F>(candidates: I, mut version_of: F) -> Option<ToolLocation>
where
    I: IntoIterator<Item = PathBuf>,
    F: FnMut(&Path) -> Version,
{
    let mut best: Option<ToolLocation> = None;
    let mut best_version = Version::zero();

    for dir in candidates {
        let version = version_of(&dir);
        if version > best_version {
            best_version = version.clone();
            best = Some(ToolLocation { dir, version });
        }
    }

    best
}

/// Version of the pandoc in `dir`, or `0` if it is missing or unusable.
fn candidate_version(dir: &Path) -> Version {
    if !binary_path(dir).is_file() {
        return Version::zero();
    }
    match get_version(dir) {
        Ok(version) => version,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("ignoring pandoc in {}: {}", dir.display(), _e);
            Version::zero()
        }
    }
}

/// Scan all candidate directories without touching the process-wide cache.
pub fn discover() -> Option<ToolLocation> {
    let found = select_best(candidate_dirs(), candidate_version);

    #[cfg(feature = "tracing")]
    {
        match &found {
            Some(loc) => tracing::info!("found pandoc {} in {}", loc.version, loc.dir.display()),
            None => tracing::info!("no pandoc installation found"),
        }
    }

    found
}

/// The process-wide pandoc location.
///
/// Once an installation is found it is returned without rescanning. A
/// failed scan is not cached, so a pandoc installed later is still picked up.
pub fn locate() -> Option<&'static ToolLocation> {
    if let Some(loc) = LOCATION.get() {
        return Some(loc);
    }
    let found = discover()?;
    Some(LOCATION.get_or_init(|| found))
}
