//! Scoped process-environment sanitization around pandoc invocations.
//!
//! pandoc can hang or misbehave when `LC_ALL` or `LC_CTYPE` select a locale
//! it cannot handle, and on Linux it needs `HOME` plus a usable `LANG`. The
//! [`Sanitizer`] removes and synthesizes those variables for the duration of
//! a closure and puts everything back afterwards, on error and panic too.
//!
//! The environment is process-global: do not run sanitized calls from
//! several threads at once.

use crate::command::ToolCommand;
use crate::{Error, Result};
use std::env;
use std::ffi::OsString;

/// Locale variables removed for the duration of every pandoc call.
pub const CLEARED_VARS: [&str; 2] = ["LC_ALL", "LC_CTYPE"];

/// Locale synthesized for `LANG` when the system provides it.
pub const PREFERRED_LANG: &str = "C.UTF-8";

/// Locale synthesized for `LANG` otherwise.
pub const FALLBACK_LANG: &str = "en_US.UTF-8";

/// Operating-system family, as far as environment handling cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux: requires `HOME` and gets a synthesized `LANG`.
    Linux,
    /// Everything else: only the locale variables are cleared.
    Other,
}

impl Platform {
    /// The platform this process runs on.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// Source of installed system locale names.
pub trait LocaleSource {
    /// Names as printed by `locale -a`.
    fn available_locales(&self) -> Vec<String>;
}

/// Lists locales by running `locale -a`; empty if that fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocales;

impl LocaleSource for SystemLocales {
    fn available_locales(&self) -> Vec<String> {
        match ToolCommand::new("locale").arg("-a").output() {
            Ok(out) => out.stdout.lines().map(|l| l.trim().to_string()).collect(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("could not list system locales: {}", _e);
                Vec::new()
            }
        }
    }
}

impl<F> LocaleSource for F
where
    F: Fn() -> Vec<String>,
{
    fn available_locales(&self) -> Vec<String> {
        self()
    }
}

/// Pick the `LANG` value to synthesize from the installed locales.
///
/// glibc lists `C.UTF-8` as `C.utf8`; both spellings count.
pub fn preferred_lang(locales: &[String]) -> &'static str {
    let has_c_utf8 = locales
        .iter()
        .any(|l| l.eq_ignore_ascii_case("C.UTF-8") || l.eq_ignore_ascii_case("C.utf8"));
    if has_c_utf8 {
        PREFERRED_LANG
    } else {
        FALLBACK_LANG
    }
}

/// Records the prior value of every variable it touches and restores them
/// all when dropped.
#[derive(Debug, Default)]
pub struct EnvGuard {
    saved: Vec<(String, Option<OsString>)>,
}

impl EnvGuard {
    /// Create a guard that has not touched anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn remember(&mut self, key: &str) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.to_string(), env::var_os(key)));
        }
    }

    /// Set `key` until the guard is dropped.
    pub fn set(&mut self, key: &str, value: impl Into<OsString>) {
        self.remember(key);
        env::set_var(key, value.into());
    }

    /// Remove `key` until the guard is dropped.
    pub fn remove(&mut self, key: &str) {
        self.remember(key);
        env::remove_var(key);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(v) => env::set_var(&key, v),
                None => env::remove_var(&key),
            }
        }
    }
}

/// Runs closures inside a sanitized process environment.
#[derive(Debug, Clone)]
pub struct Sanitizer<L = SystemLocales> {
    platform: Platform,
    locales: L,
}

impl Sanitizer<SystemLocales> {
    /// A sanitizer for the running platform, probing real system locales.
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            locales: SystemLocales,
        }
    }
}

impl Default for Sanitizer<SystemLocales> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LocaleSource> Sanitizer<L> {
    /// A sanitizer with an explicit platform and locale source.
    pub fn with(platform: Platform, locales: L) -> Self {
        Self { platform, locales }
    }

    /// Run `body` with the locale variables cleared (and, on Linux, `LANG`
    /// synthesized), then restore the environment.
    ///
    /// On Linux a missing `HOME` fails before `body` runs.
    pub fn run<T>(&self, body: impl FnOnce() -> Result<T>) -> Result<T> {
        if self.platform == Platform::Linux && env::var_os("HOME").is_none() {
            return Err(Error::Environment(
                "the HOME environment variable must be set on Linux to run pandoc".to_string(),
            ));
        }

        let mut guard = EnvGuard::new();
        for var in CLEARED_VARS {
            guard.remove(var);
        }

        if self.platform == Platform::Linux && env::var_os("LANG").is_none() {
            let lang = preferred_lang(&self.locales.available_locales());
            #[cfg(feature = "tracing")]
            tracing::debug!("LANG is unset, using {} for this call", lang);
            guard.set("LANG", lang);
        }

        let result = body();
        drop(guard);
        result
    }
}

/// Run `body` inside a sanitized environment for the current platform.
pub fn with_sanitized_environment<T>(body: impl FnOnce() -> Result<T>) -> Result<T> {
    Sanitizer::new().run(body)
}
