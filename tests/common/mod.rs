//! Shared helpers for CLI tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A directory holding a scripted pandoc stand-in.
///
/// `--version` prints `pandoc 3.1.2`; any other call records its arguments
/// one per line in `args.log` and exits with the configured code.
pub struct FakePandoc {
    pub dir: TempDir,
}

impl FakePandoc {
    pub fn new(exit_code: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("args.log");
        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then\n  echo 'pandoc 3.1.2'\n  exit 0\nfi\n\
             : > '{log}'\n\
             for a in \"$@\"; do printf '%s\\n' \"$a\" >> '{log}'; done\n\
             exit {exit_code}\n",
            log = log.display(),
        );
        let bin = dir.path().join("pandoc");
        fs::write(&bin, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        }
        Self { dir }
    }

    pub fn binary(&self) -> PathBuf {
        self.dir.path().join("pandoc")
    }

    pub fn args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("args.log"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Write a config file pointing panrun at this pandoc.
    pub fn config_in(&self, dir: &Path, extra: &str) -> PathBuf {
        let path = dir.join("panrun.toml");
        let content = format!(
            "[pandoc]\ndir = '{}'\n{}",
            self.dir.path().display(),
            extra
        );
        fs::write(&path, content).unwrap();
        path
    }
}
