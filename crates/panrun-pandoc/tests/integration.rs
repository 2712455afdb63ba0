//! Integration tests for panrun-pandoc against a scripted stand-in pandoc.
#![cfg(unix)]

use panrun_pandoc::{ConvertRequest, EnvGuard, Error, Pandoc, Version};
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fake pandoc that reports version 3.1.2, records its arguments, working
/// directory and `LC_ALL`, then exits with `exit_code`.
struct FakePandoc {
    dir: TempDir,
}

impl FakePandoc {
    fn new(exit_code: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("args.log");
        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then\n  echo 'pandoc 3.1.2'\n  echo 'Features: +server'\n  exit 0\nfi\n\
             : > '{log}'\n\
             for a in \"$@\"; do printf '%s\\n' \"$a\" >> '{log}'; done\n\
             pwd > '{log}.cwd'\n\
             echo \"${{LC_ALL-unset}}\" > '{log}.lc_all'\n\
             exit {exit_code}\n",
            log = log.display(),
        );
        let bin = dir.path().join("pandoc");
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    fn pandoc(&self) -> Pandoc {
        Pandoc::at(self.dir.path()).unwrap()
    }

    fn args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("args.log"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn cwd(&self) -> PathBuf {
        let raw = fs::read_to_string(self.dir.path().join("args.log.cwd")).unwrap();
        PathBuf::from(raw.trim()).canonicalize().unwrap()
    }

    fn lc_all(&self) -> String {
        fs::read_to_string(self.dir.path().join("args.log.lc_all"))
            .unwrap()
            .trim()
            .to_string()
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap()
}

#[test]
#[serial]
fn version_is_read_from_first_line() {
    let fake = FakePandoc::new(0);
    assert_eq!(fake.pandoc().version(), &Version::new([3, 1, 2]));
}

#[test]
#[serial]
fn convert_passes_arguments_and_runs_in_input_dir() {
    let fake = FakePandoc::new(0);
    let docs = tempfile::tempdir().unwrap();
    let input = docs.path().join("notes.md");
    fs::write(&input, "# Notes\n").unwrap();

    let request = ConvertRequest::new(&input)
        .to("html")
        .output("notes.html")
        .option("--toc");
    fake.pandoc().convert(&request).unwrap();

    assert_eq!(
        fake.args(),
        vec![
            "+RTS".to_string(),
            "-K512m".to_string(),
            "-RTS".to_string(),
            input.display().to_string(),
            "--to".to_string(),
            "html".to_string(),
            "--output".to_string(),
            "notes.html".to_string(),
            "--toc".to_string(),
        ]
    );
    assert_eq!(fake.cwd(), canonical(docs.path()));
}

#[test]
#[serial]
fn explicit_working_dir_is_used() {
    let fake = FakePandoc::new(0);
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();

    let request =
        ConvertRequest::with_inputs([a.path().join("x.md"), b.path().join("y.md")])
            .working_dir(work.path());
    fake.pandoc().convert(&request).unwrap();

    assert_eq!(fake.cwd(), canonical(work.path()));
}

#[test]
#[serial]
fn arguments_with_spaces_stay_whole() {
    let fake = FakePandoc::new(0);
    let docs = tempfile::tempdir().unwrap();
    let input = docs.path().join("my notes.md");

    let request = ConvertRequest::new(&input).options(["--metadata", "title=My Notes"]);
    fake.pandoc().convert(&request).unwrap();

    let args = fake.args();
    assert!(args.contains(&input.display().to_string()));
    assert_eq!(args.last().map(String::as_str), Some("title=My Notes"));
}

#[test]
#[serial]
fn nonzero_exit_is_reported_with_code() {
    let fake = FakePandoc::new(1);
    let docs = tempfile::tempdir().unwrap();

    let err = fake
        .pandoc()
        .convert(&ConvertRequest::new(docs.path().join("x.md")))
        .unwrap_err();

    assert!(matches!(err, Error::ConversionFailed { code: Some(1) }));
    assert!(err.to_string().contains('1'));
}

#[test]
#[serial]
fn locale_is_cleared_for_child_and_restored() {
    let fake = FakePandoc::new(0);
    let docs = tempfile::tempdir().unwrap();

    let mut outer = EnvGuard::new();
    outer.set("LC_ALL", "tr_TR.UTF-8");

    fake.pandoc()
        .convert(&ConvertRequest::new(docs.path().join("x.md")))
        .unwrap();

    assert_eq!(fake.lc_all(), "unset");
    assert_eq!(std::env::var("LC_ALL").unwrap(), "tr_TR.UTF-8");
}

#[test]
#[serial]
fn self_contained_html_creates_output_and_uses_template() {
    let fake = FakePandoc::new(0);
    let docs = tempfile::tempdir().unwrap();
    let input = docs.path().join("doc.md");
    let output = docs.path().join("doc.html");
    fs::write(&input, "<p>hello</p>\n").unwrap();
    assert!(!output.exists());

    let result = fake.pandoc().to_self_contained_html(&input, &output).unwrap();

    assert!(output.exists());
    assert!(result.is_absolute());
    assert_eq!(result, canonical(&output));

    let args = fake.args();
    let from = args.iter().position(|a| a == "--from").unwrap();
    assert_eq!(args[from + 1], "markdown_strict");
    assert!(args.iter().any(|a| a == "--self-contained"));
    let template = args.iter().position(|a| a == "--template").unwrap();
    assert!(args[template + 1].contains("panrun-template"));
    assert_eq!(args[3], canonical(&input).display().to_string());
}

#[test]
#[serial]
fn self_contained_html_fails_for_missing_input() {
    let fake = FakePandoc::new(0);
    let docs = tempfile::tempdir().unwrap();

    let result = fake
        .pandoc()
        .to_self_contained_html(docs.path().join("missing.md"), docs.path().join("out.html"));
    assert!(matches!(result, Err(Error::Io(_))));
}
