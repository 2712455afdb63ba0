//! Self-contained HTML output.

use crate::convert::{ConvertRequest, Pandoc};
use crate::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Source format for the pass: strict markdown leaves existing HTML alone
/// instead of reparsing it.
pub const STRICT_MARKDOWN: &str = "markdown_strict";

/// Template that emits nothing but the converted body.
pub const BODY_TEMPLATE: &str = "$body$";

/// Request that bundles `input` into `output` using `template`.
pub fn self_contained_request(input: &Path, output: &Path, template: &Path) -> ConvertRequest {
    ConvertRequest::new(input)
        .from(STRICT_MARKDOWN)
        .output(output)
        .options([
            "--self-contained".to_string(),
            "--template".to_string(),
            template.to_string_lossy().into_owned(),
        ])
}

fn write_body_template() -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("panrun-template")
        .suffix(".html")
        .tempfile()?;
    writeln!(file, "{BODY_TEMPLATE}")?;
    file.flush()?;
    Ok(file)
}

impl Pandoc {
    /// Inline every external resource of `input` into `output`.
    ///
    /// `output` is created if it does not exist yet. Returns its absolute
    /// path.
    pub fn to_self_contained_html(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let input = input.as_ref().canonicalize()?;

        let output = output.as_ref();
        OpenOptions::new().create(true).append(true).open(output)?;
        let output = output.canonicalize()?;

        let template = write_body_template()?;
        let request = self_contained_request(&input, &output, template.path());
        self.convert(&request)?;

        Ok(output)
    }
}
