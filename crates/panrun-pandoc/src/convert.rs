//! Conversion requests and the pandoc handle that runs them.

use crate::command::ToolCommand;
use crate::env::with_sanitized_environment;
use crate::locate::{locate, ToolLocation};
use crate::version::{get_version, Version};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Haskell runtime stack size passed as `+RTS -K<size> -RTS`.
pub const DEFAULT_STACK_SIZE: &str = "512m";

/// One pandoc invocation.
///
/// # Example
///
/// ```
/// use panrun_pandoc::ConvertRequest;
///
/// let request = ConvertRequest::new("/docs/notes.md")
///     .to("html")
///     .output("notes.html")
///     .option("--toc");
/// assert_eq!(request.inputs.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertRequest {
    /// Input documents.
    pub inputs: Vec<PathBuf>,
    /// Source format (`--from`).
    pub from: Option<String>,
    /// Target format (`--to`).
    pub to: Option<String>,
    /// Output file (`--output`).
    pub output: Option<PathBuf>,
    /// Extra arguments passed to pandoc verbatim.
    pub options: Vec<String>,
    /// Directory to run pandoc in; defaults to the inputs' directory.
    pub working_dir: Option<PathBuf>,
    /// Echo the command line before running it.
    pub verbose: bool,
}

impl ConvertRequest {
    /// A request converting a single input.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            inputs: vec![input.into()],
            ..Self::default()
        }
    }

    /// A request converting several inputs in one run.
    pub fn with_inputs(inputs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from(mut self, format: impl Into<String>) -> Self {
        self.from = Some(format.into());
        self
    }

    pub fn to(mut self, format: impl Into<String>) -> Self {
        self.to = Some(format.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn option(mut self, opt: impl Into<String>) -> Self {
        self.options.push(opt.into());
        self
    }

    pub fn options(mut self, opts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options.extend(opts.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Pandoc arguments for this request, without the runtime flags.
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self
            .inputs
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        if let Some(ref to) = self.to {
            args.push("--to".to_string());
            args.push(to.clone());
        }
        if let Some(ref from) = self.from {
            args.push("--from".to_string());
            args.push(from.clone());
        }
        if let Some(ref output) = self.output {
            args.push("--output".to_string());
            args.push(output.to_string_lossy().into_owned());
        }

        args.extend(self.options.iter().cloned());
        args
    }
}

/// Directory pandoc should run in.
///
/// An explicit directory always wins. Otherwise every input must share one
/// parent directory; a bare file name counts as the current directory.
pub fn resolve_working_dir(inputs: &[PathBuf], explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let mut dirs: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let parent = match input.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dirs.contains(&parent) {
            dirs.push(parent);
        }
    }

    match dirs.len() {
        0 => Ok(PathBuf::from(".")),
        1 => Ok(dirs.remove(0)),
        _ => Err(Error::InputLayout { dirs }),
    }
}

/// Runtime flags that raise the Haskell stack limit.
pub fn stack_size_args(stack_size: &str) -> [String; 3] {
    [
        "+RTS".to_string(),
        format!("-K{stack_size}"),
        "-RTS".to_string(),
    ]
}

/// A usable pandoc installation.
#[derive(Debug, Clone)]
pub struct Pandoc {
    location: ToolLocation,
    stack_size: String,
}

impl Pandoc {
    /// Wrap an already known location.
    pub fn new(location: ToolLocation) -> Self {
        Self {
            location,
            stack_size: DEFAULT_STACK_SIZE.to_string(),
        }
    }

    /// Use the pandoc installed in `dir`, querying its version.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let version = get_version(&dir)?;
        Ok(Self::new(ToolLocation { dir, version }))
    }

    /// Use the process-wide discovered installation.
    pub fn discover() -> Result<Self> {
        locate().cloned().map(Self::new).ok_or(Error::ToolNotFound)
    }

    /// Override the runtime stack size (e.g. `"1g"`).
    pub fn with_stack_size(mut self, stack_size: impl Into<String>) -> Self {
        self.stack_size = stack_size.into();
        self
    }

    pub fn location(&self) -> &ToolLocation {
        &self.location
    }

    pub fn version(&self) -> &Version {
        &self.location.version
    }

    /// Full path of the pandoc binary.
    pub fn binary(&self) -> PathBuf {
        self.location.binary()
    }

    pub fn stack_size(&self) -> &str {
        &self.stack_size
    }

    /// Whether this installation is at least `min`.
    pub fn satisfies(&self, min: Option<&Version>) -> bool {
        self.location.satisfies(min)
    }

    /// Build the command for `request` without running it.
    ///
    /// Fails with [`Error::InputLayout`] when no working directory can be
    /// determined.
    pub fn command(&self, request: &ConvertRequest) -> Result<ToolCommand> {
        let working_dir = resolve_working_dir(&request.inputs, request.working_dir.as_deref())?;

        let mut cmd = ToolCommand::new(self.binary());
        cmd.args(stack_size_args(&self.stack_size))
            .args(request.to_args())
            .current_dir(working_dir);
        Ok(cmd)
    }

    /// Run pandoc for `request` and wait for it.
    ///
    /// A non-zero exit becomes [`Error::ConversionFailed`] carrying the code.
    pub fn convert(&self, request: &ConvertRequest) -> Result<()> {
        let cmd = self.command(request)?;

        #[cfg(feature = "tracing")]
        tracing::info!("running {}", cmd);

        if request.verbose {
            println!("{cmd}");
        }

        let status = with_sanitized_environment(|| cmd.status())?;
        if !status.success() {
            #[cfg(feature = "tracing")]
            tracing::error!("pandoc exited with {}", status);
            return Err(Error::ConversionFailed {
                code: status.code(),
            });
        }

        Ok(())
    }
}
