use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pandoc: PandocConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PandocConfig {
    /// Directory containing pandoc; skips discovery when set
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Haskell runtime stack size passed as `+RTS -K<size> -RTS`
    #[serde(default = "default_stack_size")]
    pub stack_size: String,

    /// Echo every pandoc command line before running it
    #[serde(default)]
    pub verbose: bool,
}

impl Default for PandocConfig {
    fn default() -> Self {
        Self {
            dir: None,
            stack_size: default_stack_size(),
            verbose: false,
        }
    }
}

fn default_stack_size() -> String {
    panrun_pandoc::DEFAULT_STACK_SIZE.to_string()
}
