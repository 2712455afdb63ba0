mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./panrun.toml", "~/.config/panrun/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if !is_valid_stack_size(&config.pandoc.stack_size) {
        anyhow::bail!(
            "Invalid pandoc stack_size '{}': expected digits with an optional k, m or g suffix",
            config.pandoc.stack_size
        );
    }

    if let Some(ref dir) = config.pandoc.dir {
        if !dir.is_dir() {
            tracing::warn!("Configured pandoc dir does not exist: {:?}", dir);
        }
    }

    Ok(())
}

fn is_valid_stack_size(size: &str) -> bool {
    let digits = size.trim_end_matches(['k', 'K', 'm', 'M', 'g', 'G']);
    let suffix_len = size.len() - digits.len();
    !digits.is_empty() && suffix_len <= 1 && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_when_section_missing() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.pandoc.stack_size, "512m");
        assert!(config.pandoc.dir.is_none());
        assert!(!config.pandoc.verbose);
    }

    #[test]
    fn reads_pandoc_section() {
        let file = write_config(
            r#"
[pandoc]
dir = "/opt/pandoc/bin"
stack_size = "1g"
verbose = true
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.pandoc.dir.as_deref(),
            Some(Path::new("/opt/pandoc/bin"))
        );
        assert_eq!(config.pandoc.stack_size, "1g");
        assert!(config.pandoc.verbose);
    }

    #[test]
    fn rejects_bad_stack_size() {
        let file = write_config("[pandoc]\nstack_size = \"lots\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("stack_size"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let file = write_config("[pandoc\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn stack_size_syntax() {
        assert!(is_valid_stack_size("512m"));
        assert!(is_valid_stack_size("2G"));
        assert!(is_valid_stack_size("65536"));
        assert!(!is_valid_stack_size("m"));
        assert!(!is_valid_stack_size("512mm"));
        assert!(!is_valid_stack_size(""));
        assert!(!is_valid_stack_size("1.5g"));
    }
}
