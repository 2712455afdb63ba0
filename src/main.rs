mod cli;

use panrun::config::{self, Config};
use panrun_pandoc::{ConvertRequest, Pandoc, Version};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "panrun=debug,panrun_pandoc=debug".to_string()
        } else {
            "panrun=warn,panrun_pandoc=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let verbose = cli.verbose || config.pandoc.verbose;

    match cli.command {
        Commands::Check { min_version } => check(&config, min_version.as_ref()),
        Commands::Path => {
            let pandoc = resolve_pandoc(&config)?;
            println!("{}", pandoc.binary().display());
            Ok(())
        }
        Commands::Version => {
            let pandoc = resolve_pandoc(&config)?;
            println!("{}", pandoc.version());
            Ok(())
        }
        Commands::Convert {
            inputs,
            from,
            to,
            output,
            workdir,
            options,
        } => {
            // pandoc runs from the inputs' directory, so resolve paths against ours first
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let inputs: Vec<PathBuf> = inputs.iter().map(|p| cwd.join(p)).collect();
            let mut request = ConvertRequest::with_inputs(inputs)
                .options(options)
                .verbose(verbose);
            request.from = from;
            request.to = to;
            request.output = output.map(|p| cwd.join(p));
            request.working_dir = workdir;
            convert(&config, &request)
        }
        Commands::SelfContained { input, output } => {
            self_contained(&config, &input, &output, verbose)
        }
    }
}

/// The configured pandoc, or the discovered one.
fn resolve_pandoc(config: &Config) -> Result<Pandoc> {
    let pandoc = match config.pandoc.dir {
        Some(ref dir) => Pandoc::at(dir)
            .with_context(|| format!("No usable pandoc in configured dir {:?}", dir))?,
        None => Pandoc::discover()?,
    };
    tracing::debug!(
        "Using pandoc {} at {}",
        pandoc.version(),
        pandoc.binary().display()
    );
    Ok(pandoc.with_stack_size(config.pandoc.stack_size.clone()))
}

fn check(config: &Config, min_version: Option<&Version>) -> Result<()> {
    let pandoc = match resolve_pandoc(config) {
        Ok(pandoc) => pandoc,
        Err(e) => {
            println!("✗ pandoc");
            return Err(e);
        }
    };

    let ok = pandoc.satisfies(min_version);
    println!(
        "{} pandoc ({}) - {}",
        if ok { "✓" } else { "✗" },
        pandoc.version(),
        pandoc.binary().display()
    );

    if !ok {
        if let Some(min) = min_version {
            anyhow::bail!("pandoc {} or newer is required", min);
        }
    }

    Ok(())
}

fn convert(config: &Config, request: &ConvertRequest) -> Result<()> {
    let pandoc = resolve_pandoc(config)?;
    pandoc
        .convert(request)
        .context("Document conversion failed")?;

    if let Some(ref output) = request.output {
        tracing::info!("Wrote {}", output.display());
    }
    Ok(())
}

fn self_contained(config: &Config, input: &Path, output: &Path, verbose: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let pandoc = resolve_pandoc(config)?;
    if verbose {
        println!("Bundling {} into {}", input.display(), output.display());
    }
    let written: PathBuf = pandoc
        .to_self_contained_html(input, output)
        .context("Self-contained HTML conversion failed")?;

    println!("{}", written.display());
    Ok(())
}
