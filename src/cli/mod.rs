//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod batch;
mod flip;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, JanusConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Find all stylesheets in a directory (recursively), in sorted order.
pub fn find_css_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*.css", glob::Pattern::escape(&dir.display().to_string()));

    let mut files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// CSSJanus - flip stylesheets between left-to-right and right-to-left
#[derive(Parser)]
#[command(name = "cssjanus")]
#[command(about = "CSSJanus - Convert left-to-right CSS to right-to-left")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flip options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct FlipArgs {
    /// Swap `ltr` and `rtl` inside URLs
    #[arg(long)]
    pub dir_in_url: bool,

    /// Swap `left` and `right` inside URLs
    #[arg(long)]
    pub edge_in_url: bool,

    /// Path to janus.toml (default: search upward from the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flip a single stylesheet
    Flip {
        /// Input stylesheet (omit or use `-` for stdin)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: FlipArgs,
    },

    /// Flip every `.css` file under a directory
    Batch {
        /// Directory to search for stylesheets
        dir: PathBuf,

        /// Mirror outputs under this directory instead of next to the inputs
        #[arg(long)]
        out: Option<PathBuf>,

        /// Suffix appended to each output file stem (default: ".rtl")
        #[arg(long, allow_hyphen_values = true)]
        suffix: Option<String>,

        /// Number of worker threads (0 = one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        #[command(flatten)]
        flags: FlipArgs,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Flip { input, output, flags } => {
            let config = match resolve_config(&flags, CliOverrides::default()) {
                Ok(config) => config,
                Err(code) => return code,
            };
            flip::run_flip(input.as_deref(), output.as_deref(), &config)
        }
        Commands::Batch { dir, out, suffix, jobs, flags } => {
            let overrides = CliOverrides { suffix, jobs, ..Default::default() };
            let config = match resolve_config(&flags, overrides) {
                Ok(config) => config,
                Err(code) => return code,
            };
            batch::run_batch(&dir, out.as_deref(), &config)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "cssjanus=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load janus.toml and apply command-line overrides on top of it.
///
/// The URL flags only ever switch a flip on; leaving them off keeps the
/// value from the config file.
fn resolve_config(flags: &FlipArgs, mut overrides: CliOverrides) -> Result<JanusConfig, ExitCode> {
    let mut config = match load_config(flags.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    if flags.dir_in_url {
        overrides.dir_in_url = Some(true);
    }
    if flags.edge_in_url {
        overrides.edge_in_url = Some(true);
    }
    merge_cli_overrides(&mut config, &overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_css_files_recursive() {
        let temp = TempDir::new().expect("should create temp dir");
        let nested = temp.path().join("components");
        fs::create_dir_all(&nested).expect("should create subdirectory");
        fs::write(temp.path().join("main.css"), "a{}").expect("should write file");
        fs::write(nested.join("button.css"), "b{}").expect("should write file");
        fs::write(nested.join("notes.txt"), "").expect("should write file");

        let files = find_css_files(temp.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().and_then(|e| e.to_str()) == Some("css")));
    }

    #[test]
    fn test_cli_parses_batch() {
        let cli = Cli::try_parse_from([
            "cssjanus",
            "batch",
            "styles",
            "--suffix",
            "-rtl",
            "-j",
            "3",
            "--edge-in-url",
        ])
        .expect("should parse batch arguments");

        match cli.command {
            Commands::Batch { dir, suffix, jobs, flags, out } => {
                assert_eq!(dir, PathBuf::from("styles"));
                assert_eq!(suffix.as_deref(), Some("-rtl"));
                assert_eq!(jobs, Some(3));
                assert!(flags.edge_in_url);
                assert!(!flags.dir_in_url);
                assert!(out.is_none());
            }
            _ => panic!("Expected batch command"),
        }
    }

    #[test]
    fn test_resolve_config_flags_override_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("janus.toml");
        fs::write(&config_path, "[batch]\nsuffix = \".flipped\"\n").expect("should write config");

        let flags = FlipArgs { dir_in_url: true, edge_in_url: false, config: Some(config_path) };
        let config = resolve_config(&flags, CliOverrides::default())
            .unwrap_or_else(|_| panic!("config should resolve"));

        assert!(config.transform.transform_dir_in_url);
        assert!(!config.transform.transform_edge_in_url);
        assert_eq!(config.batch.suffix, ".flipped");
    }

    #[test]
    fn test_resolve_config_rejects_bad_suffix_override() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("janus.toml");
        fs::write(&config_path, "").expect("should write config");

        let flags = FlipArgs { config: Some(config_path), ..Default::default() };
        let overrides = CliOverrides { suffix: Some(String::new()), ..Default::default() };
        assert!(resolve_config(&flags, overrides).is_err());
    }
}
