//! Batch command implementation

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayon::prelude::*;
use tracing::{debug, info};

use super::{find_css_files, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::JanusConfig;
use crate::transform::{transform, TransformOptions};

/// Output path for `input`: `<stem><suffix>.css`, next to the input or
/// mirrored under `out_dir`.
pub(crate) fn output_path(
    input: &Path,
    root: &Path,
    out_dir: Option<&Path>,
    suffix: &str,
) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let file_name = format!("{}{}.css", stem, suffix);

    match out_dir {
        Some(out) => {
            let relative = input.strip_prefix(root).unwrap_or(input);
            out.join(relative).with_file_name(file_name)
        }
        None => input.with_file_name(file_name),
    }
}

/// Whether `path` is a previous output of this command (`*.rtl.css`).
fn is_flipped_output(path: &Path, suffix: &str) -> bool {
    path.file_stem().and_then(|s| s.to_str()).is_some_and(|stem| stem.ends_with(suffix))
}

fn flip_file(input: &Path, output: &Path, options: &TransformOptions) -> Result<(), String> {
    let css = fs::read_to_string(input)
        .map_err(|e| format!("Cannot read {}: {}", input.display(), e))?;
    let flipped = transform(&css, options).map_err(|e| format!("{}: {}", input.display(), e))?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create {}: {}", parent.display(), e))?;
    }
    fs::write(output, flipped).map_err(|e| format!("Cannot write {}: {}", output.display(), e))?;

    debug!(input = %input.display(), output = %output.display(), "flipped");
    Ok(())
}

/// Stylesheets under `dir`, minus earlier outputs of this command.
fn collect_inputs(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    find_css_files(dir).into_iter().filter(|p| !is_flipped_output(p, suffix)).collect()
}

/// Flip `inputs` in parallel, returning one message per failed file.
fn flip_all(
    inputs: &[PathBuf],
    dir: &Path,
    out: Option<&Path>,
    config: &JanusConfig,
) -> Result<Vec<String>, rayon::ThreadPoolBuildError> {
    let suffix = config.batch.suffix.as_str();
    let options = config.transform;
    let work = || -> Vec<String> {
        inputs
            .par_iter()
            .filter_map(|input| {
                let output = output_path(input, dir, out, suffix);
                flip_file(input, &output, &options).err()
            })
            .collect()
    };

    if config.batch.jobs > 0 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(config.batch.jobs).build()?;
        Ok(pool.install(work))
    } else {
        Ok(work())
    }
}

/// Flip every stylesheet under `dir` in parallel.
pub fn run_batch(dir: &Path, out: Option<&Path>, config: &JanusConfig) -> ExitCode {
    if !dir.is_dir() {
        eprintln!("Error: Not a directory: {}", dir.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let inputs = collect_inputs(dir, &config.batch.suffix);
    if inputs.is_empty() {
        eprintln!("Warning: No .css files found in {}", dir.display());
        return ExitCode::from(EXIT_SUCCESS);
    }

    let failures = match flip_all(&inputs, dir, out, config) {
        Ok(failures) => failures,
        Err(e) => {
            eprintln!("Error: Cannot start worker pool: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    info!(files = inputs.len(), failed = failures.len(), "batch complete");

    for failure in &failures {
        eprintln!("Error: {}", failure);
    }
    println!("Flipped {} of {} stylesheets", inputs.len() - failures.len(), inputs.len());

    if failures.is_empty() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_next_to_input() {
        let path = output_path(Path::new("site/css/app.css"), Path::new("site"), None, ".rtl");
        assert_eq!(path, PathBuf::from("site/css/app.rtl.css"));
    }

    #[test]
    fn test_output_path_mirrored() {
        let path = output_path(
            Path::new("site/css/app.css"),
            Path::new("site"),
            Some(Path::new("dist")),
            "-rtl",
        );
        assert_eq!(path, PathBuf::from("dist/css/app-rtl.css"));
    }

    #[test]
    fn test_is_flipped_output() {
        assert!(is_flipped_output(Path::new("app.rtl.css"), ".rtl"));
        assert!(!is_flipped_output(Path::new("app.css"), ".rtl"));
        assert!(!is_flipped_output(Path::new("rtl.css"), ".rtl"));
    }

    #[test]
    fn test_flip_all_writes_outputs() {
        let temp = TempDir::new().expect("should create temp dir");
        let nested = temp.path().join("pages");
        fs::create_dir_all(&nested).expect("should create subdirectory");
        fs::write(temp.path().join("app.css"), "a { float: left; }").expect("should write file");
        fs::write(nested.join("home.css"), "b { padding: 1px 2px 3px 4px; }")
            .expect("should write file");
        fs::write(temp.path().join("old.rtl.css"), "c { float: left; }")
            .expect("should write file");

        let mut config = JanusConfig::default();
        config.batch.jobs = 2;
        let inputs = collect_inputs(temp.path(), &config.batch.suffix);
        assert_eq!(inputs.len(), 2);

        let failures = flip_all(&inputs, temp.path(), None, &config).expect("pool should build");
        assert!(failures.is_empty());

        let app = fs::read_to_string(temp.path().join("app.rtl.css")).expect("output should exist");
        assert_eq!(app, "a { float: right; }");
        let home = fs::read_to_string(nested.join("home.rtl.css")).expect("output should exist");
        assert_eq!(home, "b { padding: 1px 4px 3px 2px; }");
        assert!(!temp.path().join("old.rtl.rtl.css").exists());
    }

    #[test]
    fn test_flip_all_mirrors_into_out_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let src = temp.path().join("src");
        let dist = temp.path().join("dist");
        fs::create_dir_all(src.join("nav")).expect("should create subdirectory");
        fs::write(src.join("nav").join("menu.css"), "ul { margin-left: 2em; }")
            .expect("should write file");

        let config = JanusConfig::default();
        let inputs = collect_inputs(&src, &config.batch.suffix);
        let failures = flip_all(&inputs, &src, Some(&dist), &config).expect("pool should build");
        assert!(failures.is_empty());

        let menu = fs::read_to_string(dist.join("nav").join("menu.rtl.css"))
            .expect("mirrored output should exist");
        assert_eq!(menu, "ul { margin-right: 2em; }");
        assert!(!src.join("nav").join("menu.rtl.css").exists());
    }
}
