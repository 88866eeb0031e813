//! Flip command implementation

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::JanusConfig;
use crate::transform::transform;

/// Flip one stylesheet from a file or stdin to a file or stdout.
pub fn run_flip(input: Option<&Path>, output: Option<&Path>, config: &JanusConfig) -> ExitCode {
    let css = match read_input(input) {
        Ok(css) => css,
        Err(e) => {
            let source = input.map_or("<stdin>".into(), |p| p.display().to_string());
            eprintln!("Error: Cannot read {}: {}", source, e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let flipped = match transform(&css, &config.transform) {
        Ok(flipped) => flipped,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let written = match output {
        Some(path) => fs::write(path, flipped.as_bytes()),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(flipped.as_bytes()).and_then(|()| stdout.flush())
        }
    };

    match written {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            let target = output.map_or("<stdout>".into(), |p| p.display().to_string());
            eprintln!("Error: Cannot write {}: {}", target, e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut css = String::new();
            io::stdin().read_to_string(&mut css)?;
            Ok(css)
        }
    }
}
