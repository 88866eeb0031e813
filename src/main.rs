//! CSSJanus - Command-line tool for flipping stylesheets to right-to-left

use std::process::ExitCode;

use cssjanus::cli;

fn main() -> ExitCode {
    cli::run()
}
