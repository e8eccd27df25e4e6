//!
//! Command-line entry point: argument handling, default output-path
//! derivation, and diagnostic rendering around the conversion pipeline.

use std::{
    path::{Path, PathBuf},
    process,
};

use clap::Parser;

use crate::{engine::ConvertPipeline, errors::print_error};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "xcm2sl",
    version,
    about = "Convert XSPEC mdefine model definitions into ISIS/S-Lang fit functions."
)]
pub struct XcmArgs {
    /// The XSPEC command (.xcm) file to convert.
    #[arg(required = true)]
    pub input: PathBuf,

    /// Where to write the S-Lang output. Defaults to the input path with
    /// its extension replaced by `.sl`.
    pub output: Option<PathBuf>,
}

/// Default output path: the input path with an `.sl` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("sl")
}

/// The main entry point for the CLI.
///
/// Recoverable diagnostics (skipped lines, duplicate registrations) are
/// rendered to stderr and do not fail the run; only fatal I/O errors exit
/// nonzero.
pub fn run() {
    let args = XcmArgs::parse();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let mut pipeline = ConvertPipeline::new();
    match pipeline.convert_file(&args.input, &output) {
        Ok(diagnostics) => {
            for diagnostic in diagnostics {
                print_error(diagnostic);
            }
        }
        Err(fatal) => {
            print_error(fatal);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_swaps_the_extension() {
        assert_eq!(
            default_output_path(Path::new("models/source.xcm")),
            PathBuf::from("models/source.sl")
        );
    }

    #[test]
    fn default_output_handles_missing_extension() {
        assert_eq!(
            default_output_path(Path::new("source")),
            PathBuf::from("source.sl")
        );
    }
}
