//! Binary entry point for `z64decompress`.
//!
//! Parses the command line, loads the input, runs the whole-ROM or the
//! individual-file decoder and writes the result. Any failure prints a single
//! diagnostic and exits with status 1 before an output file is created.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use z64dec::cli::args::Cli;
use z64dec::cli::constants::{set_display_level, AUTHOR, PROGRAM_NAME};
use z64dec::io::{load_file, write_file};
use z64dec::{decode_file, decode_rom, display, displaylevel};

fn run(cli: &Cli) -> anyhow::Result<()> {
    cli.validate()?;

    let input = load_file(&cli.input)
        .with_context(|| format!("failed to load '{}'", cli.input.display()))?;

    let decoded = if cli.individual {
        decode_file(&input, cli.codec)?
    } else {
        if cli.dma_ext {
            displaylevel!(3, "dma-ext layout requested; table handling is unchanged\n");
        }
        decode_rom(&input, cli.codec)?
    };

    let output = cli.output_path();
    write_file(&output, &decoded)
        .with_context(|| format!("failed to write '{}'", output.display()))?;

    displaylevel!(2, "decompressed rom '{}' written successfully\n", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_display_level(cli.display_level());

    displaylevel!(2, "welcome to {} <{}>\n", PROGRAM_NAME, AUTHOR);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display!("error: {:#}\n", e);
            ExitCode::FAILURE
        }
    }
}
