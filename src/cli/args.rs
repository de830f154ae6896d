//! Command-line arguments.
//!
//! ```text
//! z64decompress <INPUT> [OUTPUT] [-c NAME] [-i] [-d] [-v]... [-q]...
//! ```
//!
//! The output path defaults to `<stem>.decompressed.<ext>` beside the input.
//! An unknown codec name is rejected while parsing; combinations clap cannot
//! express are rejected by [`Cli::validate`].

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use crate::cli::constants::display_level_from_flags;
use crate::codec::Codec;
use crate::io::output_filename;

#[derive(Parser, Debug)]
#[command(name = "z64decompress", version, about = "Decompress N64 Zelda ROMs and compressed assets")]
pub struct Cli {
    /// ROM image, or compressed file with --individual
    pub input: PathBuf,

    /// Output path [default: <input-stem>.decompressed.<ext>]
    pub output: Option<PathBuf>,

    /// Decode with this codec instead of sniffing each header
    /// (yaz, lzo, ucl, aplib, lz4hc)
    #[arg(short, long, value_name = "NAME")]
    pub codec: Option<Codec>,

    /// Decompress a single compressed file rather than a whole ROM
    #[arg(short, long)]
    pub individual: bool,

    /// Decompress a ROM that uses the ZZRTL dma-ext layout
    #[arg(short, long = "dma-ext")]
    pub dma_ext: bool,

    /// Increase verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    /// Rejects flag combinations that have no meaning.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.dma_ext && self.individual {
            bail!("dma-ext can not be used with individual files");
        }
        Ok(())
    }

    /// Display level requested by `-v` / `-q`.
    pub fn display_level(&self) -> u32 {
        display_level_from_flags(self.verbose, self.quiet)
    }

    /// Explicit output path, or the one derived from the input.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| output_filename(&self.input))
    }
}
