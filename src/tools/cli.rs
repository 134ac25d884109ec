use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn};

use crate::compression::decompress::SingleSymbol;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

/// Zip, Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Vec of names of files to process
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Location where decompressed output is sent
    pub output: Output,
    /// What decompression produces for a single symbol input
    pub single_symbol: SingleSymbol,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            op_mode: Mode::Zip,
            output: Output::File,
            single_symbol: SingleSymbol::Expand,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static Huffman compressor for 7 bit text",
    long_about = "
    Compressing FILE writes FILE.freq (the symbol frequencies) and FILE.huff (the
    packed bits). Both are needed to decompress: `huffify -d FILE` reads them
    and writes FILE.dec.

    Lines may end in \\n, \\r\\n or \\r. Each line end is stored as a single \\n."
)]
pub struct Args {
    /// Files to process
    #[clap(required = true)]
    files: Vec<String>,

    /// Decompress FILE.freq and FILE.huff instead of compressing FILE
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send decompressed output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Decompress a single symbol input to nothing instead of repeating the symbol
    #[clap(long = "empty-single-symbol")]
    empty_single_symbol: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 1)]
    v: u8,
}

impl From<Args> for HuffOpts {
    fn from(args: Args) -> Self {
        Self {
            files: args.files,
            force_overwrite: args.force,
            op_mode: if args.decompress { Mode::Unzip } else { Mode::Zip },
            output: if args.stdout { Output::Stdout } else { Output::File },
            single_symbol: if args.empty_single_symbol {
                SingleSymbol::Empty
            } else {
                SingleSymbol::Expand
            },
            verbose: Verbosity::from(args.v),
        }
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Args::parse());

    log::set_max_level(opts.verbose.level_filter());

    info!("---- Huffify Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Processing {} file(s)", opts.files.len());
    if opts.output == Output::Stdout {
        warn!("Sending output to stdout");
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- Huffify Initialization End ----");
    opts
}
