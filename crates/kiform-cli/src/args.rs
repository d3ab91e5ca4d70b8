//! Command-line argument definitions for the kiform CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects between formatting an existing
//! footprint and creating a new one; the global arguments select the
//! configuration file and logging verbosity.

use clap::{Parser, Subcommand, ValueEnum};

use kiform::footprint::MountType;

/// Command-line arguments for the kiform footprint tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite a footprint file in canonical layout
    Fmt {
        /// Path to the input footprint file
        input: String,

        /// Path to the output file; standard output when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Create a new footprint
    New {
        /// How the footprint is mounted
        #[arg(long, value_enum)]
        mount: Mount,

        /// Library identifier of the footprint
        #[arg(long)]
        name: String,

        /// Value text; defaults to the library identifier
        #[arg(long)]
        value: Option<String>,

        /// Reference text; defaults to `REF**`
        #[arg(long)]
        reference: Option<String>,

        /// Path to the output file; standard output when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    Smd,
    Tht,
    Other,
}

impl From<Mount> for MountType {
    fn from(mount: Mount) -> Self {
        match mount {
            Mount::Smd => MountType::Smd,
            Mount::Tht => MountType::Tht,
            Mount::Other => MountType::Other,
        }
    }
}
