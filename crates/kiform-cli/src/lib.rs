//! CLI logic for the kiform footprint tool.
//!
//! This module contains the core CLI logic: formatting existing footprint
//! files and creating new ones.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, Mount};

use std::io::{self, Write};

use log::info;

use kiform::{FootprintCodec, KiformError, factory::FootprintIds, footprint::Footprint};

/// Run the kiform CLI application
///
/// # Errors
///
/// Returns `KiformError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Decoding errors
pub fn run(args: &Args) -> Result<(), KiformError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let codec = FootprintCodec::new(app_config);

    match &args.command {
        Command::Fmt { input, output } => {
            info!(input_path = input; "Formatting footprint");
            let footprint = codec.decode_path(input)?;
            write_output(&codec, &footprint, output.as_deref())
        }
        Command::New {
            mount,
            name,
            value,
            reference,
            output,
        } => {
            info!(mount:? = mount, name; "Creating footprint");
            let mut ids = FootprintIds::new(name.as_str());
            ids.value = value.clone();
            ids.reference = reference.clone();

            let footprint = codec.create_new((*mount).into(), ids);
            write_output(&codec, &footprint, output.as_deref())
        }
    }
}

/// Write `footprint` to `output`, or to standard output when there is none.
fn write_output(
    codec: &FootprintCodec,
    footprint: &Footprint,
    output: Option<&str>,
) -> Result<(), KiformError> {
    match output {
        Some(path) => {
            codec.encode_to_path(footprint, path)?;
            info!(output_file = path; "Footprint written successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(codec.encode(footprint).as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
