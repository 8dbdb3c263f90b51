//! Generates a linker script for a bare-metal RISC-V firmware image
//! from a CSV hardware address map.
//!
//! The configuration lists the devices reachable on the SoC interconnect
//! (names, base addresses, address-range widths). From it this crate
//! derives the memory regions, peripheral address symbols, vector-table
//! and stack symbols, and the fixed `.vector_table`/`.text` sections the
//! firmware link step needs.
//!
//! The whole thing is a one-shot transformation:
//! parse config → validate shape → classify devices → render script.
//!
//! Note: address overlaps between ranges are not sanitized.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod config;
pub mod devices;
pub mod generate;

pub use config::RawConfig;
pub use devices::{Device, DeviceMap, MEMORY_DEVICES};

/// Error union type for the whole pipeline.
///
/// Every variant is fatal: the run aborts and no output file is left
/// behind (the script is written via a temporary file and renamed into
/// place only on full success).
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be opened or read.
    #[error("cannot read configuration {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required configuration key is absent.
    #[error("configuration key {0:?} is missing")]
    MissingKey(&'static str),

    /// A configuration value failed to parse.
    #[error("configuration key {key:?} has unparsable value {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// The four configuration sequences disagree on the device count.
    #[error(
        "mismatch in length of configurations: NUM_MI({count}), RANGE_NAMES({names}), \
         RANGE_BASE_ADDR({base_addrs}), RANGE_ADDR_WIDTH({widths})"
    )]
    LengthMismatch {
        count: usize,
        names: usize,
        base_addrs: usize,
        widths: usize,
    },

    /// No device was classified as a memory block, so there is nothing
    /// to place the vector table and stack into.
    #[error("no memory device in configuration; cannot select a boot memory block")]
    NoBootMemory,

    /// The output script could not be created or written.
    #[error("cannot write linker script: {0}")]
    OutputWrite(#[from] io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
