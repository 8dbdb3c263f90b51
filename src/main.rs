//! Linker script generator CLI.
//!
//! Reads the CSV memory-map configuration, classifies its devices, and
//! writes the linker script. Both paths are positional and optional:
//!
//! ```text
//! axi-ld-gen [config] [output]
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;

use axi_ld_gen::{generate, DeviceMap, RawConfig, Result};

#[derive(Parser, Debug)]
#[command(
    name = "axi-ld-gen",
    version,
    about = "Generate a bare-metal RISC-V linker script from a memory-map configuration"
)]
struct Cli {
    /// Input configuration file (CSV memory map).
    #[arg(default_value = "config.csv")]
    config: PathBuf,

    /// Output linker script.
    #[arg(default_value = "link.ld")]
    output: PathBuf,
}

fn run(cli: &Cli) -> Result<()> {
    let config = RawConfig::load(&cli.config)?;
    let devices = DeviceMap::classify(&config)?;
    generate::write_script(&devices, &cli.output)
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
