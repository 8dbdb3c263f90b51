//! Renders the linker script text.
//!
//! Output layout, in order: header comment, `MEMORY` block, peripheral
//! symbol pairs, global symbols, and a `SECTIONS` block holding the
//! vector table and text sections anchored to the boot memory block.
//! Region origins and symbol addresses are 16-digit zero-padded hex;
//! lengths are unpadded hex.

use std::io::{Error, Write};

use crate::{Device, DeviceMap};

/// Vector table footprint: 32 words of 4 bytes, as described in the
/// RISC-V spec.
const VECTOR_TABLE_BYTES: u64 = 32 * 4;

/// Alignment of the text section entry and exit, in bytes.
const TEXT_ALIGN: u32 = 32;

/// render the MEMORY block, one region per memory device
fn render_memory_blocks<Wr: Write>(out: &mut Wr, memory: &[Device]) -> Result<(), Error> {
    writeln!(out, "/* Memory blocks */")?;
    writeln!(out, "MEMORY")?;
    writeln!(out, "{{")?;
    for block in memory {
        writeln!(
            out,
            "\t{} (xrw) : ORIGIN = 0x{:016x},  LENGTH = {:#x}",
            block.name, block.base, block.range
        )?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// render a start/end symbol pair per peripheral device
fn render_peripheral_symbols<Wr: Write>(out: &mut Wr, peripheral: &[Device]) -> Result<(), Error> {
    writeln!(out, "/* Peripherals symbols */")?;
    for device in peripheral {
        writeln!(out, "_peripheral_{}_start = 0x{:016x};", device.name, device.base)?;
        writeln!(out, "_peripheral_{}_end = 0x{:016x};", device.name, device.end())?;
    }
    Ok(())
}

/// render the vector table and stack symbols
fn render_global_symbols<Wr: Write>(out: &mut Wr, boot: &Device) -> Result<(), Error> {
    writeln!(out, "/* Global symbols */")?;
    // The vector table sits at the beginning of the boot memory block.
    writeln!(out, "_vector_table_start = 0x{:016x};", boot.base)?;
    writeln!(
        out,
        "_vector_table_end = 0x{:016x};",
        boot.base + VECTOR_TABLE_BYTES
    )?;
    // The stack grows down from the end of the boot memory block.
    // _stack_end, bss and rodata are left to the application.
    writeln!(out, "_stack_start = 0x{:016x};", boot.end())?;
    Ok(())
}

/// render the SECTIONS block with the vector table and text sections
fn render_sections<Wr: Write>(out: &mut Wr, boot: &Device) -> Result<(), Error> {
    writeln!(out, "/* Sections */")?;
    writeln!(out, "SECTIONS")?;
    writeln!(out, "{{")?;

    writeln!(out, "\t.vector_table _vector_table_start :")?;
    writeln!(out, "\t{{")?;
    writeln!(out, "\t\tKEEP(*(.vector_table))")?;
    writeln!(out, "\t}}> {}", boot.name)?;

    writeln!(out)?;
    writeln!(out, "\t.text :")?;
    writeln!(out, "\t{{")?;
    writeln!(out, "\t\t. = ALIGN({});", TEXT_ALIGN)?;
    writeln!(out, "\t\t_text_start = .;")?;
    writeln!(out, "\t\t*(.text.handlers)")?;
    writeln!(out, "\t\t*(.text.start)")?;
    writeln!(out, "\t\t*(.text)")?;
    writeln!(out, "\t\t*(.text*)")?;
    writeln!(out, "\t\t. = ALIGN({});", TEXT_ALIGN)?;
    writeln!(out, "\t\t_text_end = .;")?;
    writeln!(out, "\t}}> {}", boot.name)?;

    writeln!(out, "}}")?;
    Ok(())
}

/// Generate the linker script for a classified [`DeviceMap`].
///
/// Fails with [`crate::Error::NoBootMemory`] when the map holds no
/// memory device to anchor the vector table and stack.
pub fn render<Wr: Write>(devices: &DeviceMap, out: &mut Wr) -> crate::Result<()> {
    let boot = devices.boot_memory()?;

    writeln!(
        out,
        "/* This file is auto-generated with {} */",
        env!("CARGO_PKG_NAME")
    )?;

    writeln!(out)?;
    render_memory_blocks(out, &devices.memory)?;

    writeln!(out)?;
    render_peripheral_symbols(out, &devices.peripheral)?;

    writeln!(out)?;
    render_global_symbols(out, boot)?;

    writeln!(out)?;
    render_sections(out, boot)?;

    writeln!(out)?;
    Ok(())
}
