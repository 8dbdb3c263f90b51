//! Device classification.
//!
//! Each configured range becomes a [`Device`], routed into one of two
//! partitions: memory blocks (recognized memory technologies) become
//! linker `MEMORY` regions, everything else becomes a pair of
//! peripheral address symbols.

use crate::{Error, RawConfig, Result};

/// Device names treated as memory blocks; all other names are
/// peripherals. Currently only one copy of each is supported.
pub const MEMORY_DEVICES: [&str; 3] = ["BRAM", "DDR", "HBM"];

/// One addressable range on the interconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Device name from the configuration.
    pub name: String,
    /// Base address.
    pub base: u64,
    /// Range size in bytes, `2 << width` for an address width exponent.
    pub range: u64,
}

impl Device {
    /// First address past the end of the range.
    pub fn end(&self) -> u64 {
        self.base + self.range
    }
}

/// The classified device table: memory blocks and peripherals, each in
/// input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceMap {
    /// Recognized memory-technology devices.
    pub memory: Vec<Device>,
    /// Everything else.
    pub peripheral: Vec<Device>,
}

impl DeviceMap {
    /// Validate `config` and partition its ranges into memory blocks
    /// and peripherals.
    ///
    /// Address overlaps between ranges are not sanitized.
    pub fn classify(config: &RawConfig) -> Result<Self> {
        config.validate()?;

        let mut map = DeviceMap::default();
        for i in 0..config.count {
            let device = Device {
                name: config.names[i].clone(),
                base: parse_base_addr(&config.base_addrs[i])?,
                range: 2u64 << config.widths[i],
            };
            if MEMORY_DEVICES.contains(&device.name.as_str()) {
                map.memory.push(device);
            } else {
                map.peripheral.push(device);
            }
        }
        Ok(map)
    }

    /// The memory block hosting the vector table and stack.
    ///
    /// The first memory device in input order is selected; no other
    /// prioritization exists.
    pub fn boot_memory(&self) -> Result<&Device> {
        self.memory.first().ok_or(Error::NoBootMemory)
    }
}

/// Parse a base address as hexadecimal, with or without a `0x` prefix.
fn parse_base_addr(addr: &str) -> Result<u64> {
    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    u64::from_str_radix(digits, 16).map_err(|_| Error::InvalidValue {
        key: "RANGE_BASE_ADDR",
        value: addr.to_string(),
    })
}
