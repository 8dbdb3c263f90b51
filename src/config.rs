//! CSV configuration loader.
//!
//! The address map is a two-column CSV table written by the hardware
//! configuration flow: a header row, then one row per key. Four keys
//! describe the interconnect ranges as parallel lists, indexed by
//! position.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Number of master interface ranges on the interconnect.
const NUM_MI: &str = "NUM_MI";
/// Whitespace-separated device names, one per range.
const RANGE_NAMES: &str = "RANGE_NAMES";
/// Whitespace-separated hexadecimal base addresses, one per range.
const RANGE_BASE_ADDR: &str = "RANGE_BASE_ADDR";
/// Whitespace-separated address-width exponents, one per range.
const RANGE_ADDR_WIDTH: &str = "RANGE_ADDR_WIDTH";

/// The four parallel sequences read from the configuration table,
/// before classification.
///
/// Base addresses stay as strings here; they are parsed as hexadecimal
/// when devices are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    /// Declared device count (`NUM_MI`).
    pub count: usize,
    /// Device names in input order.
    pub names: Vec<String>,
    /// Hexadecimal base address strings in input order.
    pub base_addrs: Vec<String>,
    /// Address-width exponents in input order.
    pub widths: Vec<u32>,
}

impl RawConfig {
    /// Read and parse the configuration table at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse the configuration table from its CSV text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: HashMap<&str, &str> = HashMap::new();
        // The first row is the column header.
        for line in text.lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once(',') {
                let _ = rows.insert(key.trim(), value.trim());
            }
        }

        let count_str = *rows.get(NUM_MI).ok_or(Error::MissingKey(NUM_MI))?;
        let count = count_str.parse().map_err(|_| Error::InvalidValue {
            key: NUM_MI,
            value: count_str.to_string(),
        })?;

        let names = split_list(&rows, RANGE_NAMES)?;
        let base_addrs = split_list(&rows, RANGE_BASE_ADDR)?;
        let widths = split_list(&rows, RANGE_ADDR_WIDTH)?
            .into_iter()
            .map(|w| {
                w.parse().map_err(|_| Error::InvalidValue {
                    key: RANGE_ADDR_WIDTH,
                    value: w,
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        Ok(RawConfig {
            count,
            names,
            base_addrs,
            widths,
        })
    }

    /// Sanity check: the declared count and the three lists must agree.
    pub fn validate(&self) -> Result<()> {
        if self.names.len() == self.count
            && self.base_addrs.len() == self.count
            && self.widths.len() == self.count
        {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                count: self.count,
                names: self.names.len(),
                base_addrs: self.base_addrs.len(),
                widths: self.widths.len(),
            })
        }
    }
}

/// Look up `key` and split its value on whitespace.
fn split_list(rows: &HashMap<&str, &str>, key: &'static str) -> Result<Vec<String>> {
    let value = *rows.get(key).ok_or(Error::MissingKey(key))?;
    Ok(value.split_whitespace().map(String::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = "\
Name,Value
NUM_MI,3
RANGE_NAMES,BRAM UART GPIO
RANGE_BASE_ADDR,00000000 00001000 00002000
RANGE_ADDR_WIDTH,15 3 3
";

    #[test]
    fn parses_all_keys() {
        let config = RawConfig::parse(CONFIG).unwrap();
        assert_eq!(config.count, 3);
        assert_eq!(config.names, vec!["BRAM", "UART", "GPIO"]);
        assert_eq!(config.base_addrs, vec!["00000000", "00001000", "00002000"]);
        assert_eq!(config.widths, vec![15, 3, 3]);
        config.validate().unwrap();
    }

    #[test]
    fn tolerates_blank_lines_and_padding() {
        let text = "Name,Value\n\nNUM_MI, 1\nRANGE_NAMES, BRAM\n\nRANGE_BASE_ADDR, 00000000\nRANGE_ADDR_WIDTH, 15\n";
        let config = RawConfig::parse(text).unwrap();
        assert_eq!(config.count, 1);
        assert_eq!(config.names, vec!["BRAM"]);
    }

    #[test]
    fn rejects_missing_key() {
        let text = "Name,Value\nNUM_MI,1\nRANGE_NAMES,BRAM\nRANGE_ADDR_WIDTH,15\n";
        match RawConfig::parse(text) {
            Err(Error::MissingKey(key)) => assert_eq!(key, "RANGE_BASE_ADDR"),
            result => panic!("expected missing RANGE_BASE_ADDR, got {:?}", result),
        }
    }

    #[test]
    fn rejects_unparsable_count() {
        let text = "Name,Value\nNUM_MI,three\nRANGE_NAMES,BRAM\nRANGE_BASE_ADDR,0\nRANGE_ADDR_WIDTH,15\n";
        match RawConfig::parse(text) {
            Err(Error::InvalidValue { key, value }) => {
                assert_eq!(key, "NUM_MI");
                assert_eq!(value, "three");
            }
            result => panic!("expected invalid NUM_MI, got {:?}", result),
        }
    }

    #[test]
    fn rejects_unparsable_width() {
        let text = "Name,Value\nNUM_MI,1\nRANGE_NAMES,BRAM\nRANGE_BASE_ADDR,0\nRANGE_ADDR_WIDTH,wide\n";
        match RawConfig::parse(text) {
            Err(Error::InvalidValue { key, value }) => {
                assert_eq!(key, "RANGE_ADDR_WIDTH");
                assert_eq!(value, "wide");
            }
            result => panic!("expected invalid RANGE_ADDR_WIDTH, got {:?}", result),
        }
    }

    #[test]
    fn validate_reports_all_four_lengths() {
        let config = RawConfig {
            count: 3,
            names: vec!["BRAM".into(), "UART".into(), "GPIO".into()],
            base_addrs: vec!["00000000".into(), "00001000".into()],
            widths: vec![15, 3, 3],
        };
        match config.validate() {
            Err(Error::LengthMismatch {
                count,
                names,
                base_addrs,
                widths,
            }) => {
                assert_eq!((count, names, base_addrs, widths), (3, 3, 2, 3));
            }
            result => panic!("expected length mismatch, got {:?}", result),
        }
    }
}
