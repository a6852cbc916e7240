//! Parser for the adapter's free-text device-scan output.
//!
//! A scan transcript is a sequence of device blocks:
//!
//! ```text
//! device #0: TV
//! address:       0.0.0.0
//! vendor:        Samsung (0000F0)
//! osd string:    TV
//! CEC version:   1.4
//! power status:  on
//! language:      eng
//! device #4: Playback 1
//! ...
//! ```
//!
//! A `device #<N>: <name>` line starts a new record (flushing the one in
//! progress); the indented `key: value` lines that follow are matched
//! case-insensitively against a fixed set of recognized keys and merged into
//! the current record.  Everything else is ignored, which keeps the parser
//! tolerant of banner lines and output drift between adapter versions.

use serde::Serialize;
use tracing::debug;

/// One discovered bus device, populated from whichever lines the adapter
/// happened to print.  Records live only for the duration of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DeviceRecord {
    pub logical_address: u8,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osd_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osd_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cec_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Parses a full scan transcript into device records, in scan order.
pub fn parse_scan_output(text: &str) -> Vec<DeviceRecord> {
    let mut devices = Vec::new();
    let mut current: Option<DeviceRecord> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(record) = parse_device_marker(trimmed) {
            if let Some(done) = current.take() {
                devices.push(done);
            }
            current = Some(record);
            continue;
        }

        match current.as_mut() {
            Some(record) => {
                if !merge_field(record, trimmed) {
                    debug!("ignoring unrecognized scan line: {trimmed:?}");
                }
            }
            // Banner text before the first device marker.
            None => debug!("ignoring scan preamble line: {trimmed:?}"),
        }
    }

    if let Some(done) = current.take() {
        devices.push(done);
    }
    devices
}

/// Matches the `device #<N>: <name>` block-start marker.
fn parse_device_marker(line: &str) -> Option<DeviceRecord> {
    let rest = strip_prefix_ci(line, "device #")?;
    let (number, name) = rest.split_once(':')?;
    let logical_address = number.trim().parse::<u8>().ok().filter(|n| *n <= 15)?;
    Some(DeviceRecord {
        logical_address,
        name: name.trim().to_string(),
        ..DeviceRecord::default()
    })
}

/// Merges one recognized `key: value` line into `record`.
///
/// Returns `false` when the key is not recognized.
fn merge_field(record: &mut DeviceRecord, line: &str) -> bool {
    let Some((key, value)) = line.split_once(':') else {
        return false;
    };
    let key = key.trim().to_ascii_lowercase();
    let value = value.trim().to_string();
    if value.is_empty() {
        return false;
    }

    match key.as_str() {
        "address" => record.physical_address = Some(value),
        "vendor" => {
            let (name, id) = split_parenthesized_id(&value);
            record.vendor_name = Some(name);
            if id.is_some() {
                record.vendor_id = id;
            }
        }
        "vendor id" => record.vendor_id = Some(value),
        "osd name" => record.osd_name = Some(value),
        "osd string" => record.osd_string = Some(value),
        "device type" | "type" => record.device_type = Some(value),
        "cec version" => record.cec_version = Some(value),
        "power status" => record.power_status = Some(value),
        "language" => record.language = Some(value),
        _ => return false,
    }
    true
}

/// Splits `"Samsung (0000F0)"` into the vendor name and the optional id.
fn split_parenthesized_id(value: &str) -> (String, Option<String>) {
    if let Some(open) = value.rfind('(') {
        if let Some(close) = value[open..].find(')') {
            let id = value[open + 1..open + close].trim().to_string();
            let name = value[..open].trim().to_string();
            if !id.is_empty() && !name.is_empty() {
                return (name, Some(id));
            }
        }
    }
    (value.trim().to_string(), None)
}

/// Case-insensitive `strip_prefix`.
fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    if line.len() >= prefix.len() && line[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
