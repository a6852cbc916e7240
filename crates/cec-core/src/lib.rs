//! # cec-core
//!
//! Pure library for HDMI-CEC control: everything needed to turn a high-level
//! TV intent into an adapter command line, and to turn adapter text back into
//! structured data.  No I/O happens here; the companion `cec-control` crate
//! owns the adapter process.
//!
//! Modules:
//!
//! - **`address`** – logical/physical address and byte normalization.  All
//!   range checking happens at this boundary, before anything is encoded.
//! - **`keymap`** – the canonical User Control Code table plus an alias layer
//!   and caller overrides, resolved in fixed priority order.
//! - **`frame`** – opcode constants and deterministic `tx` command encoding.
//! - **`scan`** – parser for the adapter's free-text device-scan blocks.

pub mod address;
pub mod frame;
pub mod keymap;
pub mod scan;

pub use address::{
    ascii_bytes, byte_from_i64, byte_from_str, byte_to_hex, AddressError, LogicalAddress,
    PhysicalAddress,
};
pub use frame::{Frame, Opcode};
pub use keymap::{KeyError, KeyInput, KeyTable, UserControlCode};
pub use scan::{parse_scan_output, DeviceRecord};
