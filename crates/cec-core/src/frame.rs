//! CEC frame assembly and the adapter `tx` command encoding.
//!
//! A CEC frame is one addressed, opcoded message: a header byte carrying the
//! source and destination nibbles, an opcode byte, and zero or more parameter
//! bytes.  The adapter accepts frames as colon-separated hex on its `tx`
//! command line:
//!
//! ```text
//! tx 40:36            # source 4 -> dest 0, Standby, no params
//! tx 4F:82:10:00      # source 4 -> broadcast, ActiveSource, phys addr 1000
//! ```
//!
//! Encoding is pure and deterministic; every byte renders as exactly two
//! uppercase hex digits.  Nothing here touches a process or the bus.

use crate::address::{byte_to_hex, LogicalAddress};

/// CEC message opcodes used by this controller.
///
/// The numeric value of each variant is its opcode byte on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Also the FeatureAbort opcode; context disambiguates on the bus.
    FeatureAbort = 0x00,
    ImageViewOn = 0x04,
    TextViewOn = 0x0D,
    Standby = 0x36,
    UserControlPressed = 0x44,
    UserControlReleased = 0x45,
    GiveOsdName = 0x46,
    SetOsdName = 0x47,
    SetOsdString = 0x64,
    SystemAudioModeRequest = 0x70,
    GiveAudioStatus = 0x71,
    SetSystemAudioMode = 0x72,
    GiveSystemAudioModeStatus = 0x7D,
    RoutingChange = 0x80,
    ActiveSource = 0x82,
    GivePhysicalAddress = 0x83,
    ReportPhysicalAddress = 0x84,
    RequestActiveSource = 0x85,
    SetStreamPath = 0x86,
    DeviceVendorId = 0x87,
    VendorCommand = 0x89,
    GiveDeviceVendorId = 0x8C,
    MenuRequest = 0x8D,
    MenuStatus = 0x8E,
    GiveDevicePowerStatus = 0x8F,
    ReportPowerStatus = 0x90,
    GetMenuLanguage = 0x91,
    CecVersion = 0x9E,
    GetCecVersion = 0x9F,
    VendorCommandWithId = 0xA0,
    Abort = 0xFF,
}

impl Opcode {
    /// Returns the opcode byte.
    pub fn byte(self) -> u8 {
        self as u8
    }
}

/// One CEC message, constructed and consumed within a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub source: LogicalAddress,
    pub destination: LogicalAddress,
    pub opcode: Opcode,
    pub params: Vec<u8>,
}

impl Frame {
    /// Builds a frame with an empty parameter list.
    pub fn new(opcode: Opcode, destination: LogicalAddress, source: LogicalAddress) -> Frame {
        Frame::with_params(opcode, Vec::new(), destination, source)
    }

    /// Builds a frame carrying `params` after the opcode byte.
    pub fn with_params(
        opcode: Opcode,
        params: Vec<u8>,
        destination: LogicalAddress,
        source: LogicalAddress,
    ) -> Frame {
        Frame {
            source,
            destination,
            opcode,
            params,
        }
    }

    /// Encodes the frame as an adapter `tx` command line.
    ///
    /// The header is the source nibble followed by the destination nibble as
    /// two hex digits; the opcode and each parameter follow, colon-separated,
    /// each as exactly two uppercase hex digits.
    pub fn encode(&self) -> String {
        let header = (self.source.value() << 4) | self.destination.value();
        let mut line = format!("tx {}:{}", byte_to_hex(header), byte_to_hex(self.opcode.byte()));
        for param in &self.params {
            line.push(':');
            line.push_str(&byte_to_hex(*param));
        }
        line
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
