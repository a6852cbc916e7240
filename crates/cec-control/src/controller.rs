//! The intent-level controller facade.
//!
//! Composes the address codec, key table, frame builder, channel, and scan
//! parser into the published operations: power control, remote-key presses,
//! vendor commands, active-source negotiation, and discovery.  Data flows one
//! way per call: resolve inputs → encode a frame or shorthand line → transmit
//! through the channel → parse text → structured result.
//!
//! Every operation propagates its error to the caller except
//! [`CecController::power_status`], which converts any failure into an
//! `available: false` result so dashboards can poll it unconditionally.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use cec_core::{
    address::{ascii_bytes, byte_from_i64, AddressError},
    frame::{Frame, Opcode},
    keymap::{KeyError, KeyInput, KeyTable},
    scan::{parse_scan_output, DeviceRecord},
    LogicalAddress, PhysicalAddress,
};

use crate::channel::{CecChannel, ChannelError, CommandTransport};
use crate::config::ControllerConfig;

/// Hold time applied between press and release when the caller gives none.
const DEFAULT_HOLD_MS: u64 = 100;
/// CEC OSD names are limited to 14 bytes.
const OSD_NAME_MAX_LEN: usize = 14;
/// Device-type byte reported in `ReportPhysicalAddress` (4 = playback device).
const DEVICE_TYPE_PLAYBACK: u8 = 4;

/// Error type for facade operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Malformed byte/address/payload input, raised before any spawn.
    #[error("invalid input: {0}")]
    Validation(#[from] AddressError),

    /// The key resolved through none of the tables or the literal form.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The vendor payload normalized to zero bytes.
    #[error("empty vendor payload")]
    EmptyPayload,

    /// The channel failed (availability, adapter exit, or timeout).
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

// ── Operation results ─────────────────────────────────────────────────────────

/// Result of a power-status poll.  Never an error: channel failures become
/// `available: false` (the only operation with this contract).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerStatus {
    pub available: bool,
    /// Parsed status (`"on"`, `"standby"`, ...), `"unknown"` when the
    /// adapter replied without a recognizable status line, or
    /// `"unavailable"` on failure.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one key press (press + hold + release).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPressOutcome {
    /// The resolved control code.
    pub code: u8,
    /// Output of the release invocation.
    pub output: String,
}

/// Result of a device scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub devices: Vec<DeviceRecord>,
    /// The full transcript, for callers that want to re-parse or log it.
    pub raw: String,
}

// ── Operation options ─────────────────────────────────────────────────────────

/// Options for [`CecController::send_key`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPressOptions {
    /// Destination override; defaults to the configured target.
    pub target: Option<LogicalAddress>,
    /// Press-to-release hold time; defaults to 100 ms.
    pub hold_ms: Option<u64>,
}

/// Options for [`CecController::send_key_sequence`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeySequenceOptions {
    pub target: Option<LogicalAddress>,
    pub hold_ms: Option<u64>,
    /// Pause between keys (not after the last); 0 disables.
    pub delay_ms: u64,
}

/// Options for the vendor-command operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct VendorCommandOptions {
    pub target: Option<LogicalAddress>,
    /// Vendor id override for the with-id variant; defaults to the
    /// configured id.
    pub vendor_id: Option<[u8; 3]>,
}

/// A vendor payload: raw bytes, or text split on runs of non-hex characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorPayload {
    Bytes(Vec<u8>),
    Text(String),
}

impl From<Vec<u8>> for VendorPayload {
    fn from(bytes: Vec<u8>) -> Self {
        VendorPayload::Bytes(bytes)
    }
}

impl From<&str> for VendorPayload {
    fn from(s: &str) -> Self {
        VendorPayload::Text(s.to_string())
    }
}

impl From<String> for VendorPayload {
    fn from(s: String) -> Self {
        VendorPayload::Text(s)
    }
}

// ── The facade ────────────────────────────────────────────────────────────────

/// The published TV-control surface.
///
/// Generic over the transport so tests drive it without spawning adapter
/// processes; production code uses [`CecController::from_config`] which wires
/// in the real [`CecChannel`].
pub struct CecController<T: CommandTransport> {
    transport: T,
    key_table: KeyTable,
    target: LogicalAddress,
    source: LogicalAddress,
    physical_address: PhysicalAddress,
    osd_name: String,
    vendor_id: [u8; 3],
    timeout: Duration,
}

impl CecController<CecChannel> {
    /// Builds the production controller: real channel, fresh locator.
    pub fn from_config(config: &ControllerConfig) -> CecController<CecChannel> {
        let transport = CecChannel::from_config(config);
        CecController::with_transport(config, transport)
    }
}

impl<T: CommandTransport> CecController<T> {
    /// Builds a controller over an explicit transport.
    ///
    /// Address fields go through the lenient cec-core constructors; key-map
    /// overrides are merged into the canonical table here, once.
    pub fn with_transport(config: &ControllerConfig, transport: T) -> CecController<T> {
        CecController {
            transport,
            key_table: KeyTable::with_overrides(&config.key_overrides),
            target: LogicalAddress::clamp(config.target_address),
            source: LogicalAddress::clamp(config.source_address),
            physical_address: PhysicalAddress::parse(&config.physical_address),
            osd_name: config.osd_name.clone(),
            vendor_id: config.vendor_id,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    fn target_or(&self, target: Option<LogicalAddress>) -> LogicalAddress {
        target.unwrap_or(self.target)
    }

    /// Sends one raw command line through the channel.
    async fn send_line(&self, line: String) -> Result<String, ChannelError> {
        debug!("sending adapter command {line:?}");
        self.transport.send_commands(&[line], self.timeout).await
    }

    /// Encodes and transmits one frame.
    async fn transmit(&self, frame: Frame) -> Result<String, ChannelError> {
        self.send_line(frame.encode()).await
    }

    // ── Power control ─────────────────────────────────────────────────────────

    /// Powers the target on via the adapter's `on` shorthand.
    pub async fn turn_on(&self, target: Option<LogicalAddress>) -> Result<String, ControllerError> {
        Ok(self.send_line(format!("on {}", self.target_or(target))).await?)
    }

    /// Puts the target into standby via the adapter's `standby` shorthand.
    pub async fn standby(&self, target: Option<LogicalAddress>) -> Result<String, ControllerError> {
        Ok(self
            .send_line(format!("standby {}", self.target_or(target)))
            .await?)
    }

    /// Frame-based power-on variant (wakes most TVs).
    pub async fn image_view_on(
        &self,
        target: Option<LogicalAddress>,
    ) -> Result<String, ControllerError> {
        Ok(self
            .transmit(Frame::new(Opcode::ImageViewOn, self.target_or(target), self.source))
            .await?)
    }

    /// Frame-based power-on variant that also opens the text display.
    pub async fn text_view_on(
        &self,
        target: Option<LogicalAddress>,
    ) -> Result<String, ControllerError> {
        Ok(self
            .transmit(Frame::new(Opcode::TextViewOn, self.target_or(target), self.source))
            .await?)
    }

    /// Polls the target's power status via the `pow` shorthand.
    ///
    /// Never fails: any channel error is folded into an
    /// `available: false, status: "unavailable"` result.
    pub async fn power_status(&self, target: Option<LogicalAddress>) -> PowerStatus {
        let line = format!("pow {}", self.target_or(target));
        match self.send_line(line).await {
            Ok(output) => {
                let status =
                    extract_power_status(&output).unwrap_or_else(|| "unknown".to_string());
                PowerStatus {
                    available: true,
                    status,
                    raw: Some(output),
                    error: None,
                }
            }
            Err(e) => PowerStatus {
                available: false,
                status: "unavailable".to_string(),
                raw: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Requests a `ReportPowerStatus` reply via a frame (for devices that
    /// ignore the shorthand).
    pub async fn request_power_status(
        &self,
        target: Option<LogicalAddress>,
    ) -> Result<String, ControllerError> {
        Ok(self
            .transmit(Frame::new(
                Opcode::GiveDevicePowerStatus,
                self.target_or(target),
                self.source,
            ))
            .await?)
    }

    // ── Identity and topology ─────────────────────────────────────────────────

    /// Asks the target to report its OSD name.
    pub async fn give_osd_name(
        &self,
        target: Option<LogicalAddress>,
    ) -> Result<String, ControllerError> {
        Ok(self
            .transmit(Frame::new(Opcode::GiveOsdName, self.target_or(target), self.source))
            .await?)
    }

    /// Asks the target to report its physical address.
    pub async fn request_physical_address(
        &self,
        target: Option<LogicalAddress>,
    ) -> Result<String, ControllerError> {
        Ok(self
            .transmit(Frame::new(
                Opcode::GivePhysicalAddress,
                self.target_or(target),
                self.source,
            ))
            .await?)
    }

    /// Broadcasts a request for the current active source to identify itself.
    pub async fn request_active_source(&self) -> Result<String, ControllerError> {
        Ok(self
            .transmit(Frame::new(
                Opcode::RequestActiveSource,
                LogicalAddress::BROADCAST,
                self.source,
            ))
            .await?)
    }

    /// Broadcasts `SetStreamPath` for `addr` (own address when `None`),
    /// steering the TV's input to that HDMI path.
    pub async fn set_stream_path(
        &self,
        addr: Option<PhysicalAddress>,
    ) -> Result<String, ControllerError> {
        let addr = addr.unwrap_or(self.physical_address);
        Ok(self
            .transmit(Frame::with_params(
                Opcode::SetStreamPath,
                addr.to_bytes().to_vec(),
                LogicalAddress::BROADCAST,
                self.source,
            ))
            .await?)
    }

    /// Broadcasts `ActiveSource`, claiming the stream for `addr` (own address
    /// when `None`).
    pub async fn set_active_source(
        &self,
        addr: Option<PhysicalAddress>,
    ) -> Result<String, ControllerError> {
        let addr = addr.unwrap_or(self.physical_address);
        Ok(self
            .transmit(Frame::with_params(
                Opcode::ActiveSource,
                addr.to_bytes().to_vec(),
                LogicalAddress::BROADCAST,
                self.source,
            ))
            .await?)
    }

    /// Broadcasts this controller's physical address and device type.
    pub async fn report_physical_address(&self) -> Result<String, ControllerError> {
        let mut params = self.physical_address.to_bytes().to_vec();
        params.push(DEVICE_TYPE_PLAYBACK);
        Ok(self
            .transmit(Frame::with_params(
                Opcode::ReportPhysicalAddress,
                params,
                LogicalAddress::BROADCAST,
                self.source,
            ))
            .await?)
    }

    /// Sends this controller's OSD name (or `name`) to the target.
    pub async fn set_osd_name(&self, name: Option<&str>) -> Result<String, ControllerError> {
        let name = name.unwrap_or(&self.osd_name);
        Ok(self
            .transmit(Frame::with_params(
                Opcode::SetOsdName,
                ascii_bytes(name, OSD_NAME_MAX_LEN),
                self.target,
                self.source,
            ))
            .await?)
    }

    // ── Remote keys ───────────────────────────────────────────────────────────

    /// Presses and releases one remote key.
    ///
    /// The press and release frames go through two independent channel
    /// invocations with the hold time slept in between; the returned output
    /// is the release call's.
    pub async fn send_key(
        &self,
        key: impl Into<KeyInput>,
        opts: KeyPressOptions,
    ) -> Result<KeyPressOutcome, ControllerError> {
        let code = self.key_table.resolve(key)?;
        let target = self.target_or(opts.target);
        let hold = Duration::from_millis(opts.hold_ms.unwrap_or(DEFAULT_HOLD_MS));

        self.transmit(Frame::with_params(
            Opcode::UserControlPressed,
            vec![code],
            target,
            self.source,
        ))
        .await?;

        tokio::time::sleep(hold).await;

        let output = self
            .transmit(Frame::new(Opcode::UserControlReleased, target, self.source))
            .await?;

        Ok(KeyPressOutcome { code, output })
    }

    /// Sends `keys` in order, waiting for each press/hold/release to finish
    /// before the next, with `delay_ms` inserted between keys (not after the
    /// last).  The first unresolvable key or channel failure aborts the
    /// remaining keys.
    pub async fn send_key_sequence(
        &self,
        keys: Vec<KeyInput>,
        opts: KeySequenceOptions,
    ) -> Result<Vec<KeyPressOutcome>, ControllerError> {
        let count = keys.len();
        let mut outcomes = Vec::with_capacity(count);

        for (index, key) in keys.into_iter().enumerate() {
            let outcome = self
                .send_key(
                    key,
                    KeyPressOptions {
                        target: opts.target,
                        hold_ms: opts.hold_ms,
                    },
                )
                .await?;
            outcomes.push(outcome);

            if opts.delay_ms > 0 && index + 1 < count {
                tokio::time::sleep(Duration::from_millis(opts.delay_ms)).await;
            }
        }

        Ok(outcomes)
    }

    // ── Vendor commands ───────────────────────────────────────────────────────

    /// Sends a `VendorCommand` frame with the normalized payload.
    pub async fn send_vendor_command(
        &self,
        payload: impl Into<VendorPayload>,
        opts: VendorCommandOptions,
    ) -> Result<String, ControllerError> {
        let bytes = normalize_vendor_payload(payload.into())?;
        Ok(self
            .transmit(Frame::with_params(
                Opcode::VendorCommand,
                bytes,
                self.target_or(opts.target),
                self.source,
            ))
            .await?)
    }

    /// Sends a `VendorCommandWithId` frame: the 3-byte vendor id (configured
    /// default unless overridden) followed by the normalized payload.
    pub async fn send_vendor_command_with_id(
        &self,
        payload: impl Into<VendorPayload>,
        opts: VendorCommandOptions,
    ) -> Result<String, ControllerError> {
        let bytes = normalize_vendor_payload(payload.into())?;
        let vendor_id = opts.vendor_id.unwrap_or(self.vendor_id);

        let mut params = vendor_id.to_vec();
        params.extend_from_slice(&bytes);
        Ok(self
            .transmit(Frame::with_params(
                Opcode::VendorCommandWithId,
                params,
                self.target_or(opts.target),
                self.source,
            ))
            .await?)
    }

    // ── Discovery ─────────────────────────────────────────────────────────────

    /// Scans the bus and returns the parsed device records plus the raw
    /// transcript.
    pub async fn scan_devices(&self) -> Result<ScanOutcome, ControllerError> {
        let raw = self.send_line("scan".to_string()).await?;
        let devices = parse_scan_output(&raw);
        debug!("scan found {} device(s)", devices.len());
        Ok(ScanOutcome { devices, raw })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Extracts the value following `power status:` (case-insensitive) from
/// adapter output, lowercased.
fn extract_power_status(output: &str) -> Option<String> {
    const MARKER: &str = "power status:";
    let lower = output.to_ascii_lowercase();
    let idx = lower.find(MARKER)?;
    let value = output[idx + MARKER.len()..]
        .lines()
        .next()
        .unwrap_or("")
        .trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_ascii_lowercase())
    }
}

/// Normalizes a vendor payload into a byte sequence.
///
/// Text payloads are split on runs of non-hex characters; each token must
/// parse as one hex byte.  An empty result is a validation error, raised
/// before any process is spawned.
fn normalize_vendor_payload(payload: VendorPayload) -> Result<Vec<u8>, ControllerError> {
    let bytes = match payload {
        VendorPayload::Bytes(bytes) => bytes,
        VendorPayload::Text(text) => {
            let mut out = Vec::new();
            for token in text
                .split(|c: char| !c.is_ascii_hexdigit())
                .filter(|t| !t.is_empty())
            {
                let value = i64::from_str_radix(token, 16)
                    .map_err(|_| AddressError::ByteUnparsable(token.to_string()))?;
                out.push(byte_from_i64(value)?);
            }
            out
        }
    };

    if bytes.is_empty() {
        return Err(ControllerError::EmptyPayload);
    }
    Ok(bytes)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
