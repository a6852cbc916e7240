//! # cec-control
//!
//! Adapter-process orchestration and the published TV-control surface.
//!
//! Where `cec-core` is pure encoding and parsing, this crate owns everything
//! with a side effect:
//!
//! - **`locator`** – resolves the adapter binary on the search path, once,
//!   with the result memoized for the locator's lifetime.
//! - **`channel`** – spawns one adapter process per call, streams command
//!   lines to it, and collects output under a timeout.
//! - **`controller`** – the intent-level facade composing key resolution,
//!   frame encoding, the channel, and scan parsing.
//! - **`config`** – TOML configuration with per-field defaults.
//!
//! The `cecctl` binary in this crate is a thin debug CLI over the facade.

pub mod channel;
pub mod config;
pub mod controller;
pub mod locator;

pub use channel::{CecChannel, ChannelError, CommandTransport};
pub use config::{load_from_path, ConfigError, ControllerConfig};
pub use controller::{
    CecController, ControllerError, KeyPressOptions, KeyPressOutcome, KeySequenceOptions,
    PowerStatus, ScanOutcome, VendorCommandOptions, VendorPayload,
};
pub use locator::AdapterLocator;
