//! Integration tests for the cec-core public API.
//!
//! These exercise the encoding pipeline the way the controller facade uses
//! it: resolve inputs through the address codec and key table, build frames,
//! and verify the adapter command grammar end to end.

use cec_core::{
    ascii_bytes, parse_scan_output, Frame, KeyTable, LogicalAddress, Opcode, PhysicalAddress,
};

/// Asserts the `tx <2-hex>:<2-hex>[:<2-hex>...]` grammar.
fn assert_tx_grammar(line: &str) {
    let body = line.strip_prefix("tx ").expect("must start with 'tx '");
    assert!(!body.is_empty());
    for token in body.split(':') {
        assert_eq!(token.len(), 2, "token {token:?} in {line:?}");
        assert!(token.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }
}

#[test]
fn test_key_press_frame_from_resolved_name() {
    let table = KeyTable::new();
    let code = table.resolve("Volume Up").expect("resolve");

    let frame = Frame::with_params(
        Opcode::UserControlPressed,
        vec![code],
        LogicalAddress::TV,
        LogicalAddress::PLAYBACK,
    );

    assert_eq!(frame.encode(), "tx 40:44:41");
    assert_tx_grammar(&frame.encode());
}

#[test]
fn test_set_stream_path_carries_physical_address_bytes() {
    let addr = PhysicalAddress::parse("2.1.0.0");
    let frame = Frame::with_params(
        Opcode::SetStreamPath,
        addr.to_bytes().to_vec(),
        LogicalAddress::BROADCAST,
        LogicalAddress::PLAYBACK,
    );

    assert_eq!(frame.encode(), "tx 4F:86:21:00");
}

#[test]
fn test_set_osd_name_frame_from_ascii_bytes() {
    let frame = Frame::with_params(
        Opcode::SetOsdName,
        ascii_bytes("TV", 14),
        LogicalAddress::TV,
        LogicalAddress::PLAYBACK,
    );

    assert_eq!(frame.encode(), "tx 40:47:54:56");
    assert_tx_grammar(&frame.encode());
}

#[test]
fn test_every_opcode_encodes_within_grammar() {
    let opcodes = [
        Opcode::ImageViewOn,
        Opcode::TextViewOn,
        Opcode::Standby,
        Opcode::UserControlPressed,
        Opcode::UserControlReleased,
        Opcode::GiveOsdName,
        Opcode::SetOsdName,
        Opcode::SetOsdString,
        Opcode::SystemAudioModeRequest,
        Opcode::ActiveSource,
        Opcode::GivePhysicalAddress,
        Opcode::ReportPhysicalAddress,
        Opcode::RequestActiveSource,
        Opcode::SetStreamPath,
        Opcode::VendorCommand,
        Opcode::VendorCommandWithId,
        Opcode::MenuRequest,
        Opcode::MenuStatus,
        Opcode::GiveDevicePowerStatus,
        Opcode::ReportPowerStatus,
        Opcode::GetCecVersion,
        Opcode::Abort,
    ];
    for opcode in opcodes {
        let frame = Frame::new(opcode, LogicalAddress::TV, LogicalAddress::PLAYBACK);
        assert_tx_grammar(&frame.encode());
    }
}

#[test]
fn test_physical_address_round_trip_for_all_input_forms() {
    for input in ["1.0.0.0", "1000", "0x1000", "100", "A.B.C.D"] {
        let addr = PhysicalAddress::parse(input);
        let hex = addr.as_hex();
        let rejoined = PhysicalAddress::from_bytes(addr.to_bytes());
        assert_eq!(rejoined.as_hex(), hex, "round trip for {input:?}");
        assert_eq!(hex.len(), 4);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }
}

#[test]
fn test_scan_parse_feeds_from_key_and_address_conventions() {
    let text = "\
device #0: TV
address:       0.0.0.0
power status:  on
device #8: Playback 2
address:       2.2.0.0
power status:  standby
";
    let devices = parse_scan_output(text);
    assert_eq!(devices.len(), 2);

    // Reported dotted addresses re-parse into canonical physical addresses.
    let addr = PhysicalAddress::parse(devices[1].physical_address.as_deref().unwrap());
    assert_eq!(addr.as_hex(), "2200");
}
