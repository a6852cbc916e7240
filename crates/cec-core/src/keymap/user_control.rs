//! The canonical CEC User Control Code table (remote-key pass-through).
//!
//! These are the codes carried in `UserControlPressed` frames, defined by the
//! CEC specification's UI command table.  The numeric value of each variant is
//! its code byte on the bus.
//!
//! Every entry also appears in [`CANONICAL_NAMES`] under its normalized name
//! (lowercase, alphanumeric only), which is what the key table matches user
//! input against.  Convenience spellings live in the alias table, not here.

/// A CEC User Control Code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UserControlCode {
    // Navigation (0x00–0x0D)
    Select = 0x00,
    Up = 0x01,
    Down = 0x02,
    Left = 0x03,
    Right = 0x04,
    RightUp = 0x05,
    RightDown = 0x06,
    LeftUp = 0x07,
    LeftDown = 0x08,
    RootMenu = 0x09,
    SetupMenu = 0x0A,
    ContentsMenu = 0x0B,
    FavoriteMenu = 0x0C,
    Exit = 0x0D,

    // Numeric entry (0x20–0x2C)
    Digit0 = 0x20,
    Digit1 = 0x21,
    Digit2 = 0x22,
    Digit3 = 0x23,
    Digit4 = 0x24,
    Digit5 = 0x25,
    Digit6 = 0x26,
    Digit7 = 0x27,
    Digit8 = 0x28,
    Digit9 = 0x29,
    Dot = 0x2A,
    Enter = 0x2B,
    Clear = 0x2C,

    // Channel / display (0x2F–0x38)
    NextFavorite = 0x2F,
    ChannelUp = 0x30,
    ChannelDown = 0x31,
    PreviousChannel = 0x32,
    SoundSelect = 0x33,
    InputSelect = 0x34,
    DisplayInformation = 0x35,
    Help = 0x36,
    PageUp = 0x37,
    PageDown = 0x38,

    // Power / volume / playback (0x40–0x4E)
    Power = 0x40,
    VolumeUp = 0x41,
    VolumeDown = 0x42,
    Mute = 0x43,
    Play = 0x44,
    Stop = 0x45,
    Pause = 0x46,
    Record = 0x47,
    Rewind = 0x48,
    FastForward = 0x49,
    Eject = 0x4A,
    Forward = 0x4B,
    Backward = 0x4C,
    StopRecord = 0x4D,
    PauseRecord = 0x4E,

    // Media features (0x50–0x55)
    Angle = 0x50,
    SubPicture = 0x51,
    VideoOnDemand = 0x52,
    ElectronicProgramGuide = 0x53,
    TimerProgramming = 0x54,
    InitialConfiguration = 0x55,

    // Deterministic function variants (0x60–0x6D)
    PlayFunction = 0x60,
    PausePlayFunction = 0x61,
    RecordFunction = 0x62,
    PauseRecordFunction = 0x63,
    StopFunction = 0x64,
    MuteFunction = 0x65,
    RestoreVolumeFunction = 0x66,
    TuneFunction = 0x67,
    SelectMediaFunction = 0x68,
    SelectAvInputFunction = 0x69,
    SelectAudioInputFunction = 0x6A,
    PowerToggleFunction = 0x6B,
    PowerOffFunction = 0x6C,
    PowerOnFunction = 0x6D,

    // Color / data keys (0x71–0x76)
    F1Blue = 0x71,
    F2Red = 0x72,
    F3Green = 0x73,
    F4Yellow = 0x74,
    F5 = 0x75,
    Data = 0x76,
}

impl UserControlCode {
    /// Returns the code byte carried in the user-control frame.
    pub fn byte(self) -> u8 {
        self as u8
    }
}

/// Normalized name → code for every canonical entry.
pub const CANONICAL_NAMES: &[(&str, UserControlCode)] = &[
    ("select", UserControlCode::Select),
    ("up", UserControlCode::Up),
    ("down", UserControlCode::Down),
    ("left", UserControlCode::Left),
    ("right", UserControlCode::Right),
    ("rightup", UserControlCode::RightUp),
    ("rightdown", UserControlCode::RightDown),
    ("leftup", UserControlCode::LeftUp),
    ("leftdown", UserControlCode::LeftDown),
    ("rootmenu", UserControlCode::RootMenu),
    ("setupmenu", UserControlCode::SetupMenu),
    ("contentsmenu", UserControlCode::ContentsMenu),
    ("favoritemenu", UserControlCode::FavoriteMenu),
    ("exit", UserControlCode::Exit),
    ("0", UserControlCode::Digit0),
    ("1", UserControlCode::Digit1),
    ("2", UserControlCode::Digit2),
    ("3", UserControlCode::Digit3),
    ("4", UserControlCode::Digit4),
    ("5", UserControlCode::Digit5),
    ("6", UserControlCode::Digit6),
    ("7", UserControlCode::Digit7),
    ("8", UserControlCode::Digit8),
    ("9", UserControlCode::Digit9),
    ("dot", UserControlCode::Dot),
    ("enter", UserControlCode::Enter),
    ("clear", UserControlCode::Clear),
    ("nextfavorite", UserControlCode::NextFavorite),
    ("channelup", UserControlCode::ChannelUp),
    ("channeldown", UserControlCode::ChannelDown),
    ("previouschannel", UserControlCode::PreviousChannel),
    ("soundselect", UserControlCode::SoundSelect),
    ("inputselect", UserControlCode::InputSelect),
    ("displayinformation", UserControlCode::DisplayInformation),
    ("help", UserControlCode::Help),
    ("pageup", UserControlCode::PageUp),
    ("pagedown", UserControlCode::PageDown),
    ("power", UserControlCode::Power),
    ("volumeup", UserControlCode::VolumeUp),
    ("volumedown", UserControlCode::VolumeDown),
    ("mute", UserControlCode::Mute),
    ("play", UserControlCode::Play),
    ("stop", UserControlCode::Stop),
    ("pause", UserControlCode::Pause),
    ("record", UserControlCode::Record),
    ("rewind", UserControlCode::Rewind),
    ("fastforward", UserControlCode::FastForward),
    ("eject", UserControlCode::Eject),
    ("forward", UserControlCode::Forward),
    ("backward", UserControlCode::Backward),
    ("stoprecord", UserControlCode::StopRecord),
    ("pauserecord", UserControlCode::PauseRecord),
    ("angle", UserControlCode::Angle),
    ("subpicture", UserControlCode::SubPicture),
    ("videoondemand", UserControlCode::VideoOnDemand),
    ("electronicprogramguide", UserControlCode::ElectronicProgramGuide),
    ("timerprogramming", UserControlCode::TimerProgramming),
    ("initialconfiguration", UserControlCode::InitialConfiguration),
    ("playfunction", UserControlCode::PlayFunction),
    ("pauseplayfunction", UserControlCode::PausePlayFunction),
    ("recordfunction", UserControlCode::RecordFunction),
    ("pauserecordfunction", UserControlCode::PauseRecordFunction),
    ("stopfunction", UserControlCode::StopFunction),
    ("mutefunction", UserControlCode::MuteFunction),
    ("restorevolumefunction", UserControlCode::RestoreVolumeFunction),
    ("tunefunction", UserControlCode::TuneFunction),
    ("selectmediafunction", UserControlCode::SelectMediaFunction),
    ("selectavinputfunction", UserControlCode::SelectAvInputFunction),
    ("selectaudioinputfunction", UserControlCode::SelectAudioInputFunction),
    ("powertogglefunction", UserControlCode::PowerToggleFunction),
    ("powerofffunction", UserControlCode::PowerOffFunction),
    ("poweronfunction", UserControlCode::PowerOnFunction),
    ("blue", UserControlCode::F1Blue),
    ("red", UserControlCode::F2Red),
    ("green", UserControlCode::F3Green),
    ("yellow", UserControlCode::F4Yellow),
    ("f5", UserControlCode::F5),
    ("data", UserControlCode::Data),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_names_are_normalized_and_unique() {
        let mut seen = HashSet::new();
        for (name, _) in CANONICAL_NAMES {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "name {name:?} must be lowercase alphanumeric"
            );
            assert!(seen.insert(*name), "duplicate canonical name {name:?}");
        }
    }

    #[test]
    fn test_well_known_codes_match_cec_table() {
        assert_eq!(UserControlCode::Select.byte(), 0x00);
        assert_eq!(UserControlCode::Exit.byte(), 0x0D);
        assert_eq!(UserControlCode::Digit0.byte(), 0x20);
        assert_eq!(UserControlCode::VolumeUp.byte(), 0x41);
        assert_eq!(UserControlCode::F1Blue.byte(), 0x71);
    }

    #[test]
    fn test_every_variant_in_name_table_once() {
        // The table carries the full canonical set (~70 functions).
        assert!(CANONICAL_NAMES.len() >= 70);
    }
}
