//! Convenience aliases for remote-key names.
//!
//! Each alias resolves through exactly one indirection: either to a canonical
//! name (looked up in the merged canonical table, so caller overrides apply)
//! or directly to a literal code byte.  Alias keys are normalized the same way
//! as canonical names.

/// The resolution target of one alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasTarget {
    /// Resolves to a canonical entry by its normalized name.
    Name(&'static str),
    /// Resolves directly to a code byte.
    Code(u8),
}

/// Normalized alias → target.
pub const ALIASES: &[(&str, AliasTarget)] = &[
    ("ok", AliasTarget::Name("select")),
    ("confirm", AliasTarget::Name("select")),
    ("center", AliasTarget::Name("select")),
    ("back", AliasTarget::Name("exit")),
    ("return", AliasTarget::Name("exit")),
    ("home", AliasTarget::Name("rootmenu")),
    ("menu", AliasTarget::Name("rootmenu")),
    ("settings", AliasTarget::Name("setupmenu")),
    ("setup", AliasTarget::Name("setupmenu")),
    ("favorites", AliasTarget::Name("favoritemenu")),
    ("fav", AliasTarget::Name("favoritemenu")),
    ("guide", AliasTarget::Name("electronicprogramguide")),
    ("epg", AliasTarget::Name("electronicprogramguide")),
    ("info", AliasTarget::Name("displayinformation")),
    ("display", AliasTarget::Name("displayinformation")),
    ("volup", AliasTarget::Name("volumeup")),
    ("voldown", AliasTarget::Name("volumedown")),
    ("vol", AliasTarget::Name("volumeup")),
    ("chup", AliasTarget::Name("channelup")),
    ("chdown", AliasTarget::Name("channeldown")),
    ("prevchannel", AliasTarget::Name("previouschannel")),
    ("lastchannel", AliasTarget::Name("previouschannel")),
    ("input", AliasTarget::Name("inputselect")),
    ("source", AliasTarget::Name("inputselect")),
    ("ff", AliasTarget::Name("fastforward")),
    ("fwd", AliasTarget::Name("fastforward")),
    ("rew", AliasTarget::Name("rewind")),
    ("pgup", AliasTarget::Name("pageup")),
    ("pgdown", AliasTarget::Name("pagedown")),
    ("point", AliasTarget::Name("dot")),
    ("period", AliasTarget::Name("dot")),
    ("subtitle", AliasTarget::Name("subpicture")),
    ("subtitles", AliasTarget::Name("subpicture")),
    ("vod", AliasTarget::Name("videoondemand")),
    ("teletext", AliasTarget::Name("data")),
    ("text", AliasTarget::Name("data")),
    ("poweron", AliasTarget::Name("poweronfunction")),
    ("poweroff", AliasTarget::Name("powerofffunction")),
    ("powertoggle", AliasTarget::Name("powertogglefunction")),
    // Samsung remotes report their tools key with a vendor-range code that has
    // no canonical CEC name.
    ("tools", AliasTarget::Code(0x7C)),
];
