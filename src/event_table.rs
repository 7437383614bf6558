//! The static FLP event catalogue.
//!
//! Event ids partition into four ranges that determine payload size. Inside
//! the DWORD range only the catalogued ids are unambiguously 4-byte fixed;
//! anything else there has to go through the decoder's disambiguation.

/// First id of the 1-byte payload range.
pub const BYTE: u8 = 0;
/// First id of the 2-byte payload range.
pub const WORD: u8 = 64;
/// First id of the 4-byte payload range.
pub const DWORD: u8 = 128;
/// First id of the VLI-sized text range.
pub const TEXT: u8 = 192;
/// First id of the VLI-sized opaque-data range.
pub const DATA: u8 = 208;

/// Well-known event ids referenced outside the table.
pub mod ids {
    /// Project title (TEXT + 2).
    pub const TITLE: u8 = 194;
    /// Project comment (TEXT + 3).
    pub const COMMENT: u8 = 195;
    /// Project URL (TEXT + 5).
    pub const URL: u8 = 197;
    /// FL version string, e.g. `"21.0.3"` (TEXT + 7).
    pub const VERSION: u8 = 199;
    /// Project genre (TEXT + 14).
    pub const GENRE: u8 = 206;
    /// Project author (TEXT + 15).
    pub const AUTHOR: u8 = 207;
    /// Wrapper chunk with plugin name/vendor/state (TEXT + 21).
    pub const PLUGIN_PARAMS: u8 = 213;
    /// Legacy coarse tempo in whole BPM (WORD + 2).
    pub const TEMPO: u8 = 66;
    /// Tempo in 1/1000 BPM (DWORD + 28).
    pub const FINE_TEMPO: u8 = 156;
}

/// Semantic payload type of an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    Text,
    Data,
    /// Variable-length payload behind an uncatalogued DWORD-range id; the
    /// payload is opaque and the numeric accessors refuse it.
    Unknown,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::U8 => "u8",
            EventKind::I8 => "i8",
            EventKind::U16 => "u16",
            EventKind::I16 => "i16",
            EventKind::U32 => "u32",
            EventKind::I32 => "i32",
            EventKind::F32 => "f32",
            EventKind::Text => "text",
            EventKind::Data => "data",
            EventKind::Unknown => "unknown",
        }
    }
}

/// The explicit id→kind mapping. `None` means the id falls back to its
/// range default.
fn explicit_kind(id: u8) -> Option<EventKind> {
    use EventKind::*;

    let kind = match id {
        // BYTE range.
        0..=7 | 9..=23 | 28 | 30 | 31 => U8,

        // WORD range. MainPitch is signed (cents around the root note).
        80 => I16,
        64..=79 | 81..=97 => U16,

        // DWORD range. FineTune is signed cents. Ids 134, 140, 141, 151 and
        // 157..192 have never been catalogued and stay ambiguous.
        142 => I32,
        128..=133 | 135..=139 | 143..=150 | 152..=156 => U32,

        // TEXT range.
        192..=207 => Text,

        // DATA range. Three of these became NUL-terminated names in recent
        // FL versions and are decoded as text.
        231 | 239 | 241 => Text,
        208..=213 | 215..=230 | 232..=238 => Data,

        _ => return None,
    };

    Some(kind)
}

/// Semantic kind for any id, falling back to the range default when the id
/// is not catalogued. Total over `[0, 255]`.
pub fn kind_of(id: u8) -> EventKind {
    if let Some(kind) = explicit_kind(id) {
        return kind;
    }

    if id < WORD {
        EventKind::U8
    } else if id < DWORD {
        EventKind::U16
    } else if id < TEXT {
        EventKind::U32
    } else if id < DATA {
        EventKind::Text
    } else {
        EventKind::Data
    }
}

/// Fixed payload width for ids in the three fixed ranges, `None` for the
/// variable-length ranges.
pub fn fixed_size(id: u8) -> Option<usize> {
    if id < WORD {
        Some(1)
    } else if id < DWORD {
        Some(2)
    } else if id < TEXT {
        Some(4)
    } else {
        None
    }
}

/// True iff `id` sits in the DWORD range *and* the catalogue maps it: such
/// events are always a fixed 4-byte payload, no disambiguation needed.
pub fn is_known_dword_range_id(id: u8) -> bool {
    (DWORD..TEXT).contains(&id) && explicit_kind(id).is_some()
}

/// Display name for catalogued ids, for dump output.
pub fn event_name(id: u8) -> Option<&'static str> {
    let name = match id {
        0 => "Enabled",
        1 => "NoteOn",
        2 => "ChanVolume",
        3 => "ChanPan",
        4 => "MidiChan",
        5 => "MidiNote",
        6 => "MidiPatch",
        7 => "MidiBank",
        9 => "LoopActive",
        10 => "ShowInfo",
        11 => "Shuffle",
        12 => "MainVolume",
        13 => "FitToSteps",
        14 => "Pitchable",
        15 => "Zipped",
        16 => "DelayFlags",
        17 => "TimeSigNumerator",
        18 => "TimeSigDenominator",
        19 => "UseLoopPoints",
        20 => "LoopType",
        21 => "ChanType",
        22 => "TargetFxTrack",
        23 => "PanningLaw",
        28 => "Registered",
        30 => "PlayTruncatedNotes",
        31 => "EEAutoMode",
        64 => "NewChannel",
        65 => "NewPattern",
        66 => "Tempo",
        67 => "SelectedPatNum",
        68 => "PatData",
        69 => "Fx",
        70 => "FadeStereo",
        71 => "CutOff",
        72 => "DotVol",
        73 => "DotPan",
        74 => "PreAmp",
        75 => "Decay",
        76 => "Attack",
        77 => "DotNote",
        78 => "DotPitch",
        79 => "DotMix",
        80 => "MainPitch",
        81 => "RandChan",
        82 => "MixChan",
        83 => "Resonance",
        84 => "OldSongLoopPos",
        85 => "StDel",
        86 => "Fx3",
        87 => "DotReso",
        88 => "DotCutOff",
        89 => "ShiftDelay",
        90 => "LoopEndBar",
        91 => "Dot",
        92 => "DotShift",
        93 => "TempoFine",
        94 => "LayerChan",
        95 => "FxIcon",
        96 => "DotRel",
        97 => "SwingMix",
        128 => "PluginColor",
        129 => "PlaylistItem",
        130 => "Echo",
        131 => "FxSine",
        132 => "CutCutBy",
        133 => "WindowHeight",
        135 => "MiddleNote",
        136 => "Reserved",
        137 => "MainResoCutOff",
        138 => "DelayReso",
        139 => "Reverb",
        142 => "FineTune",
        143 => "SampleFlags",
        144 => "LayerFlags",
        145 => "GroupNum",
        146 => "CurFilterNum",
        147 => "FxOutChanNum",
        148 => "NewTimeMarker",
        149 => "FxColor",
        150 => "PatColor",
        152 => "SongLoopPos",
        153 => "AuSmpRate",
        154 => "FxInChanNum",
        155 => "PluginIcon",
        156 => "FineTempo",
        192 => "ChanName",
        193 => "PatName",
        194 => "Title",
        195 => "Comment",
        196 => "SampleFileName",
        197 => "Url",
        198 => "CommentRtf",
        199 => "Version",
        200 => "RegName",
        201 => "DefPluginName",
        202 => "ProjectDataPath",
        203 => "PluginName",
        204 => "FxName",
        205 => "TimeMarkerName",
        206 => "Genre",
        207 => "Author",
        208 => "MidiCtrls",
        209 => "Delay",
        210 => "Ts404Params",
        211 => "DelayLine",
        212 => "NewPlugin",
        213 => "PluginParams",
        215 => "ChanParams",
        216 => "CtrlRecChan",
        217 => "PlaylistSelection",
        218 => "Envelope",
        219 => "ChanLevels",
        220 => "ChanFilter",
        221 => "ChanPoly",
        222 => "NoteRecChan",
        223 => "PatCtrlRecChan",
        224 => "PatNoteRecChan",
        225 => "InitCtrlRecChan",
        226 => "RemoteCtrlMidi",
        227 => "RemoteCtrlInt",
        228 => "Tracking",
        229 => "ChanOfsLevels",
        230 => "RemoteCtrlFormula",
        231 => "ChanGroupName",
        232 => "RegBlackList",
        233 => "PlaylistItems",
        234 => "ChanAC",
        235 => "FxRouting",
        236 => "FxParams",
        237 => "ProjectTime",
        238 => "PlaylistTrackInfo",
        239 => "TrackName",
        241 => "ArrangementName",
        _ => return None,
    };

    Some(name)
}
