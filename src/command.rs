//! Per-subsystem command table and mnemonic lookup.

use crate::device::DeviceCommand;

/// Feature group a command belongs to. The enable flag of a group gates its
/// detail lines during serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    WaterProfile,
    Burst,
    BottomTrack,
    WaterTrack,
}

/// Storage type of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `1` / `0`
    Flag,
    /// Small code or count, 0-255.
    Byte,
    /// Count, 0-65535.
    Count,
    /// Decimal value.
    Real,
    /// `HH:MM:SS.hh`
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    /// Minimum decimals printed for [`FieldKind::Real`] fields.
    pub precision: usize,
}

pub(crate) const fn flag(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        unit: "",
        kind: FieldKind::Flag,
        min: 0.0,
        max: 1.0,
        precision: 0,
    }
}

pub(crate) const fn byte(name: &'static str, min: f64, max: f64) -> FieldSpec {
    FieldSpec {
        name,
        unit: "",
        kind: FieldKind::Byte,
        min,
        max,
        precision: 0,
    }
}

pub(crate) const fn count(name: &'static str, min: f64, max: f64) -> FieldSpec {
    FieldSpec {
        name,
        unit: "",
        kind: FieldKind::Count,
        min,
        max,
        precision: 0,
    }
}

pub(crate) const fn real(name: &'static str, unit: &'static str, min: f64, max: f64, precision: usize) -> FieldSpec {
    FieldSpec {
        name,
        unit,
        kind: FieldKind::Real,
        min,
        max,
        precision,
    }
}

pub(crate) const fn time(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        unit: "HH:MM:SS.hh",
        kind: FieldKind::Time,
        min: 0.0,
        max: 86_399.99,
        precision: 2,
    }
}

const SCREENING: [FieldSpec; 3] = [
    real("correlation threshold", "", 0.0, 1.0, 2),
    real("error velocity threshold", "m/s", 0.0, 100.0, 3),
    real("vertical velocity threshold", "m/s", 0.0, 100.0, 3),
];

/// Indexed per-subsystem commands. Discriminants index [`COMMANDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Command {
    Cwpon,
    Cwprt,
    Cwpbb,
    Cwpap,
    Cwpbp,
    Cwpst,
    Cwpbl,
    Cwpbs,
    Cwpx,
    Cwpbn,
    Cwpp,
    Cwpai,
    Cwptbp,
    Cbi,
    Cbton,
    Cbtbb,
    Cbtst,
    Cbtt,
    Cbtbl,
    Cbtmx,
    Cbttbp,
    Cbtfilt,
    Cwton,
    Cwtbb,
    Cwtbl,
    Cwtbs,
    Cwttbp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSpec {
    pub command: Command,
    pub mnemonic: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

/// The command table, in [`Command`] order.
pub static COMMANDS: [CommandSpec; 27] = [
    CommandSpec {
        command: Command::Cwpon,
        mnemonic: "CWPON",
        category: Category::WaterProfile,
        description: "Water profile on/off",
        fields: &[flag("enabled")],
    },
    CommandSpec {
        command: Command::Cwprt,
        mnemonic: "CWPRT",
        category: Category::WaterProfile,
        description: "Range tracking mode and bin window",
        fields: &[
            byte("mode", 0.0, 2.0),
            count("first bin", 1.0, 200.0),
            count("last bin", 1.0, 200.0),
        ],
    },
    CommandSpec {
        command: Command::Cwpbb,
        mnemonic: "CWPBB",
        category: Category::WaterProfile,
        description: "Pulse type and lag length",
        fields: &[byte("pulse type", 0.0, 4.0), real("lag length", "m", 0.0, 100.0, 3)],
    },
    CommandSpec {
        command: Command::Cwpap,
        mnemonic: "CWPAP",
        category: Category::WaterProfile,
        description: "Ambiguity resolver ping",
        fields: &[
            count("ping count", 0.0, 100.0),
            real("lag", "m", 0.0, 100.0, 3),
            real("blank", "m", 0.0, 100.0, 2),
            real("bin size", "m", 0.0, 100.0, 2),
            real("time between pings", "s", 0.0, 86_400.0, 2),
        ],
    },
    CommandSpec {
        command: Command::Cwpbp,
        mnemonic: "CWPBP",
        category: Category::WaterProfile,
        description: "Base ping averaging",
        fields: &[
            count("base ping count", 0.0, 100.0),
            real("time between base pings", "s", 0.0, 86_400.0, 2),
        ],
    },
    CommandSpec {
        command: Command::Cwpst,
        mnemonic: "CWPST",
        category: Category::WaterProfile,
        description: "Water profile screening thresholds",
        fields: &SCREENING,
    },
    CommandSpec {
        command: Command::Cwpbl,
        mnemonic: "CWPBL",
        category: Category::WaterProfile,
        description: "Blank distance",
        fields: &[real("blank", "m", 0.0, 100.0, 2)],
    },
    CommandSpec {
        command: Command::Cwpbs,
        mnemonic: "CWPBS",
        category: Category::WaterProfile,
        description: "Bin size",
        fields: &[real("bin size", "m", 0.01, 100.0, 2)],
    },
    CommandSpec {
        command: Command::Cwpx,
        mnemonic: "CWPX",
        category: Category::WaterProfile,
        description: "Transmit length, 0 follows bin size",
        fields: &[real("transmit length", "m", 0.0, 100.0, 2)],
    },
    CommandSpec {
        command: Command::Cwpbn,
        mnemonic: "CWPBN",
        category: Category::WaterProfile,
        description: "Bin count",
        fields: &[count("bin count", 0.0, 200.0)],
    },
    CommandSpec {
        command: Command::Cwpp,
        mnemonic: "CWPP",
        category: Category::WaterProfile,
        description: "Pings per ensemble",
        fields: &[count("ping count", 0.0, 10_000.0)],
    },
    CommandSpec {
        command: Command::Cwpai,
        mnemonic: "CWPAI",
        category: Category::WaterProfile,
        description: "Averaging interval, replaces the ping count when nonzero",
        fields: &[time("averaging interval")],
    },
    CommandSpec {
        command: Command::Cwptbp,
        mnemonic: "CWPTBP",
        category: Category::WaterProfile,
        description: "Water profile time between pings",
        fields: &[real("time between pings", "s", 0.0, 86_400.0, 2)],
    },
    CommandSpec {
        command: Command::Cbi,
        mnemonic: "CBI",
        category: Category::Burst,
        description: "Burst interval",
        fields: &[
            time("burst interval"),
            count("ensembles per burst", 0.0, 10_000.0),
            flag("interleave pair"),
        ],
    },
    CommandSpec {
        command: Command::Cbton,
        mnemonic: "CBTON",
        category: Category::BottomTrack,
        description: "Bottom track on/off",
        fields: &[flag("enabled")],
    },
    CommandSpec {
        command: Command::Cbtbb,
        mnemonic: "CBTBB",
        category: Category::BottomTrack,
        description: "Bottom track broadband mode",
        fields: &[
            byte("mode", 0.0, 7.0),
            real("pulse-to-pulse lag", "m", 0.0, 100.0, 3),
            real("long range depth", "m", 0.0, 10_000.0, 2),
            byte("beam multiplex", 1.0, 4.0),
        ],
    },
    CommandSpec {
        command: Command::Cbtst,
        mnemonic: "CBTST",
        category: Category::BottomTrack,
        description: "Bottom track screening thresholds",
        fields: &SCREENING,
    },
    CommandSpec {
        command: Command::Cbtt,
        mnemonic: "CBTT",
        category: Category::BottomTrack,
        description: "Bottom detection thresholds",
        fields: &[
            real("shallow SNR", "dB", 0.0, 100.0, 2),
            real("SNR switch depth", "m", 0.0, 10_000.0, 2),
            real("deep SNR", "dB", 0.0, 100.0, 2),
            real("gain switch depth", "m", 0.0, 10_000.0, 2),
        ],
    },
    CommandSpec {
        command: Command::Cbtbl,
        mnemonic: "CBTBL",
        category: Category::BottomTrack,
        description: "Bottom track blank",
        fields: &[real("blank", "m", 0.0, 100.0, 2)],
    },
    CommandSpec {
        command: Command::Cbtmx,
        mnemonic: "CBTMX",
        category: Category::BottomTrack,
        description: "Bottom track maximum depth",
        fields: &[real("max depth", "m", 5.0, 10_000.0, 2)],
    },
    CommandSpec {
        command: Command::Cbttbp,
        mnemonic: "CBTTBP",
        category: Category::BottomTrack,
        description: "Bottom track time between pings",
        fields: &[real("time between pings", "s", 0.0, 86_400.0, 2)],
    },
    CommandSpec {
        command: Command::Cbtfilt,
        mnemonic: "CBTFILT",
        category: Category::BottomTrack,
        description: "Bottom track output and reference low pass filters",
        fields: &[
            flag("output filter enabled"),
            real("output time constant", "", 0.0, 1.0, 2),
            flag("reference filter enabled"),
            real("reference time constant", "", 0.0, 1.0, 2),
            real("reference outlier threshold", "m/s", 0.0, 100.0, 3),
        ],
    },
    CommandSpec {
        command: Command::Cwton,
        mnemonic: "CWTON",
        category: Category::WaterTrack,
        description: "Water track on/off",
        fields: &[flag("enabled")],
    },
    CommandSpec {
        command: Command::Cwtbb,
        mnemonic: "CWTBB",
        category: Category::WaterTrack,
        description: "Water track broadband on/off",
        fields: &[flag("broadband")],
    },
    CommandSpec {
        command: Command::Cwtbl,
        mnemonic: "CWTBL",
        category: Category::WaterTrack,
        description: "Water track blank",
        fields: &[real("blank", "m", 0.0, 100.0, 2)],
    },
    CommandSpec {
        command: Command::Cwtbs,
        mnemonic: "CWTBS",
        category: Category::WaterTrack,
        description: "Water track bin size",
        fields: &[real("bin size", "m", 0.05, 64.0, 2)],
    },
    CommandSpec {
        command: Command::Cwttbp,
        mnemonic: "CWTTBP",
        category: Category::WaterTrack,
        description: "Water track time between pings",
        fields: &[real("time between pings", "s", 0.0, 86_400.0, 2)],
    },
];

impl Command {
    pub const ALL: [Command; 27] = [
        Command::Cwpon,
        Command::Cwprt,
        Command::Cwpbb,
        Command::Cwpap,
        Command::Cwpbp,
        Command::Cwpst,
        Command::Cwpbl,
        Command::Cwpbs,
        Command::Cwpx,
        Command::Cwpbn,
        Command::Cwpp,
        Command::Cwpai,
        Command::Cwptbp,
        Command::Cbi,
        Command::Cbton,
        Command::Cbtbb,
        Command::Cbtst,
        Command::Cbtt,
        Command::Cbtbl,
        Command::Cbtmx,
        Command::Cbttbp,
        Command::Cbtfilt,
        Command::Cwton,
        Command::Cwtbb,
        Command::Cwtbl,
        Command::Cwtbs,
        Command::Cwttbp,
    ];

    pub fn spec(self) -> &'static CommandSpec {
        &COMMANDS[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.spec().mnemonic
    }

    /// Number of comma-separated fields the command carries.
    pub fn arity(self) -> usize {
        self.spec().fields.len()
    }

    pub fn category(self) -> Category {
        self.spec().category
    }

    pub fn field(self, position: usize) -> Option<&'static FieldSpec> {
        self.spec().fields.get(position)
    }

    /// Exact, case-insensitive lookup.
    pub fn from_mnemonic(text: &str) -> Option<Command> {
        Command::ALL
            .into_iter()
            .find(|c| c.mnemonic().eq_ignore_ascii_case(text))
    }

    /// The on/off command gating this command's feature, if any.
    pub fn gate(self) -> Option<Command> {
        let gate = match self.category() {
            Category::WaterProfile => Command::Cwpon,
            Category::BottomTrack => Command::Cbton,
            Category::WaterTrack => Command::Cwton,
            Category::Burst => return None,
        };
        (gate != self).then_some(gate)
    }
}

/// Any mnemonic the decoder recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Subsystem(Command),
    Device(DeviceCommand),
}

impl Mnemonic {
    pub fn text(self) -> &'static str {
        match self {
            Mnemonic::Subsystem(c) => c.mnemonic(),
            Mnemonic::Device(d) => d.mnemonic(),
        }
    }
}

/// Every mnemonic, longest first, so `CBTTBP` is tried before `CBTT` and
/// `CWSS` before `CWS`.
pub const MNEMONIC_PRECEDENCE: [Mnemonic; 37] = [
    Mnemonic::Device(DeviceCommand::Ceoutput),
    Mnemonic::Device(DeviceCommand::Cerecord),
    Mnemonic::Subsystem(Command::Cbtfilt),
    Mnemonic::Subsystem(Command::Cwptbp),
    Mnemonic::Subsystem(Command::Cbttbp),
    Mnemonic::Subsystem(Command::Cwttbp),
    Mnemonic::Subsystem(Command::Cwpon),
    Mnemonic::Subsystem(Command::Cwprt),
    Mnemonic::Subsystem(Command::Cwpbb),
    Mnemonic::Subsystem(Command::Cwpap),
    Mnemonic::Subsystem(Command::Cwpbp),
    Mnemonic::Subsystem(Command::Cwpst),
    Mnemonic::Subsystem(Command::Cwpbl),
    Mnemonic::Subsystem(Command::Cwpbs),
    Mnemonic::Subsystem(Command::Cwpbn),
    Mnemonic::Subsystem(Command::Cwpai),
    Mnemonic::Subsystem(Command::Cbton),
    Mnemonic::Subsystem(Command::Cbtbb),
    Mnemonic::Subsystem(Command::Cbtst),
    Mnemonic::Subsystem(Command::Cbtbl),
    Mnemonic::Subsystem(Command::Cbtmx),
    Mnemonic::Subsystem(Command::Cwton),
    Mnemonic::Subsystem(Command::Cwtbb),
    Mnemonic::Subsystem(Command::Cwtbl),
    Mnemonic::Subsystem(Command::Cwtbs),
    Mnemonic::Subsystem(Command::Cwpx),
    Mnemonic::Subsystem(Command::Cwpp),
    Mnemonic::Subsystem(Command::Cbtt),
    Mnemonic::Device(DeviceCommand::Cepo),
    Mnemonic::Device(DeviceCommand::Cwss),
    Mnemonic::Device(DeviceCommand::Mode),
    Mnemonic::Subsystem(Command::Cbi),
    Mnemonic::Device(DeviceCommand::Cei),
    Mnemonic::Device(DeviceCommand::Cho),
    Mnemonic::Device(DeviceCommand::Chs),
    Mnemonic::Device(DeviceCommand::Cws),
    Mnemonic::Device(DeviceCommand::Cwt),
];

/// Leading mnemonic token: everything up to the first `[` or whitespace.
pub fn leading_token(line: &str) -> &str {
    let line = line.trim_start();
    let end = line
        .find(|c: char| c == '[' || c.is_whitespace())
        .unwrap_or(line.len());
    &line[..end]
}

/// Work out which command a `CSHOW` line carries.
///
/// The leading token is looked up exactly first. If that fails (a prompt or
/// echo in front of the mnemonic, for instance) the line is scanned for each
/// mnemonic in [`MNEMONIC_PRECEDENCE`] order; a match must stand as its own
/// word.
pub fn classify(line: &str) -> Option<Mnemonic> {
    split_mnemonic(line).map(|(mnemonic, _)| mnemonic)
}

/// [`classify`], also returning the text that follows the mnemonic.
pub fn split_mnemonic(line: &str) -> Option<(Mnemonic, &str)> {
    let line = line.trim_start();
    let token = leading_token(line);
    let exact = Command::from_mnemonic(token)
        .map(Mnemonic::Subsystem)
        .or_else(|| DeviceCommand::from_mnemonic(token).map(Mnemonic::Device));
    if let Some(mnemonic) = exact {
        return Some((mnemonic, &line[token.len()..]));
    }
    MNEMONIC_PRECEDENCE.into_iter().find_map(|mnemonic| {
        let pos = find_mnemonic(line, mnemonic.text())?;
        Some((mnemonic, &line[pos + mnemonic.text().len()..]))
    })
}

/// Byte offset of the first occurrence of `mnemonic` in `line` that stands
/// as its own word: preceded by the line start, whitespace or a `>` prompt,
/// and followed by `[`, whitespace or the end of the line.
fn find_mnemonic(line: &str, mnemonic: &str) -> Option<usize> {
    line.match_indices(mnemonic)
        .map(|(pos, _)| pos)
        .find(|&pos| {
            let before = match line[..pos].chars().next_back() {
                None => true,
                Some(c) => c == '>' || c.is_whitespace(),
            };
            let after = match line[pos + mnemonic.len()..].chars().next() {
                None => true,
                Some(c) => c == '[' || c.is_whitespace(),
            };
            before && after
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_in_enum_order() {
        for (i, spec) in COMMANDS.iter().enumerate() {
            assert_eq!(spec.command as usize, i, "{}", spec.mnemonic);
            assert_eq!(Command::ALL[i], spec.command);
        }
    }

    #[test]
    fn ranges_are_well_formed() {
        for spec in &COMMANDS {
            assert!(!spec.fields.is_empty(), "{}", spec.mnemonic);
            for field in spec.fields {
                assert!(field.min <= field.max, "{} {}", spec.mnemonic, field.name);
            }
        }
    }

    #[test]
    fn lookup_by_mnemonic() {
        assert_eq!(Command::from_mnemonic("CWPBN"), Some(Command::Cwpbn));
        assert_eq!(Command::from_mnemonic("cwpbn"), Some(Command::Cwpbn));
        assert_eq!(Command::from_mnemonic("CWPB"), None);
        assert_eq!(Command::Cbtfilt.arity(), 5);
        assert_eq!(Command::Cwpap.arity(), 5);
        assert_eq!(Command::Cbi.arity(), 3);
    }

    #[test]
    fn gates() {
        assert_eq!(Command::Cwpon.gate(), None);
        assert_eq!(Command::Cwpbn.gate(), Some(Command::Cwpon));
        assert_eq!(Command::Cbtmx.gate(), Some(Command::Cbton));
        assert_eq!(Command::Cwtbs.gate(), Some(Command::Cwton));
        assert_eq!(Command::Cbi.gate(), None);
    }

    #[test]
    fn precedence_lists_every_mnemonic_once() {
        for command in Command::ALL {
            let n = MNEMONIC_PRECEDENCE
                .iter()
                .filter(|m| **m == Mnemonic::Subsystem(command))
                .count();
            assert_eq!(n, 1, "{}", command.mnemonic());
        }
        for device in DeviceCommand::ALL {
            let n = MNEMONIC_PRECEDENCE
                .iter()
                .filter(|m| **m == Mnemonic::Device(device))
                .count();
            assert_eq!(n, 1, "{}", device.mnemonic());
        }
    }

    #[test]
    fn contained_mnemonics_come_later() {
        for (i, outer) in MNEMONIC_PRECEDENCE.iter().enumerate() {
            for inner in &MNEMONIC_PRECEDENCE[..i] {
                assert!(
                    !outer.text().contains(inner.text()),
                    "{} must precede {}",
                    outer.text(),
                    inner.text()
                );
            }
        }
    }

    #[test]
    fn classify_exact_token() {
        assert_eq!(classify("CBTT[0] 15.00,25.00,6.00,6.00"), Some(Mnemonic::Subsystem(Command::Cbtt)));
        assert_eq!(classify("CBTTBP[0] 0.00"), Some(Mnemonic::Subsystem(Command::Cbttbp)));
        assert_eq!(classify("CWT 15.00"), Some(Mnemonic::Device(DeviceCommand::Cwt)));
        assert_eq!(classify("CWTON[1] 0"), Some(Mnemonic::Subsystem(Command::Cwton)));
        assert_eq!(classify("Mode DVL"), Some(Mnemonic::Device(DeviceCommand::Mode)));
        assert_eq!(classify("  CEPO 23"), Some(Mnemonic::Device(DeviceCommand::Cepo)));
    }

    #[test]
    fn classify_falls_back_to_containment() {
        assert_eq!(classify("> CBTTBP[0] 0.00"), Some(Mnemonic::Subsystem(Command::Cbttbp)));
        assert_eq!(classify("> CBTT[0] 15.00"), Some(Mnemonic::Subsystem(Command::Cbtt)));
        assert_eq!(classify(">CWSS 1500"), Some(Mnemonic::Device(DeviceCommand::Cwss)));
        assert_eq!(classify("ADCP firmware 1.2.3"), None);
        assert_eq!(classify("CWPBNX[0] 1"), None);
    }

    #[test]
    fn containment_needs_word_start() {
        assert_eq!(classify("ECHO 1"), None);
        assert_eq!(classify("XCWT 40"), None);
        assert_eq!(classify("> XCWSS 1500"), None);
        assert_eq!(classify("echo: CHO 5"), Some(Mnemonic::Device(DeviceCommand::Cho)));
    }

    #[test]
    fn split_returns_remainder() {
        let (m, rest) = split_mnemonic("CWPBN[0] 10 [1] 20").unwrap();
        assert_eq!(m, Mnemonic::Subsystem(Command::Cwpbn));
        assert_eq!(rest, "[0] 10 [1] 20");
        let (m, rest) = split_mnemonic("MODE DVL").unwrap();
        assert_eq!(m, Mnemonic::Device(DeviceCommand::Mode));
        assert_eq!(rest.trim(), "DVL");
        let (_, rest) = split_mnemonic("> CHO 12.50").unwrap();
        assert_eq!(rest.trim(), "12.50");
    }

    #[test]
    fn leading_token_stops_at_bracket_or_space() {
        assert_eq!(leading_token("CWPBN[0] 10"), "CWPBN");
        assert_eq!(leading_token("CEPO 23"), "CEPO");
        assert_eq!(leading_token("CWPBN"), "CWPBN");
    }
}
