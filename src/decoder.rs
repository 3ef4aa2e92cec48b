//! `CSHOW` dump decoder. Pass 1 builds the CEPO structure, pass 2 applies
//! values; skipped items go to a [`DecodeReport`].

use std::fmt;

use ascii::AsciiStr;
use tracing::{debug, trace, warn};

use crate::cepo::{decode_indexed_detailed, parse_cepo};
use crate::command::{split_mnemonic, Command, Mnemonic};
use crate::configuration::AdcpConfiguration;
use crate::device::DeviceCommand;
use crate::error::Error;
use crate::subsystem::{Subsystem, SubsystemCode};

/// Why a piece of the dump was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Value outside the field's valid range.
    OutOfRange,
    /// Value or bracket index not parseable.
    ParseFailure,
    /// Bracket index with no matching configuration.
    UnknownIndex,
    /// Too few comma-separated values, or an indexed command without any
    /// index.
    StructuralMismatch,
    /// CEPO names a subsystem code that is unknown or not installed.
    UnknownSubsystem,
    /// Line contains non-ASCII bytes.
    NotAscii,
}

/// One skipped item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeIssue {
    /// 1-based line number in the input.
    pub line: usize,
    pub mnemonic: Option<&'static str>,
    pub index: Option<u16>,
    pub kind: IssueKind,
    pub detail: String,
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {:?}", self.line, self.kind)?;
        if let Some(mnemonic) = self.mnemonic {
            write!(f, " {mnemonic}")?;
        }
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Everything a decode skipped. Empty when the dump applied cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub issues: Vec<DecodeIssue>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    fn push(&mut self, issue: DecodeIssue) {
        debug!("skipped: {issue}");
        self.issues.push(issue);
    }

    fn push_error(&mut self, line: usize, mnemonic: &'static str, index: Option<u16>, error: Error) {
        let kind = match error {
            Error::OutOfRange { .. } => IssueKind::OutOfRange,
            Error::FieldCount { .. } => IssueKind::StructuralMismatch,
            Error::NotAscii(_) => IssueKind::NotAscii,
            Error::UnsupportedSubsystemCode(_) | Error::UnassignedSubsystem(_) => {
                IssueKind::UnknownSubsystem
            }
            Error::Parse { .. } | Error::UnknownCommandField { .. } => IssueKind::ParseFailure,
        };
        self.push(DecodeIssue {
            line,
            mnemonic: Some(mnemonic),
            index,
            kind,
            detail: error.to_string(),
        });
    }
}

/// Non-empty, trimmed lines with their 1-based line numbers. `\n`, `\r\n`
/// and a lone `\r` all end a line; lone `\r` breaks keep the number of the
/// `\n` line they sit on.
fn split_lines(text: &str) -> Vec<(usize, &str)> {
    text.split('\n')
        .enumerate()
        .flat_map(|(n, line)| line.split('\r').map(move |part| (n + 1, part.trim())))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

/// Decode a dump into a new configuration, dropping the report.
///
/// `subsystems` is the instrument's installed subsystem list in serial
/// number order.
pub fn decode(text: &str, subsystems: &[Subsystem]) -> AdcpConfiguration {
    decode_with_report(text, subsystems).0
}

pub fn decode_with_report(text: &str, subsystems: &[Subsystem]) -> (AdcpConfiguration, DecodeReport) {
    decode_lines(&split_lines(text), subsystems, DecodeReport::default())
}

/// Decode raw bytes as read from the instrument. Lines with non-ASCII bytes
/// are skipped and reported; the rest decode normally.
pub fn decode_bytes(bytes: &[u8], subsystems: &[Subsystem]) -> (AdcpConfiguration, DecodeReport) {
    let mut report = DecodeReport::default();
    let mut lines = Vec::new();
    let raw_lines = bytes
        .split(|&b| b == b'\n')
        .enumerate()
        .flat_map(|(n, line)| line.split(|&b| b == b'\r').map(move |part| (n, part)));
    for (n, raw) in raw_lines {
        match AsciiStr::from_ascii(raw) {
            Ok(line) => {
                let line = line.as_str().trim();
                if !line.is_empty() {
                    lines.push((n + 1, line));
                }
            }
            Err(e) => report.push(DecodeIssue {
                line: n + 1,
                mnemonic: None,
                index: None,
                kind: IssueKind::NotAscii,
                detail: Error::NotAscii(e.to_string()).to_string(),
            }),
        }
    }
    decode_lines(&lines, subsystems, report)
}

fn decode_lines(
    lines: &[(usize, &str)],
    subsystems: &[Subsystem],
    mut report: DecodeReport,
) -> (AdcpConfiguration, DecodeReport) {
    let mut config = build_structure(lines, subsystems, &mut report);
    apply_lines(&mut config, lines, &mut report);
    debug!(
        configurations = config.len(),
        issues = report.issues.len(),
        "decoded configuration dump"
    );
    (config, report)
}

/// Apply the values of a dump to an existing configuration.
///
/// The configuration's structure is left alone: any `CEPO` line is ignored
/// and indices that do not exist yet are reported as unknown.
pub fn apply(config: &mut AdcpConfiguration, text: &str) -> DecodeReport {
    let mut report = DecodeReport::default();
    apply_lines(config, &split_lines(text), &mut report);
    report
}

/// Pass 1: materialize one configuration per CEPO position.
fn build_structure(
    lines: &[(usize, &str)],
    subsystems: &[Subsystem],
    report: &mut DecodeReport,
) -> AdcpConfiguration {
    let cepo = lines.iter().find_map(|&(n, line)| match split_mnemonic(line)? {
        (Mnemonic::Device(DeviceCommand::Cepo), rest) => Some((n, rest)),
        _ => None,
    });
    let Some((line, value)) = cepo else {
        debug!(count = subsystems.len(), "no CEPO line, using subsystem list");
        return AdcpConfiguration::from_subsystems(subsystems);
    };
    let codes = parse_cepo(value);
    if codes.is_empty() {
        warn!(line, "empty CEPO line, using subsystem list");
        return AdcpConfiguration::from_subsystems(subsystems);
    }

    let mut config = AdcpConfiguration::new();
    for c in codes {
        let subsystem = match SubsystemCode::try_from(c) {
            Ok(code) => {
                let found = subsystems.iter().find(|ss| ss.code() == code).copied();
                if found.is_none() {
                    report.push(DecodeIssue {
                        line,
                        mnemonic: Some("CEPO"),
                        index: Some(config.len() as u16),
                        kind: IssueKind::UnknownSubsystem,
                        detail: format!("subsystem '{c}' is not installed"),
                    });
                }
                found
            }
            Err(error) => {
                report.push_error(line, "CEPO", Some(config.len() as u16), error);
                None
            }
        };
        config.push(subsystem);
    }
    config
}

/// Pass 2: apply every value line.
fn apply_lines(config: &mut AdcpConfiguration, lines: &[(usize, &str)], report: &mut DecodeReport) {
    for &(n, line) in lines {
        match split_mnemonic(line) {
            None => trace!(line = n, text = line, "unrecognized line"),
            Some((Mnemonic::Device(DeviceCommand::Cepo), _)) => {}
            Some((Mnemonic::Device(device), rest)) => {
                if let Err(error) = config.device.apply(device, rest.trim()) {
                    report.push_error(n, device.mnemonic(), None, error);
                }
            }
            Some((Mnemonic::Subsystem(command), rest)) => {
                apply_indexed(config, command, n, rest, report);
            }
        }
    }
}

fn apply_indexed(
    config: &mut AdcpConfiguration,
    command: Command,
    line: usize,
    rest: &str,
    report: &mut DecodeReport,
) {
    let mnemonic = command.mnemonic();
    let decoded = decode_indexed_detailed(rest);
    for fragment in &decoded.rejected {
        report.push(DecodeIssue {
            line,
            mnemonic: Some(mnemonic),
            index: None,
            kind: IssueKind::ParseFailure,
            detail: format!("bad index fragment '{}'", fragment.trim()),
        });
    }
    if decoded.values.is_empty() && decoded.rejected.is_empty() {
        report.push(DecodeIssue {
            line,
            mnemonic: Some(mnemonic),
            index: None,
            kind: IssueKind::StructuralMismatch,
            detail: "no indexed values".to_string(),
        });
    }
    for (index, value) in decoded.values {
        let Some(commands) = config.get_mut(index) else {
            report.push(DecodeIssue {
                line,
                mnemonic: Some(mnemonic),
                index: Some(index),
                kind: IssueKind::UnknownIndex,
                detail: format!("no configuration {index}"),
            });
            continue;
        };
        for error in commands.apply(command, &value) {
            report.push_error(line, mnemonic, Some(index), error);
        }
    }
}
