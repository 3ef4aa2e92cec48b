//! Bracket-indexed `CSHOW` lines: `CWPBN[0] 30 [1] 40`.

use std::collections::BTreeMap;

/// Result of splitting one indexed line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedValues {
    /// Value text keyed by CEPO index, trimmed.
    pub values: BTreeMap<u16, String>,
    /// Fragments skipped because the index was not a number or the brackets
    /// did not pair up.
    pub rejected: Vec<String>,
}

/// Split `MNEMONIC[idx] value [idx] value ...` into `idx -> value`.
///
/// Text before the first `[` is the mnemonic and is dropped. A fragment whose
/// index does not parse is skipped without affecting the others. If an index
/// appears twice the later value wins.
pub fn decode_indexed(line: &str) -> BTreeMap<u16, String> {
    decode_indexed_detailed(line).values
}

/// [`decode_indexed`], also returning the skipped fragments.
pub fn decode_indexed_detailed(line: &str) -> IndexedValues {
    let mut out = IndexedValues::default();
    for fragment in line.split('[').skip(1) {
        let mut parts = fragment.split(']');
        let (Some(index), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            out.rejected.push(fragment.to_string());
            continue;
        };
        match index.trim().parse::<u16>() {
            Ok(index) => {
                out.values.insert(index, value.trim().to_string());
            }
            Err(_) => out.rejected.push(fragment.to_string()),
        }
    }
    out
}

/// Subsystem code characters of a CEPO value, one per ping-order position.
///
/// `CEPO 2233` pings the first subsystem twice, then the second twice.
pub fn parse_cepo(value: &str) -> Vec<char> {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
