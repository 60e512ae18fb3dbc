/// Set-to-regex generator: turns a set of code points into a compact
/// JavaScript regular expression source (no `u` flag, so astral code points
/// are matched as surrogate pairs).
use std::collections::BTreeMap;

use super::writer::{push_unit_escape, surrogate_pair};

const HIGH_SURROGATES: (u32, u32) = (0xD800, 0xDBFF);
const LOW_SURROGATES: (u32, u32) = (0xDC00, 0xDFFF);
const MAX_BMP: u32 = 0xFFFF;
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Sorted, non-overlapping, non-adjacent inclusive ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CodePointSet {
    ranges: Vec<(u32, u32)>,
}

impl CodePointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values above U+10FFFF are not code points and are dropped.
    pub fn from_code_points(code_points: &[u32]) -> Self {
        let mut sorted: Vec<u32> = code_points
            .iter()
            .copied()
            .filter(|cp| *cp <= MAX_CODE_POINT)
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        let mut set = Self::new();
        for cp in sorted {
            set.push_range(cp, cp);
        }
        set
    }

    /// Add `start..=end`; ranges must arrive in ascending order.
    fn push_range(&mut self, start: u32, end: u32) {
        if let Some(last) = self.ranges.last_mut() {
            if start <= last.1.saturating_add(1) {
                last.1 = last.1.max(end);
                return;
            }
        }
        self.ranges.push((start, end));
    }

    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The part of this set inside `lo..=hi`.
    fn within(&self, lo: u32, hi: u32) -> CodePointSet {
        let mut out = CodePointSet::new();
        for &(s, e) in &self.ranges {
            let (s, e) = (s.max(lo), e.min(hi));
            if s <= e {
                out.push_range(s, e);
            }
        }
        out
    }

    /// This set minus `lo..=hi`.
    fn without(&self, lo: u32, hi: u32) -> CodePointSet {
        let mut out = CodePointSet::new();
        for &(s, e) in &self.ranges {
            if e < lo || s > hi {
                out.push_range(s, e);
                continue;
            }
            if s < lo {
                out.push_range(s, lo - 1);
            }
            if e > hi {
                out.push_range(hi + 1, e);
            }
        }
        out
    }
}

/// Build the regex source matching exactly the given code points.
pub fn to_pattern(code_points: &[u32]) -> String {
    let set = CodePointSet::from_code_points(code_points);
    if set.is_empty() {
        return "[]".into();
    }

    let bmp = set
        .within(0, MAX_BMP)
        .without(HIGH_SURROGATES.0, LOW_SURROGATES.1);
    let lone_high = set.within(HIGH_SURROGATES.0, HIGH_SURROGATES.1);
    let lone_low = set.within(LOW_SURROGATES.0, LOW_SURROGATES.1);
    let astral = set.within(MAX_BMP + 1, MAX_CODE_POINT);

    let mut parts = Vec::new();
    if !bmp.is_empty() {
        parts.push(class(&bmp));
    }
    if !astral.is_empty() {
        parts.extend(surrogate_alternatives(&astral));
    }
    if !lone_high.is_empty() {
        parts.push(format!("{}(?![\\uDC00-\\uDFFF])", class(&lone_high)));
    }
    if !lone_low.is_empty() {
        parts.push(format!("(?:[^\\uD800-\\uDBFF]|^){}", class(&lone_low)));
    }
    parts.join("|")
}

/// One alternative per distinct low-surrogate set, with all high surrogates
/// that share it merged into one class.
fn surrogate_alternatives(astral: &CodePointSet) -> Vec<String> {
    let mut lows_by_high: BTreeMap<u32, CodePointSet> = BTreeMap::new();
    for &(start, end) in astral.ranges() {
        let (hs, ls) = surrogate_pair(start);
        let (he, le) = surrogate_pair(end);
        for high in hs..=he {
            let lo = if high == hs { ls } else { LOW_SURROGATES.0 };
            let hi = if high == he { le } else { LOW_SURROGATES.1 };
            lows_by_high.entry(high).or_default().push_range(lo, hi);
        }
    }

    let mut highs_by_lows: BTreeMap<CodePointSet, CodePointSet> = BTreeMap::new();
    for (high, lows) in lows_by_high {
        highs_by_lows.entry(lows).or_default().push_range(high, high);
    }

    let mut alternatives: Vec<(u32, String)> = highs_by_lows
        .into_iter()
        .map(|(lows, highs)| {
            let first = highs.ranges()[0].0;
            (first, format!("{}{}", class(&highs), class(&lows)))
        })
        .collect();
    alternatives.sort();
    alternatives.into_iter().map(|(_, alt)| alt).collect()
}

/// A single escaped character, or a bracketed class.
fn class(set: &CodePointSet) -> String {
    let ranges = set.ranges();
    if let [(s, e)] = ranges {
        if s == e {
            let mut out = String::new();
            push_atom(&mut out, *s);
            return out;
        }
    }
    let mut out = String::from("[");
    for &(s, e) in ranges {
        push_atom(&mut out, s);
        if e == s + 1 {
            push_atom(&mut out, e);
        } else if e > s {
            out.push('-');
            push_atom(&mut out, e);
        }
    }
    out.push(']');
    out
}

/// Append a BMP code unit, escaped for use inside or outside a class.
fn push_atom(out: &mut String, unit: u32) {
    match unit {
        0x30..=0x39 | 0x41..=0x5A | 0x61..=0x7A => out.push(unit as u8 as char),
        0x20..=0x7E => {
            let c = unit as u8 as char;
            if "\\^$.|?*+()[]{}/-".contains(c) {
                out.push('\\');
            }
            out.push(c);
        }
        _ => push_unit_escape(out, unit),
    }
}
