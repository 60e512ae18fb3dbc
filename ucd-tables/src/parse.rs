/// Parsers for the semicolon-separated UCD text files. Each one turns a file
/// into the category map shape the emitter consumes.
use std::collections::BTreeMap;

use crate::emit_js::BIDI_CLASS_PREFIX;
use crate::model::{code_point_map, folding_map, CategoryMap};
use crate::util::{append, range};

const MAX_CODE_POINT: u32 = 0x10FFFF;

#[derive(Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("invalid code point '{0}'")]
    InvalidCodePoint(String),
    #[error("expected at least {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },
    #[error("range end without a matching start")]
    UnmatchedRangeEnd,
    #[error("range start is never closed")]
    UnterminatedRange,
    #[error("range {0:04X}..{1:04X} ends before it starts")]
    ReversedRange(u32, u32),
    #[error("unknown bracket type '{0}'")]
    UnknownBracketType(String),
    #[error("code point U+{0:04X} is not a scalar value")]
    NotAScalar(u32),
}

impl ParseErrorKind {
    fn at(self, line: usize) -> ParseError {
        ParseError { line, kind: self }
    }
}

/// Non-comment lines as `(line number, trimmed fields)`.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let data = line.split('#').next().unwrap_or("").trim();
        if data.is_empty() {
            return None;
        }
        Some((i + 1, data.split(';').map(str::trim).collect()))
    })
}

fn require_fields(fields: &[&str], expected: usize, line: usize) -> Result<(), ParseError> {
    if fields.len() < expected {
        return Err(ParseErrorKind::MissingFields {
            expected,
            found: fields.len(),
        }
        .at(line));
    }
    Ok(())
}

fn parse_code_point(s: &str, line: usize) -> Result<u32, ParseError> {
    u32::from_str_radix(s, 16)
        .ok()
        .filter(|cp| *cp <= MAX_CODE_POINT)
        .ok_or_else(|| ParseErrorKind::InvalidCodePoint(s.to_string()).at(line))
}

/// `0041` or `0041..005A`.
fn parse_range(s: &str, line: usize) -> Result<(u32, u32), ParseError> {
    match s.split_once("..") {
        Some((start, end)) => {
            let (start, end) = (parse_code_point(start, line)?, parse_code_point(end, line)?);
            if end < start {
                return Err(ParseErrorKind::ReversedRange(start, end).at(line));
            }
            Ok((start, end))
        }
        None => {
            let cp = parse_code_point(s, line)?;
            Ok((cp, cp))
        }
    }
}

/// General categories and bidi classes from `UnicodeData.txt`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnicodeData {
    /// Two-letter categories plus `Cn`, and the derived groups
    /// `L LC M N P S Z C`.
    pub categories: BTreeMap<String, Vec<u32>>,
    /// Bidi class value -> code points.
    pub bidi_classes: BTreeMap<String, Vec<u32>>,
}

impl UnicodeData {
    /// One heterogeneous batch: bidi classes are keyed `Bidi_<class>`.
    pub fn into_category_map(self) -> CategoryMap {
        let mut map = self.categories;
        for (class, cps) in self.bidi_classes {
            map.insert(format!("{BIDI_CLASS_PREFIX}{class}"), cps);
        }
        code_point_map(map)
    }
}

pub fn parse_unicode_data(text: &str) -> Result<UnicodeData, ParseError> {
    let mut data = UnicodeData::default();
    let mut assigned = vec![false; MAX_CODE_POINT as usize + 1];
    let mut range_start: Option<(usize, u32)> = None;

    for (line, fields) in data_lines(text) {
        require_fields(&fields, 5, line)?;
        let cp = parse_code_point(fields[0], line)?;
        let name = fields[1];
        let (category, bidi) = (fields[2], fields[4]);

        let cps = if name.ends_with(", First>") {
            if let Some((open, _)) = range_start {
                return Err(ParseErrorKind::UnterminatedRange.at(open));
            }
            range_start = Some((line, cp));
            continue;
        } else if name.ends_with(", Last>") {
            let (_, start) = range_start
                .take()
                .ok_or_else(|| ParseErrorKind::UnmatchedRangeEnd.at(line))?;
            if cp < start {
                return Err(ParseErrorKind::ReversedRange(start, cp).at(line));
            }
            range(start, cp)
        } else {
            vec![cp]
        };

        for &cp in &cps {
            assigned[cp as usize] = true;
            append(&mut data.categories, category.to_string(), cp);
            append(&mut data.bidi_classes, bidi.to_string(), cp);
        }
    }
    if let Some((line, _)) = range_start {
        return Err(ParseErrorKind::UnterminatedRange.at(line));
    }

    let unassigned: Vec<u32> = (0..=MAX_CODE_POINT)
        .filter(|cp| !assigned[*cp as usize])
        .collect();
    if !unassigned.is_empty() {
        data.categories.insert("Cn".into(), unassigned);
    }

    let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for (category, cps) in &data.categories {
        let Some(major) = category.get(..1) else {
            continue;
        };
        groups
            .entry(major.to_string())
            .or_default()
            .extend(cps.iter().copied());
        if matches!(category.as_str(), "Lu" | "Ll" | "Lt") {
            groups.entry("LC".into()).or_default().extend(cps.iter().copied());
        }
    }
    for (group, mut cps) in groups {
        cps.sort_unstable();
        data.categories.insert(group, cps);
    }

    Ok(data)
}

/// Generic `range ; value` files: Scripts, Blocks, PropList,
/// DerivedCoreProperties. Extra value fields and spaces become `_`.
pub fn parse_property_ranges(text: &str) -> Result<BTreeMap<String, Vec<u32>>, ParseError> {
    let mut map = BTreeMap::new();
    for (line, fields) in data_lines(text) {
        require_fields(&fields, 2, line)?;
        let (start, end) = parse_range(fields[0], line)?;
        let value = fields[1..].join("_").replace(' ', "_");
        for cp in start..=end {
            append(&mut map, value.clone(), cp);
        }
    }
    for cps in map.values_mut() {
        cps.sort_unstable();
    }
    Ok(map)
}

/// `CaseFolding.txt`, keyed by status (`C`, `F`, `S`, `T`).
pub fn parse_case_folding(text: &str) -> Result<CategoryMap, ParseError> {
    let mut map: BTreeMap<String, BTreeMap<u32, Vec<u32>>> = BTreeMap::new();
    for (line, fields) in data_lines(text) {
        require_fields(&fields, 3, line)?;
        let from = parse_code_point(fields[0], line)?;
        let to = fields[2]
            .split_whitespace()
            .map(|s| parse_code_point(s, line))
            .collect::<Result<Vec<_>, _>>()?;
        map.entry(fields[1].to_string())
            .or_default()
            .insert(from, to);
    }
    Ok(folding_map(map))
}

/// `BidiMirroring.txt`, keyed by the mirrored glyph itself.
pub fn parse_bidi_mirroring(text: &str) -> Result<CategoryMap, ParseError> {
    let mut map = BTreeMap::new();
    for (line, fields) in data_lines(text) {
        require_fields(&fields, 2, line)?;
        let cp = parse_code_point(fields[0], line)?;
        let mirror = parse_code_point(fields[1], line)?;
        let glyph = char::from_u32(mirror).ok_or_else(|| ParseErrorKind::NotAScalar(mirror).at(line))?;
        append(&mut map, glyph.to_string(), cp);
    }
    Ok(code_point_map(map))
}

/// `BidiBrackets.txt`, keyed `Open` / `Close` by bracket type.
pub fn parse_bidi_brackets(text: &str) -> Result<CategoryMap, ParseError> {
    let mut map = BTreeMap::new();
    for (line, fields) in data_lines(text) {
        require_fields(&fields, 3, line)?;
        let cp = parse_code_point(fields[0], line)?;
        let kind = match fields[2] {
            "o" => "Open",
            "c" => "Close",
            other => return Err(ParseErrorKind::UnknownBracketType(other.to_string()).at(line)),
        };
        append(&mut map, kind.to_string(), cp);
    }
    Ok(code_point_map(map))
}
