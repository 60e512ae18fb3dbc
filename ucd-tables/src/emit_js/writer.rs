/// Builder for the JavaScript literals written into the generated modules.
///
/// Output is pure ASCII: anything outside printable ASCII is escaped per
/// UTF-16 code unit, so surrogate code points (which have no `char`) can be
/// written too.
use std::fmt::Write as _;

pub struct LiteralWriter {
    buf: String,
}

impl Default for LiteralWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralWriter {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Start a CommonJS module: `module.exports=`.
    pub fn module_exports() -> Self {
        let mut w = Self::new();
        w.raw("module.exports=");
        w
    }

    /// Append text verbatim.
    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append an integer.
    pub fn number(&mut self, n: u32) {
        let _ = write!(self.buf, "{n}");
    }

    /// Append `[a,b,c]`.
    pub fn number_array(&mut self, values: &[u32]) {
        self.buf.push('[');
        for (i, n) in values.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.number(*n);
        }
        self.buf.push(']');
    }

    /// Append a double-quoted string made of the given code points.
    pub fn string_of<I: IntoIterator<Item = u32>>(&mut self, code_points: I) {
        self.buf.push('"');
        for cp in code_points {
            push_escaped(&mut self.buf, cp);
        }
        self.buf.push('"');
    }

    /// Append a double-quoted string.
    pub fn string(&mut self, s: &str) {
        self.string_of(s.chars().map(u32::from));
    }

    /// Append `["a","b"]`, one single-character string per code point.
    pub fn symbol_array(&mut self, code_points: &[u32]) {
        self.buf.push('[');
        for (i, cp) in code_points.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.string_of([*cp]);
        }
        self.buf.push(']');
    }

    /// Consume and return the built source.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Split an astral code point into its UTF-16 surrogate pair.
pub fn surrogate_pair(cp: u32) -> (u32, u32) {
    let offset = cp - 0x10000;
    (0xD800 + (offset >> 10), 0xDC00 + (offset & 0x3FF))
}

/// Append `\xHH` or `\uHHHH` for a single UTF-16 code unit.
pub fn push_unit_escape(out: &mut String, unit: u32) {
    if unit < 0x100 {
        let _ = write!(out, "\\x{unit:02X}");
    } else {
        let _ = write!(out, "\\u{unit:04X}");
    }
}

/// Append one code point to the body of a double-quoted JS string.
fn push_escaped(out: &mut String, cp: u32) {
    match cp {
        0x22 => out.push_str("\\\""),
        0x5C => out.push_str("\\\\"),
        0x08 => out.push_str("\\b"),
        0x09 => out.push_str("\\t"),
        0x0A => out.push_str("\\n"),
        0x0B => out.push_str("\\v"),
        0x0C => out.push_str("\\f"),
        0x0D => out.push_str("\\r"),
        0x20..=0x7E => out.push(cp as u8 as char),
        0x10000.. => {
            let (hi, lo) = surrogate_pair(cp);
            push_unit_escape(out, hi);
            push_unit_escape(out, lo);
        }
        _ => push_unit_escape(out, cp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_of(cps: &[u32]) -> String {
        let mut w = LiteralWriter::new();
        w.string_of(cps.iter().copied());
        w.finish()
    }

    #[test]
    fn test_number_array() {
        let mut w = LiteralWriter::module_exports();
        w.number_array(&[65, 66]);
        assert_eq!(w.finish(), "module.exports=[65,66]");
    }

    #[test]
    fn test_empty_array() {
        let mut w = LiteralWriter::new();
        w.number_array(&[]);
        assert_eq!(w.finish(), "[]");
    }

    #[test]
    fn test_symbol_array() {
        let mut w = LiteralWriter::new();
        w.symbol_array(&[65, 66]);
        assert_eq!(w.finish(), r#"["A","B"]"#);
    }

    #[test]
    fn test_escape_ascii_specials() {
        assert_eq!(string_of(&[0x22]), r#""\"""#);
        assert_eq!(string_of(&[0x5C]), r#""\\""#);
        assert_eq!(string_of(&[0x0A, 0x09]), r#""\n\t""#);
        assert_eq!(string_of(&[0x00]), r#""\x00""#);
        assert_eq!(string_of(&[0x7F]), r#""\x7F""#);
    }

    #[test]
    fn test_escape_non_ascii() {
        assert_eq!(string_of(&[0xE9]), r#""\xE9""#);
        assert_eq!(string_of(&[0x2028]), r#""\u2028""#);
        assert_eq!(string_of(&[0xD800]), r#""\uD800""#);
        assert_eq!(string_of(&[0x1F4A9]), r#""\uD83D\uDCA9""#);
    }

    #[test]
    fn test_string_joins_code_points() {
        let mut w = LiteralWriter::new();
        w.string("ss");
        assert_eq!(w.finish(), r#""ss""#);
    }

    #[test]
    fn test_surrogate_pair() {
        assert_eq!(surrogate_pair(0x10000), (0xD800, 0xDC00));
        assert_eq!(surrogate_pair(0x10FFFF), (0xDBFF, 0xDFFF));
    }
}
