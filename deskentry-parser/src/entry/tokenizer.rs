//! Line tokenizer
//!
//!     Desktop entry files are read one logical line at a time. A logical line is not the same
//!     as a physical one: a backslash in front of a line terminator glues two physical lines
//!     together, a double quote suspends line termination until the matching quote, and a `#`
//!     outside quotes cuts the rest of the line off as a comment.
//!
//!     The scanner is a single pass over a byte buffer. Every byte is looked up in a 256-entry
//!     class table, so the hot loop only stops on the handful of bytes that can change state.
//!     It never fails: malformed input simply produces odd lines, and the callers decide what
//!     to make of them.
//!
//! Reuse
//!
//!     The same primitive runs twice over different byte ranges. The section splitter runs it
//!     over the whole document to find `[Header]` lines, and each section runs it again over
//!     its own bytes to find `key=value` pairs.
//!
//!     See [read_line] for the exact rules.

use std::ops::Range;

const SPACE: u8 = 0x1;
const SPECIAL: u8 = 0x2;

/// Byte classes. Space: `\t`, `\n`, `\r`, ` `. Special: `\n`, `\r`, `"`, `;`, `=`, `\`, `#`.
static BYTE_CLASS: [u8; 256] = build_class_table();

const fn build_class_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    table[b'\t' as usize] = SPACE;
    table[b'\n' as usize] = SPACE | SPECIAL;
    table[b'\r' as usize] = SPACE | SPECIAL;
    table[b' ' as usize] = SPACE;
    table[b'"' as usize] = SPECIAL;
    table[b'#' as usize] = SPECIAL;
    table[b';' as usize] = SPECIAL;
    table[b'=' as usize] = SPECIAL;
    table[b'\\' as usize] = SPECIAL;
    table
}

#[inline]
fn is_space(byte: u8) -> bool {
    BYTE_CLASS[byte as usize] & SPACE != 0
}

#[inline]
fn is_special(byte: u8) -> bool {
    BYTE_CLASS[byte as usize] & SPECIAL != 0
}

/// One logical line found by the tokenizer.
///
/// Offsets are absolute positions into the buffer that was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Line {
    /// Offset of the first byte of the line
    pub start: usize,
    /// Number of bytes in the line, terminator excluded
    pub len: usize,
    /// Offset of the first `=` found outside quotes, if any
    pub equals: Option<usize>,
}

impl Line {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The raw bytes of this line within `data`.
    pub fn bytes<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.range()]
    }

    /// Whether the line opens a section (`[Name]`).
    pub fn is_header(&self, data: &[u8]) -> bool {
        data.get(self.start) == Some(&b'[')
    }

    /// Splits the line at its recorded `=` into trimmed key and value bytes.
    pub fn key_value<'a>(&self, data: &'a [u8]) -> Option<(&'a [u8], &'a [u8])> {
        let equals = self.equals?;
        let key = data[self.start..equals].trim_ascii();
        let value = data[equals + 1..self.start + self.len].trim_ascii();
        Some((key, value))
    }
}

/// Reads the next non-empty logical line from `data`, starting at `*pos`.
///
/// On return `*pos` points just past the consumed bytes (the terminator itself is left for the
/// next call, which skips it as leading whitespace). Returns `None` once the input is exhausted.
///
/// Rules, in scan order:
/// - leading spaces, tabs and line terminators are skipped
/// - `=` outside quotes records its offset, first occurrence only
/// - LF/CR as the very first byte of the line moves the line start past it; anywhere else it
///   ends the line unless inside quotes
/// - `\` swallows the next byte, and the one after that too when the pair is CR/LF or LF/CR,
///   which is how a line continues onto the next physical line
/// - `"` toggles quoting
/// - `#` as the first byte skips up to the next terminator; mid-line outside quotes it ends
///   the line there
/// - `;` is left alone, lists are a concern of the value layer
pub fn read_line(data: &[u8], pos: &mut usize) -> Option<Line> {
    let len = data.len();
    let mut in_quotes = false;
    let mut equals = None;

    let mut start = (*pos).min(len);
    while start < len && is_space(data[start]) {
        start += 1;
    }

    let mut i = start;
    'scan: while i < len {
        while !is_special(data[i]) {
            i += 1;
            if i == len {
                break 'scan;
            }
        }

        let byte = data[i];
        i += 1;
        match byte {
            b'=' => {
                if !in_quotes && equals.is_none() {
                    equals = Some(i - 1);
                }
            }
            b'\n' | b'\r' => {
                if i == start + 1 {
                    start += 1;
                } else if !in_quotes {
                    i -= 1;
                    break 'scan;
                }
            }
            b'\\' => {
                if i < len {
                    let escaped = data[i];
                    i += 1;
                    if i < len {
                        let next = data[i];
                        if (escaped == b'\n' && next == b'\r') || (escaped == b'\r' && next == b'\n')
                        {
                            i += 1;
                        }
                    }
                }
            }
            b'"' => in_quotes = !in_quotes,
            b';' => {}
            b'#' => {
                if i == start + 1 {
                    while i < len && data[i] != b'\n' && data[i] != b'\r' {
                        i += 1;
                    }
                    start = i;
                } else if !in_quotes {
                    i -= 1;
                    break 'scan;
                }
            }
            _ => unreachable!("byte class table marks only handled bytes as special"),
        }
    }

    *pos = i;
    let line_len = i - start;
    (line_len > 0).then_some(Line {
        start,
        len: line_len,
        equals,
    })
}

/// Iterator over the logical lines of a buffer.
#[derive(Debug, Clone)]
pub struct LineReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Iterator for LineReader<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        read_line(self.data, &mut self.pos)
    }
}

/// Convenience: collects every logical line of `data` as lossy UTF-8 strings.
pub fn lines_as_strings(data: &[u8]) -> Vec<String> {
    LineReader::new(data)
        .map(|line| String::from_utf8_lossy(line.bytes(data)).into_owned())
        .collect()
}
