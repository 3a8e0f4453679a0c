//! Section splitting
//!
//!     The first pass over a document only looks for `[Section Name]` header lines. Everything
//!     between one header and the next (header line included) is handed to the section as an
//!     opaque byte range; the key/value lines inside are not looked at until someone asks for
//!     a value from that section.
//!
//!     A header without its closing bracket is a format error, but not a fatal one: the name
//!     is taken from whatever follows the `[` and parsing carries on. Lines before the first
//!     header belong to no section and are dropped.

use std::ops::Range;

use super::tokenizer::LineReader;

/// A section found by the splitter, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RawSection {
    pub name: String,
    /// Byte range in the document, starting at the header line
    pub range: Range<usize>,
}

/// Result of splitting a document into sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSplit {
    /// Sections in document order, duplicates included
    pub sections: Vec<RawSection>,
    /// Header lines that were missing their closing bracket
    pub malformed_headers: Vec<String>,
}

impl SectionSplit {
    pub fn format_ok(&self) -> bool {
        self.malformed_headers.is_empty()
    }
}

/// Splits `data` into named byte ranges, one per `[Header]`.
pub fn split_sections(data: &[u8]) -> SectionSplit {
    let mut split = SectionSplit::default();
    let mut open: Option<(String, usize)> = None;

    for line in LineReader::new(data) {
        if !line.is_header(data) {
            continue;
        }

        if let Some((name, start)) = open.take() {
            split.sections.push(RawSection {
                name,
                range: start..line.start,
            });
        }

        let text = line.bytes(data);
        let name_bytes = match text.iter().position(|&b| b == b']') {
            Some(close) => &text[1..close],
            None => {
                let header = String::from_utf8_lossy(text).into_owned();
                tracing::warn!(line = %header, "bad desktop file format: unterminated section header");
                split.malformed_headers.push(header);
                &text[1..]
            }
        };
        let name = String::from_utf8_lossy(name_bytes.trim_ascii()).into_owned();

        if name.is_empty() {
            tracing::debug!(offset = line.start, "ignoring section with empty name");
        } else {
            open = Some((name, line.start));
        }
    }

    if let Some((name, start)) = open {
        split.sections.push(RawSection {
            name,
            range: start..data.len(),
        });
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(split: &SectionSplit) -> Vec<&str> {
        split.sections.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_single_section() {
        let data = b"[Desktop Entry]\nName=Foo\n";
        let split = split_sections(data);
        assert!(split.format_ok());
        assert_eq!(names(&split), vec!["Desktop Entry"]);
        assert_eq!(split.sections[0].range, 0..data.len());
    }

    #[test]
    fn test_ranges_end_before_next_header() {
        let data = b"[A]\nx=1\n\n[B]\ny=2";
        let split = split_sections(data);
        assert_eq!(names(&split), vec!["A", "B"]);
        assert_eq!(&data[split.sections[0].range.clone()], b"[A]\nx=1\n\n");
        assert_eq!(&data[split.sections[1].range.clone()], b"[B]\ny=2");
    }

    #[test]
    fn test_preamble_is_discarded() {
        let data = b"# A. Example\nstray=1\n[Main]\nk=v\n";
        let split = split_sections(data);
        assert!(split.format_ok());
        assert_eq!(names(&split), vec!["Main"]);
        assert_eq!(split.sections[0].range.start, 21);
    }

    #[test]
    fn test_header_name_is_trimmed() {
        let split = split_sections(b"[  Spaced Name  ]\n");
        assert_eq!(names(&split), vec!["Spaced Name"]);
    }

    #[test]
    fn test_text_after_closing_bracket_is_ignored() {
        let split = split_sections(b"[Main] trailing junk\n");
        assert!(split.format_ok());
        assert_eq!(names(&split), vec!["Main"]);
    }

    #[test]
    fn test_unterminated_header() {
        let split = split_sections(b"[Unterminated\nk=v\n[Next]\n");
        assert!(!split.format_ok());
        assert_eq!(split.malformed_headers, vec!["[Unterminated".to_string()]);
        assert_eq!(names(&split), vec!["Unterminated", "Next"]);
    }

    #[test]
    fn test_bracket_on_following_line_does_not_close_header() {
        let split = split_sections(b"[Open\nkey=]\n");
        assert!(!split.format_ok());
        assert_eq!(names(&split), vec!["Open"]);
    }

    #[test]
    fn test_empty_name_opens_nothing() {
        let split = split_sections(b"[]\nk=v\n[Real]\n");
        assert!(split.format_ok());
        assert_eq!(names(&split), vec!["Real"]);
    }

    #[test]
    fn test_duplicate_headers_are_all_reported() {
        let split = split_sections(b"[A]\nx=1\n[A]\nx=2\n");
        assert_eq!(names(&split), vec!["A", "A"]);
    }

    #[test]
    fn test_no_sections() {
        let split = split_sections(b"# nothing here\n");
        assert!(split.format_ok());
        assert!(split.sections.is_empty());
    }
}
