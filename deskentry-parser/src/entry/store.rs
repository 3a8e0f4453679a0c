//! Section store
//!
//!     A section starts out as the raw bytes the splitter cut out of the document and is
//!     parsed into an ordered key map the first time anything looks inside it. The transition
//!     happens at most once; afterwards the raw bytes are gone.
//!
//!     Values inside the map go through a second, independent round of laziness (see
//!     [Slot](super::value::Slot)).

use indexmap::IndexMap;

use super::tokenizer::LineReader;
use super::value::{Slot, ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SectionState {
    Raw(Vec<u8>),
    Parsed(IndexMap<String, Slot>),
}

/// Result of looking at a section without the right to parse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Peek<T> {
    Ready(T),
    /// The section or value still has to be materialized
    NeedsParse,
}

/// One named section of a desktop entry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    state: SectionState,
}

impl Section {
    /// A section backed by unparsed bytes (header line included).
    pub fn from_raw(name: impl Into<String>, raw: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            state: SectionState::Raw(raw),
        }
    }

    /// An empty, already parsed section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: SectionState::Parsed(IndexMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self.state, SectionState::Parsed(_))
    }

    /// Parses the raw bytes if that has not happened yet and returns the key map.
    pub fn ensure_parsed(&mut self) -> &mut IndexMap<String, Slot> {
        if let SectionState::Raw(raw) = &self.state {
            let values = parse_section_bytes(raw);
            tracing::trace!(section = %self.name, keys = values.len(), "parsed section");
            self.state = SectionState::Parsed(values);
        }
        match &mut self.state {
            SectionState::Parsed(values) => values,
            SectionState::Raw(_) => unreachable!("section was parsed above"),
        }
    }

    pub fn contains(&mut self, key: &str) -> bool {
        self.ensure_parsed().contains_key(key)
    }

    /// Looks up `key`, coercing its value on first read.
    pub fn lookup(&mut self, key: &str) -> Option<(ValueType, String)> {
        self.ensure_parsed().get_mut(key).map(Slot::materialize)
    }

    /// Looks up `key`, answering `(NotExisted, default)` when it is absent.
    pub fn get(&mut self, key: &str, default: &str) -> (ValueType, String) {
        self.lookup(key)
            .unwrap_or_else(|| (ValueType::NotExisted, default.to_string()))
    }

    /// Inserts or overwrites `key` as a `String` value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set_typed(key, ValueType::String, value);
    }

    pub fn set_typed(&mut self, key: impl Into<String>, ty: ValueType, value: impl Into<String>) {
        let slot = match ty {
            ValueType::Unparsed | ValueType::NotExisted => Slot::Unparsed(value.into()),
            ty => Slot::Typed(ty, value.into()),
        };
        self.ensure_parsed().insert(key.into(), slot);
    }

    /// Keys in first-definition order.
    pub fn keys(&mut self) -> Vec<String> {
        self.ensure_parsed().keys().cloned().collect()
    }

    /// Whether `key` exists, if that can be answered without parsing.
    pub fn peek_contains(&self, key: &str) -> Peek<bool> {
        match &self.state {
            SectionState::Parsed(values) => Peek::Ready(values.contains_key(key)),
            SectionState::Raw(_) => Peek::NeedsParse,
        }
    }

    /// Keys in first-definition order, if the section is already parsed.
    pub fn peek_keys(&self) -> Peek<Vec<String>> {
        match &self.state {
            SectionState::Parsed(values) => Peek::Ready(values.keys().cloned().collect()),
            SectionState::Raw(_) => Peek::NeedsParse,
        }
    }

    /// The typed value of `key`, if that can be answered without mutating anything.
    pub fn peek(&self, key: &str) -> Peek<Option<(ValueType, String)>> {
        let SectionState::Parsed(values) = &self.state else {
            return Peek::NeedsParse;
        };
        match values.get(key) {
            None => Peek::Ready(None),
            Some(slot) => match slot.typed() {
                Some(typed) => Peek::Ready(Some(typed)),
                None => Peek::NeedsParse,
            },
        }
    }
}

/// Turns a section's raw bytes into its key map.
///
/// Header lines are skipped, lines without `=` are ignored and a repeated key overwrites the
/// earlier value while keeping its original position.
fn parse_section_bytes(raw: &[u8]) -> IndexMap<String, Slot> {
    let mut values = IndexMap::new();
    for line in LineReader::new(raw) {
        if line.is_header(raw) {
            continue;
        }
        let Some((key, value)) = line.key_value(raw) else {
            continue;
        };
        let key = String::from_utf8_lossy(key).into_owned();
        let value = String::from_utf8_lossy(value).into_owned();
        values.insert(key, Slot::Unparsed(value));
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(source: &str) -> Section {
        Section::from_raw("Test", source.as_bytes().to_vec())
    }

    #[test]
    fn test_parse_on_first_access() {
        let mut s = section("[Test]\nName=Foo\n");
        assert!(!s.is_parsed());
        assert_eq!(s.peek("Name"), Peek::NeedsParse);
        assert!(s.contains("Name"));
        assert!(s.is_parsed());
    }

    #[test]
    fn test_get_coerces_and_caches() {
        let mut s = section("[Test]\nName = Foo Viewer \n");
        assert_eq!(s.get("Name", ""), (ValueType::String, "Foo Viewer".to_string()));
        assert_eq!(
            s.peek("Name"),
            Peek::Ready(Some((ValueType::String, "Foo Viewer".to_string())))
        );
    }

    #[test]
    fn test_parsed_but_uncoerced_value_needs_parse() {
        let mut s = section("[Test]\nA=1\nB=2\n");
        s.lookup("A");
        assert_eq!(s.peek("B"), Peek::NeedsParse);
        assert_eq!(s.peek("C"), Peek::Ready(None));
        assert_eq!(s.peek_contains("B"), Peek::Ready(true));
    }

    #[test]
    fn test_missing_key_returns_default() {
        let mut s = section("[Test]\nA=1\n");
        assert_eq!(s.get("B", "fallback"), (ValueType::NotExisted, "fallback".to_string()));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let mut s = section("[Test]\nFoo=1\nBar=x\nFoo=2\n");
        assert_eq!(s.get("Foo", "").1, "2");
        assert_eq!(s.keys(), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_lines_without_equals_are_ignored() {
        let mut s = section("[Test]\njunk line\nA=1\n");
        assert_eq!(s.keys(), vec!["A"]);
    }

    #[test]
    fn test_comments_produce_no_keys() {
        let mut s = section("[Test]\n# Hidden=1\nShown=2 # tail\n");
        assert_eq!(s.keys(), vec!["Shown"]);
        assert_eq!(s.get("Shown", "").1, "2");
    }

    #[test]
    fn test_locale_keys_are_distinct() {
        let mut s = section("[Test]\nName=Foo\nName[de]=Fu\n");
        assert_eq!(s.keys(), vec!["Name", "Name[de]"]);
    }

    #[test]
    fn test_empty_value_and_empty_key() {
        let mut s = section("[Test]\nEmpty=\n=orphan\n");
        assert_eq!(s.get("Empty", "x").1, "");
        assert_eq!(s.get("", "x").1, "orphan");
    }

    #[test]
    fn test_set_overwrites_and_appends() {
        let mut s = section("[Test]\nA=1\nB=2\n");
        s.set("A", "one");
        s.set("C", "three");
        assert_eq!(s.get("A", "").1, "one");
        assert_eq!(s.keys(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_set_typed() {
        let mut s = Section::new("Fresh");
        s.set_typed("Hidden", ValueType::Boolean, "true");
        s.set_typed("Later", ValueType::Unparsed, "5");
        assert_eq!(s.get("Hidden", ""), (ValueType::Boolean, "true".to_string()));
        assert_eq!(s.get("Later", ""), (ValueType::String, "5".to_string()));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut s = Section::from_raw("Bin", b"[Bin]\nName=caf\xe9\n".to_vec());
        assert_eq!(s.get("Name", "").1, "caf\u{fffd}");
    }
}
