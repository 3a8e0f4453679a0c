//! Value types
//!
//!     Values are stored as the raw text found after the `=` and only get a type when they are
//!     first read. Type guessing is deliberately conservative: everything currently becomes a
//!     `String`. The tagged slot keeps room for `Strings`, `Boolean` and `Numeric` coercion
//!     without changing when coercion happens.

use std::fmt;

/// The type a stored value has been coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ValueType {
    Unparsed,
    String,
    Strings,
    Boolean,
    Numeric,
    /// Returned for missing keys, never stored
    NotExisted,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Unparsed => "unparsed",
            ValueType::String => "string",
            ValueType::Strings => "strings",
            ValueType::Boolean => "boolean",
            ValueType::Numeric => "numeric",
            ValueType::NotExisted => "not-existed",
        };
        f.write_str(name)
    }
}

/// A value slot inside a parsed section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Raw text, type not decided yet
    Unparsed(String),
    Typed(ValueType, String),
}

impl Slot {
    pub fn text(&self) -> &str {
        match self {
            Slot::Unparsed(text) | Slot::Typed(_, text) => text,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Slot::Unparsed(_) => ValueType::Unparsed,
            Slot::Typed(ty, _) => *ty,
        }
    }

    /// Coerces an unparsed slot in place and returns the typed pair.
    pub fn materialize(&mut self) -> (ValueType, String) {
        if let Slot::Unparsed(raw) = self {
            let raw = std::mem::take(raw);
            *self = Slot::Typed(guess_type(&raw), raw);
        }
        (self.value_type(), self.text().to_string())
    }

    /// The typed pair, if this slot has already been coerced.
    pub fn typed(&self) -> Option<(ValueType, String)> {
        match self {
            Slot::Unparsed(_) => None,
            Slot::Typed(ty, text) => Some((*ty, text.clone())),
        }
    }
}

/// Decides the type of a raw value. Always `String` for now.
pub fn guess_type(_raw: &str) -> ValueType {
    ValueType::String
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_once() {
        let mut slot = Slot::Unparsed("true".to_string());
        assert_eq!(slot.value_type(), ValueType::Unparsed);
        assert_eq!(slot.typed(), None);

        let first = slot.materialize();
        assert_eq!(first, (ValueType::String, "true".to_string()));
        assert_eq!(slot, Slot::Typed(ValueType::String, "true".to_string()));
        assert_eq!(slot.materialize(), first);
    }

    #[test]
    fn test_typed_slot_keeps_its_type() {
        let mut slot = Slot::Typed(ValueType::Boolean, "false".to_string());
        assert_eq!(slot.materialize(), (ValueType::Boolean, "false".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueType::NotExisted.to_string(), "not-existed");
        assert_eq!(ValueType::String.to_string(), "string");
    }
}
