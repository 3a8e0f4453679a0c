//! # deskentry-parser
//!
//! A fuzzy parser for freedesktop.org desktop entry files (`*.desktop`, `*.directory`).
//!
//! Malformed input never aborts a load. The document keeps whatever could be parsed and
//! reports problems through a sticky [Status](entry::Status) instead.
//!
//! Layout
//!
//!     src/entry
//!       ├── tokenizer   logical line scanner shared by every pass
//!       ├── sections    header detection and section byte ranges
//!       ├── store       lazily parsed per-section key maps
//!       ├── document    the public DesktopEntry API
//!       ├── locale      locale names and the localized key fallback chain
//!       └── escape      string and exec escaping

pub mod entry;

pub use entry::{DesktopEntry, EntryError, EntryType, Status, ValueType, DEFAULT_SECTION};
