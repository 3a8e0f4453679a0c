//! Desktop entry parsing
//!
//! The pipeline is short:
//! 1. [tokenizer] cuts a byte buffer into logical lines (quotes, continuations, comments)
//! 2. [sections] runs the tokenizer over the whole file and records one byte range per header
//! 3. [store] parses a section's range into an ordered key map the first time it is touched
//! 4. [document] ties it together behind [DesktopEntry] and adds locale fallback
//!
//! [escape] is independent of the rest and only transforms value strings.

pub mod document;
pub mod entry_type;
pub mod error;
pub mod escape;
pub mod locale;
pub mod sections;
pub mod store;
pub mod tokenizer;
pub mod value;

pub use document::{DesktopEntry, DEFAULT_SECTION};
pub use entry_type::{EntryType, EntryTypeError};
pub use error::{EntryError, Status};
pub use escape::{escape, escape_exec, split_list, unescape, unescape_exec};
pub use locale::{default_locale, set_default_locale, system_locale};
pub use value::ValueType;
