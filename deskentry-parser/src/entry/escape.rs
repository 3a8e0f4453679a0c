//! Escape codec
//!
//!     Two layers of escaping apply to desktop entry values.
//!
//!     The general layer covers every `string` and `localestring` value: `\s`, `\n`, `\t`,
//!     `\r` and `\\` stand for space, newline, tab, carriage return and backslash.
//!
//!     The exec layer sits underneath it for `Exec` style command lines. Reserved shell
//!     characters get a backslash in front, and literal whitespace is swapped for the control
//!     bytes 0x01 (space), 0x02 (tab) and 0x03 (newline) so that an argument splitter working
//!     on whitespace cannot cut through a quoted argument. The general rule is applied on top
//!     of the exec rule, which is why a literal backslash in an exec value ends up as four
//!     backslashes in the file.
//!
//!     Escaping is a straight character substitution. Unescaping runs a small logos lexer over
//!     the escape sequences so that `\\n` reads as a backslash followed by `n`, never as a
//!     newline.

use logos::Logos;

/// Characters with a meaning to the shell inside an exec value.
pub const EXEC_RESERVED: &[char] = &[
    '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')', '`',
];

const SPACE_SENTINEL: char = '\u{1}';
const TAB_SENTINEL: char = '\u{2}';
const NEWLINE_SENTINEL: char = '\u{3}';

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum GeneralToken {
    #[token("\\\\")]
    Backslash,
    #[token("\\s")]
    Space,
    #[token("\\n")]
    Newline,
    #[token("\\t")]
    Tab,
    #[token("\\r")]
    CarriageReturn,
    #[token("\\")]
    Lone,
    #[regex(r"[^\\]+")]
    Text,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ExecToken {
    #[regex(r#"\\["'\\><~|&;$*?#()`]"#)]
    Quoted,
    #[token("\u{1}")]
    SpaceSentinel,
    #[token("\u{2}")]
    TabSentinel,
    #[token("\u{3}")]
    NewlineSentinel,
    #[token("\\")]
    Lone,
    #[regex(r"[^\\\x01\x02\x03]+")]
    Text,
}

/// Applies the general escape rule: backslash first, then newline, tab and carriage return.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            ch => out.push(ch),
        }
    }
    out
}

/// Undoes the general escape rule. Unknown sequences are kept as they are.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lexer = GeneralToken::lexer(text);
    while let Some(token) = lexer.next() {
        match token {
            Ok(GeneralToken::Backslash) => out.push('\\'),
            Ok(GeneralToken::Space) => out.push(' '),
            Ok(GeneralToken::Newline) => out.push('\n'),
            Ok(GeneralToken::Tab) => out.push('\t'),
            Ok(GeneralToken::CarriageReturn) => out.push('\r'),
            Ok(GeneralToken::Lone) | Ok(GeneralToken::Text) | Err(()) => {
                out.push_str(lexer.slice())
            }
        }
    }
    out
}

/// Exec quoting followed by the general escape rule.
pub fn escape_exec(text: &str) -> String {
    escape(&quote_exec(text))
}

/// The general unescape rule followed by exec unquoting.
pub fn unescape_exec(text: &str) -> String {
    unquote_exec(&unescape(text))
}

/// Exec layer only: prefixes reserved characters with a backslash and swaps whitespace for
/// sentinels. Backslash is just another reserved character here, so a single pass cannot
/// escape anything twice.
pub fn quote_exec(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' ' => out.push(SPACE_SENTINEL),
            '\t' => out.push(TAB_SENTINEL),
            '\n' => out.push(NEWLINE_SENTINEL),
            ch if EXEC_RESERVED.contains(&ch) => {
                out.push('\\');
                out.push(ch);
            }
            ch => out.push(ch),
        }
    }
    out
}

/// Exec layer only: inverse of [quote_exec].
pub fn unquote_exec(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lexer = ExecToken::lexer(text);
    while let Some(token) = lexer.next() {
        match token {
            Ok(ExecToken::Quoted) => out.push_str(&lexer.slice()[1..]),
            Ok(ExecToken::SpaceSentinel) => out.push(' '),
            Ok(ExecToken::TabSentinel) => out.push('\t'),
            Ok(ExecToken::NewlineSentinel) => out.push('\n'),
            Ok(ExecToken::Lone) | Ok(ExecToken::Text) | Err(()) => out.push_str(lexer.slice()),
        }
    }
    out
}

/// Splits a `;` separated list value. `\;` stands for a literal semicolon; other escapes are
/// left for [unescape]. A single trailing empty element (the terminating `;`) is dropped.
pub fn split_list(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(';') => current.push(';'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ';' => items.push(std::mem::take(&mut current)),
            ch => current.push(ch),
        }
    }
    if !current.is_empty() {
        items.push(current);
    }
    items
}
