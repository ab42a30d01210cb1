//! The `{}` primary-message mini-language (spec.md §6, out of scope as a
//! *contract* — the renderer only ever sees the rendered `String` — but
//! implemented here as the small data-driven validator/renderer the spec
//! names, rather than grown into a `format!`-alike procedural macro.
//!
//! Grounded on spec.md §6's literal grammar, cross-checked against
//! `examples/original_source/include/diagnostics/core/format_string.hpp`
//! (the `type_mapping` table and "doubled braces escape" rule) and
//! `format_any.hpp` (the bare `{}` "any type with a `to_string`/Display/
//! streaming operator" fallback), reimplemented as plain Rust enum matching
//! rather than templates.

use std::fmt;

/// One positional argument to a [`FormatString`]. The qualified variants
/// mirror `format_string.hpp`'s `type_mapping` table; `Any` is the bare
/// `{}` fallback for user types (spec.md §6: "exposes ... `to_string` ...
/// standard formatter specialisation ... streaming operator" — in Rust
/// terms, anything implementing [`fmt::Display`]).
#[derive(Clone)]
pub enum FormatArg {
    Char(char),
    Str(String),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Any(String),
}

impl FormatArg {
    fn type_tag(&self) -> &'static str {
        match self {
            Self::Char(_) => "c",
            Self::Str(_) => "s",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Any(_) => "",
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Any(v) => write!(f, "{v}"),
        }
    }
}

impl From<char> for FormatArg {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}
impl From<String> for FormatArg {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}
impl From<&str> for FormatArg {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}
macro_rules! impl_from_num {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(impl From<$t> for FormatArg {
            fn from(v: $t) -> Self {
                Self::$variant(v)
            }
        })*
    };
}
impl_from_num! {
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    f32 => F32, f64 => F64,
}

/// An error raised while parsing or rendering a [`FormatString`]: a
/// placeholder expects a type that wasn't supplied, or the argument count
/// doesn't match the placeholder count.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("format string expects {expected} argument(s), got {got}")]
    ArgCountMismatch { expected: usize, got: usize },
    #[error("argument {index} has type `{got}`, but the format string requires `{expected}`")]
    TypeMismatch { index: usize, expected: &'static str, got: &'static str },
}

/// One parsed placeholder: its position in the literal string and the
/// (possibly empty) type tag between the braces, e.g. `{u32}` or bare `{}`.
struct Placeholder {
    type_tag: String,
}

/// A validated `{}`-style format string. Parsing splits the literal into
/// runs of plain text and placeholders, unescaping `{{`/`}}`; validation
/// against a concrete argument list happens at construction (via
/// [`FormatString::render`]), not deferred to render time.
pub struct FormatString {
    /// Alternating plain-text runs and placeholder slots, in source order.
    parts: Vec<Part>,
    placeholder_count: usize,
}

enum Part {
    Text(String),
    Slot(Placeholder),
}

impl FormatString {
    /// Parses `template`, recognizing `{}`, `{tag}` placeholders and `{{`/`}}`
    /// escapes.
    pub fn parse(template: &str) -> Self {
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut placeholder_count = 0usize;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    if !text.is_empty() {
                        parts.push(Part::Text(std::mem::take(&mut text)));
                    }
                    let mut tag = String::new();
                    for c2 in chars.by_ref() {
                        if c2 == '}' {
                            break;
                        }
                        tag.push(c2);
                    }
                    placeholder_count += 1;
                    parts.push(Part::Slot(Placeholder { type_tag: tag.trim().to_string() }));
                }
                c => text.push(c),
            }
        }
        if !text.is_empty() {
            parts.push(Part::Text(text));
        }
        Self { parts, placeholder_count }
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }

    /// Renders the template against `args`, validating count and per-slot
    /// type tags.
    pub fn render(&self, args: &[FormatArg]) -> Result<String, FormatError> {
        if args.len() != self.placeholder_count {
            return Err(FormatError::ArgCountMismatch { expected: self.placeholder_count, got: args.len() });
        }
        let mut out = String::new();
        let mut slot = 0usize;
        for part in &self.parts {
            match part {
                Part::Text(t) => out.push_str(t),
                Part::Slot(ph) => {
                    let arg = &args[slot];
                    if !ph.type_tag.is_empty() && ph.type_tag != arg.type_tag() {
                        return Err(FormatError::TypeMismatch {
                            index: slot,
                            expected: leak_tag(&ph.type_tag),
                            got: arg.type_tag(),
                        });
                    }
                    out.push_str(&arg.to_string());
                    slot += 1;
                }
            }
        }
        Ok(out)
    }
}

/// Recovers a `'static` tag for the small fixed vocabulary of type names, so
/// [`FormatError::TypeMismatch`] doesn't need an owned `String` field.
fn leak_tag(tag: &str) -> &'static str {
    const TAGS: &[&str] = &["c", "s", "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64"];
    TAGS.iter().find(|t| **t == tag).copied().unwrap_or("")
}
