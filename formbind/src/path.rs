//! Tokenizing of form keys such as `Phone[0].Number` or `Map[2016-01-02]`.
//!
//! The grammar is `Name('.'Name | '['token']')*`, plus a leading `[i]` for a
//! top-level sequence. A bracket token runs to the first following `]`, so map
//! keys may contain `.`.

use core::fmt;

/// One step of a parsed form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathToken<'a> {
    /// A record field name, e.g. `Number` in `Phone.Number`.
    Field(&'a str),
    /// A bracket token made only of digits that fits a `usize`.
    ///
    /// `text` is kept so the token can still address a map keyed by strings.
    Index {
        /// parsed position
        index: usize,
        /// the token exactly as written
        text: &'a str,
    },
    /// Any other bracket token, e.g. `key` in `Map[key]`.
    MapKey(&'a str),
}

impl<'a> PathToken<'a> {
    /// Returns the token as written in the key, without brackets.
    pub fn text(&self) -> &'a str {
        match *self {
            PathToken::Field(name) => name,
            PathToken::Index { text, .. } => text,
            PathToken::MapKey(text) => text,
        }
    }

    fn bracketed(text: &'a str) -> Self {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = text.parse::<usize>() {
                return PathToken::Index { index, text };
            }
        }
        PathToken::MapKey(text)
    }
}

impl fmt::Display for PathToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::Field(name) => write!(f, ".{name}"),
            PathToken::Index { text, .. } | PathToken::MapKey(text) => write!(f, "[{text}]"),
        }
    }
}

/// A key that does not follow the path grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    /// the whole key
    pub key: String,
    /// byte offset where parsing failed
    pub offset: usize,
    /// what went wrong
    pub kind: PathErrorKind,
}

/// What made a key malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathErrorKind {
    /// A `[` with no `]` before the next `[` or the end of the key.
    MissingClose,
    /// A `]` with no opening `[`.
    MissingOpen,
    /// An empty field name: leading, trailing or doubled `.`.
    EmptySegment,
    /// A field name directly after `]`, without a `.`.
    UnexpectedName,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = &self.key;
        match self.kind {
            PathErrorKind::MissingClose => {
                write!(f, "Invalid formatting for key '{key}' missing ']' bracket")
            }
            PathErrorKind::MissingOpen => {
                write!(f, "Invalid formatting for key '{key}' missing '[' bracket")
            }
            PathErrorKind::EmptySegment => {
                write!(f, "Invalid formatting for key '{key}' empty field name")
            }
            PathErrorKind::UnexpectedName => write!(
                f,
                "Invalid formatting for key '{key}' missing '.' before field name"
            ),
        }
    }
}

impl core::error::Error for PathError {}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Dot,
    Name,
    Bracket,
}

/// Splits `key` into tokens.
///
/// An empty key yields no tokens.
pub fn parse(key: &str) -> Result<Vec<PathToken<'_>>, PathError> {
    let fail = |offset: usize, kind: PathErrorKind| PathError {
        key: key.to_string(),
        offset,
        kind,
    };

    let bytes = key.as_bytes();
    let mut tokens = Vec::new();
    let mut prev = Prev::Start;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                if prev == Prev::Dot {
                    return Err(fail(pos, PathErrorKind::EmptySegment));
                }
                let start = pos + 1;
                match key[start..].find(['[', ']']) {
                    Some(len) if bytes[start + len] == b']' => {
                        tokens.push(PathToken::bracketed(&key[start..start + len]));
                        pos = start + len + 1;
                        prev = Prev::Bracket;
                    }
                    _ => return Err(fail(pos, PathErrorKind::MissingClose)),
                }
            }
            b']' => return Err(fail(pos, PathErrorKind::MissingOpen)),
            b'.' => {
                if matches!(prev, Prev::Start | Prev::Dot) {
                    return Err(fail(pos, PathErrorKind::EmptySegment));
                }
                pos += 1;
                prev = Prev::Dot;
            }
            _ => {
                if prev == Prev::Bracket {
                    return Err(fail(pos, PathErrorKind::UnexpectedName));
                }
                let len = key[pos..]
                    .find(['.', '[', ']'])
                    .unwrap_or(key.len() - pos);
                tokens.push(PathToken::Field(&key[pos..pos + len]));
                pos += len;
                prev = Prev::Name;
            }
        }
    }

    if prev == Prev::Dot {
        return Err(fail(key.len() - 1, PathErrorKind::EmptySegment));
    }

    Ok(tokens)
}
