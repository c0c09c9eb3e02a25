//! Errors reported by [`crate::Decoder::decode`].

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::fmt::{self, Display};

use crate::path::PathError;

/// A boxed error as returned by custom type functions.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// A failure to decode one key.
#[derive(Debug, Clone)]
pub struct DecodeError {
    namespace: String,
    kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(namespace: impl Into<String>, kind: DecodeErrorKind) -> Self {
        DecodeError {
            namespace: namespace.into(),
            kind,
        }
    }

    /// The path that was being decoded when the failure happened, e.g.
    /// `Phone[0].Number`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns a reference to the error kind for detailed error inspection.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

/// Detailed classification of decode errors.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// The key does not follow the path grammar.
    MalformedPath(PathError),

    /// A bracket token could not be turned into the map's key type.
    UnsupportedMapKeyType {
        /// the bracket token
        key: String,
        /// name of the map's key type
        type_name: &'static str,
    },

    /// A sequence would grow past the decoder's configured maximum.
    ArrayTooLarge {
        /// length the sequence would need
        size: usize,
        /// configured maximum
        max: usize,
    },

    /// A bracket token at a sequence is not a non-negative integer.
    InvalidArrayIndex {
        /// the bracket token
        index: String,
    },

    /// A value could not be parsed into a built-in scalar.
    Conversion {
        /// the offending text
        value: String,
        /// name of the destination type
        type_name: &'static str,
        /// which family of scalar was expected
        kind: ConversionKind,
    },

    /// A custom type function rejected the values.
    Custom(Arc<dyn core::error::Error + Send + Sync>),

    /// The destination type cannot be decoded into: an opaque type without a
    /// custom type function, or a root that is neither a record nor a
    /// sequence.
    UnsupportedDestinationKind {
        /// name of the destination type
        type_name: &'static str,
    },
}

/// Family of scalar a [`DecodeErrorKind::Conversion`] failed to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConversionKind {
    /// `i8` through `i128`, `isize`
    Integer,
    /// `u8` through `u128`, `usize`
    UnsignedInteger,
    /// `f32`, `f64` and their ordered wrappers
    Float,
    /// `bool`
    Boolean,
    /// `char`
    Character,
    /// `time::OffsetDateTime`
    Time,
}

impl Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConversionKind::Integer => "Integer",
            ConversionKind::UnsignedInteger => "Unsigned Integer",
            ConversionKind::Float => "Float",
            ConversionKind::Boolean => "Boolean",
            ConversionKind::Character => "Character",
            ConversionKind::Time => "Time",
        })
    }
}

impl DecodeErrorKind {
    /// Returns an error code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeErrorKind::MalformedPath(_) => "formbind::malformed_path",
            DecodeErrorKind::UnsupportedMapKeyType { .. } => "formbind::unsupported_map_key_type",
            DecodeErrorKind::ArrayTooLarge { .. } => "formbind::array_too_large",
            DecodeErrorKind::InvalidArrayIndex { .. } => "formbind::invalid_array_index",
            DecodeErrorKind::Conversion { .. } => "formbind::conversion",
            DecodeErrorKind::Custom(_) => "formbind::custom",
            DecodeErrorKind::UnsupportedDestinationKind { .. } => {
                "formbind::unsupported_destination_kind"
            }
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let namespace = &self.namespace;
        match &self.kind {
            DecodeErrorKind::MalformedPath(err) => write!(f, "{err}"),
            DecodeErrorKind::UnsupportedMapKeyType { key, type_name } => write!(
                f,
                "Unsupported Map Key '{key}', Type '{type_name}' Namespace '{namespace}'"
            ),
            DecodeErrorKind::ArrayTooLarge { size, max } => write!(
                f,
                "Array size of '{size}' is larger than the maximum currently set on the decoder of '{max}'. To increase this limit please see, set_max_array_size(size)"
            ),
            DecodeErrorKind::InvalidArrayIndex { index } => {
                write!(f, "Invalid Array index '{index}'")
            }
            DecodeErrorKind::Conversion {
                value,
                type_name,
                kind,
            } => write!(
                f,
                "Invalid {kind} Value '{value}' Type '{type_name}' Namespace '{namespace}'"
            ),
            DecodeErrorKind::Custom(err) => write!(f, "{err}"),
            DecodeErrorKind::UnsupportedDestinationKind { type_name } => {
                write!(f, "Unsupported Type '{type_name}' Namespace '{namespace}'")
            }
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            DecodeErrorKind::MalformedPath(err) => Some(err),
            DecodeErrorKind::Custom(err) => Some(&**err),
            _ => None,
        }
    }
}

/// Every failure of one [`crate::Decoder::decode`] call, keyed by namespace.
///
/// Iteration and display follow namespace order.
#[derive(Debug, Clone, Default)]
pub struct DecodeErrors {
    errors: BTreeMap<String, DecodeError>,
}

impl DecodeErrors {
    /// Records `err` under its namespace, replacing an earlier error there.
    pub(crate) fn insert(&mut self, err: DecodeError) {
        self.errors.insert(err.namespace.clone(), err);
    }

    /// Number of failed namespaces.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error recorded for `namespace`, if any.
    pub fn get(&self, namespace: &str) -> Option<&DecodeError> {
        self.errors.get(namespace)
    }

    /// Iterates over `(namespace, error)` pairs in namespace order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodeError)> {
        self.errors.iter().map(|(ns, err)| (ns.as_str(), err))
    }
}

impl<'a> IntoIterator for &'a DecodeErrors {
    type Item = (&'a String, &'a DecodeError);
    type IntoIter = alloc::collections::btree_map::Iter<'a, String, DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.values().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl core::error::Error for DecodeErrors {}

// ============================================================================
// Diagnostic Implementation
// ============================================================================

#[cfg(feature = "miette")]
impl miette::Diagnostic for DecodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.kind {
            DecodeErrorKind::MalformedPath(err) => Some(&err.key as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let DecodeErrorKind::MalformedPath(err) = &self.kind else {
            return None;
        };
        let label = match err.kind {
            crate::path::PathErrorKind::MissingClose => "this `[` is never closed",
            crate::path::PathErrorKind::MissingOpen => "unmatched `]`",
            crate::path::PathErrorKind::EmptySegment => "empty field name",
            crate::path::PathErrorKind::UnexpectedName => "expected `.` or `[` here",
        };
        Some(Box::new(core::iter::once(miette::LabeledSpan::at(
            err.offset..err.offset + 1,
            label,
        ))))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match &self.kind {
            DecodeErrorKind::ArrayTooLarge { .. } => Some(Box::new(
                "raise the limit with Decoder::set_max_array_size",
            )),
            DecodeErrorKind::UnsupportedDestinationKind { .. }
            | DecodeErrorKind::UnsupportedMapKeyType { .. } => Some(Box::new(
                "register a custom type function for this type",
            )),
            _ => None,
        }
    }
}

#[cfg(feature = "miette")]
impl miette::Diagnostic for DecodeErrors {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new("formbind::decode"))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn miette::Diagnostic> + 'a>> {
        Some(Box::new(
            self.errors.values().map(|err| err as &dyn miette::Diagnostic),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_one_per_line_in_namespace_order() {
        let mut errors = DecodeErrors::default();
        errors.insert(DecodeError::new(
            "Uint",
            DecodeErrorKind::Conversion {
                value: "-1".to_string(),
                type_name: "u32",
                kind: ConversionKind::UnsignedInteger,
            },
        ));
        errors.insert(DecodeError::new(
            "Int",
            DecodeErrorKind::Conversion {
                value: "bad".to_string(),
                type_name: "i32",
                kind: ConversionKind::Integer,
            },
        ));
        insta::assert_snapshot!(errors.to_string(), @r"
        Invalid Integer Value 'bad' Type 'i32' Namespace 'Int'
        Invalid Unsigned Integer Value '-1' Type 'u32' Namespace 'Uint'
        ");
        assert_eq!(errors.len(), 2);
        let namespaces: Vec<&str> = errors.iter().map(|(ns, _)| ns).collect();
        assert_eq!(namespaces, ["Int", "Uint"]);
    }

    #[test]
    fn later_errors_replace_earlier_ones_at_the_same_namespace() {
        let mut errors = DecodeErrors::default();
        errors.insert(DecodeError::new(
            "A",
            DecodeErrorKind::InvalidArrayIndex {
                index: "x".to_string(),
            },
        ));
        errors.insert(DecodeError::new(
            "A",
            DecodeErrorKind::ArrayTooLarge { size: 5, max: 4 },
        ));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("A").map(|e| e.kind().code()),
            Some("formbind::array_too_large")
        );
    }
}
