use core::fmt;

use formbind_core::{FormBind, Poke, RecordDef, Shape};

use crate::custom::{CustomTypeFn, CustomTypeFuncs};
use crate::error::{BoxError, DecodeError, DecodeErrorKind, DecodeErrors};
use crate::fields::FieldNameCache;
use crate::input::FlatInput;
use crate::path;
use crate::walk::Walker;

/// Longest sequence a single key may grow, unless configured otherwise.
pub const DEFAULT_MAX_ARRAY_SIZE: usize = 10_000;

/// Decodes flat form input into values implementing [`FormBind`].
///
/// A decoder holds configuration only; one instance can be shared and used
/// for any number of [`Decoder::decode`] calls, from any thread.
///
/// ```
/// use std::collections::HashMap;
/// use formbind::{Decoder, FormBind};
///
/// #[derive(FormBind, Debug, Default, PartialEq)]
/// struct Phone {
///     number: String,
/// }
///
/// #[derive(FormBind, Debug, Default)]
/// struct User {
///     name: String,
///     phones: Vec<Phone>,
/// }
///
/// let input = HashMap::from([
///     ("name", vec!["Joey"]),
///     ("phones[0].number", vec!["1(111)111-1111"]),
/// ]);
///
/// let mut user = User::default();
/// Decoder::new().decode(&mut user, &input)?;
/// assert_eq!(user.name, "Joey");
/// assert_eq!(user.phones[0].number, "1(111)111-1111");
/// # Ok::<(), formbind::DecodeErrors>(())
/// ```
pub struct Decoder {
    tag_name: Option<String>,
    max_array_size: usize,
    custom_type_funcs: CustomTypeFuncs,
    field_names: FieldNameCache,
}

impl Decoder {
    /// Creates a decoder that matches declared field names, has no custom
    /// type functions and caps sequences at [`DEFAULT_MAX_ARRAY_SIZE`].
    pub fn new() -> Self {
        Decoder {
            tag_name: None,
            max_array_size: DEFAULT_MAX_ARRAY_SIZE,
            custom_type_funcs: CustomTypeFuncs::default(),
            field_names: FieldNameCache::default(),
        }
    }

    /// Selects which `#[formbind(<tag> = "...")]` annotation gives a field its
    /// name. Fields without that annotation keep their declared name; the
    /// value `"-"` makes a field unreachable.
    pub fn set_tag_name(&mut self, tag_name: impl Into<String>) {
        self.tag_name = Some(tag_name.into());
        self.field_names.clear();
    }

    /// Builder form of [`Decoder::set_tag_name`].
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.set_tag_name(tag_name);
        self
    }

    /// The configured tag name, if any.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// Sets the longest sequence a key may grow. Indices at or past `size`
    /// fail with [`DecodeErrorKind::ArrayTooLarge`].
    pub fn set_max_array_size(&mut self, size: usize) {
        self.max_array_size = size;
    }

    /// Builder form of [`Decoder::set_max_array_size`].
    pub fn with_max_array_size(mut self, size: usize) -> Self {
        self.set_max_array_size(size);
        self
    }

    /// The configured sequence limit.
    pub fn max_array_size(&self) -> usize {
        self.max_array_size
    }

    /// Registers a function that produces `T` from the raw values of a key.
    ///
    /// It is used for every slot of type `T` (record fields, sequence
    /// elements, map values) and for map keys of type `T`, where it receives
    /// the bracket token as its only value. Built-in parsing is skipped for
    /// `T`; an error from `f` is reported with its own message. Registering
    /// again for the same `T` replaces the earlier function.
    pub fn register_custom_type_func<T, E, F>(&mut self, f: F)
    where
        T: FormBind,
        E: Into<BoxError>,
        F: Fn(&[String]) -> Result<T, E> + Send + Sync + 'static,
    {
        self.custom_type_funcs.register(f);
    }

    /// Builder form of [`Decoder::register_custom_type_func`].
    pub fn with_custom_type_func<T, E, F>(mut self, f: F) -> Self
    where
        T: FormBind,
        E: Into<BoxError>,
        F: Fn(&[String]) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register_custom_type_func(f);
        self
    }

    /// Decodes `input` into `dst`.
    ///
    /// `dst` must be a record or a sequence. Existing contents are merged
    /// into: sequences grow, map entries are reused, untouched fields keep
    /// their values.
    ///
    /// Every key is tokenized before anything is written. If any key is
    /// malformed, `dst` is left as it was and the error set holds one
    /// [`DecodeErrorKind::MalformedPath`] per malformed key. Otherwise each
    /// key is decoded independently: a failing key is recorded and decoding
    /// goes on with the next one, keeping whatever was already written.
    pub fn decode<T, I>(&self, dst: &mut T, input: &I) -> Result<(), DecodeErrors>
    where
        T: FormBind,
        I: FlatInput + ?Sized,
    {
        let mut entries = input.entries();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        debug!(
            "decoding {} keys into {}",
            entries.len(),
            T::SHAPE.type_identifier
        );

        match dst.poke() {
            Poke::Record(_) | Poke::Sequence(_) => {}
            other => {
                let mut errors = DecodeErrors::default();
                errors.insert(DecodeError::new(
                    "",
                    DecodeErrorKind::UnsupportedDestinationKind {
                        type_name: other.shape().type_identifier,
                    },
                ));
                return Err(errors);
            }
        }

        let mut malformed = DecodeErrors::default();
        let mut parsed = Vec::with_capacity(entries.len());
        for (key, values) in &entries {
            match path::parse(key) {
                Ok(tokens) if tokens.is_empty() => {}
                Ok(tokens) => parsed.push((tokens, values.as_slice())),
                Err(err) => malformed.insert(DecodeError::new(
                    *key,
                    DecodeErrorKind::MalformedPath(err),
                )),
            }
        }
        if !malformed.is_empty() {
            return Err(malformed);
        }

        let mut walker = Walker::new(self);
        let mut ns = String::new();
        for (tokens, values) in &parsed {
            trace!("key {:?} -> {} values", tokens, values.len());
            walker.walk(dst.poke(), tokens, values, &mut ns);
            ns.clear();
        }
        walker.finish()
    }

    pub(crate) fn custom_type_func(&self, shape: &Shape) -> Option<&CustomTypeFn> {
        self.custom_type_funcs.get(shape.id.get())
    }

    pub(crate) fn field_index(
        &self,
        shape: &'static Shape,
        record: &RecordDef,
        name: &str,
    ) -> Option<usize> {
        self.field_names
            .lookup(shape, record, self.tag_name.as_deref(), name)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Decoder {
    fn clone(&self) -> Self {
        Decoder {
            tag_name: self.tag_name.clone(),
            max_array_size: self.max_array_size,
            custom_type_funcs: self.custom_type_funcs.clone(),
            field_names: self.field_names.clone(),
        }
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("tag_name", &self.tag_name)
            .field("max_array_size", &self.max_array_size)
            .field("custom_type_funcs", &self.custom_type_funcs.type_names())
            .finish_non_exhaustive()
    }
}
