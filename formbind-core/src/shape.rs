use core::any::TypeId;
use core::fmt;

use crate::{ConstTypeId, FormBind};

/// Schema for a destination type, built at compile time.
///
/// Every [`FormBind`] type exposes one through `T::SHAPE`. The decoder never
/// inspects values directly; it reads the shape to know how the next path
/// token should be interpreted, then mutates the value through [`crate::Poke`].
#[derive(Clone, Copy)]
pub struct Shape {
    /// Unique type identifier
    pub id: ConstTypeId,

    /// Short, human-readable name of the type, e.g. `"i32"`, `"Vec"`, `"Phone"`.
    ///
    /// This is what error messages print as the type name.
    pub type_identifier: &'static str,

    /// What kind of destination this is
    pub def: Def,
}

impl Shape {
    /// Creates a shape for `T`.
    pub const fn new<T: 'static>(type_identifier: &'static str, def: Def) -> Self {
        Shape {
            id: ConstTypeId::of::<T>(),
            type_identifier,
            def,
        }
    }

    /// Returns true if this shape describes `T`.
    #[inline]
    pub fn is_type<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns the [`ScalarType`] if this shape is a scalar.
    #[inline]
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        match self.def {
            Def::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shape {}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type_identifier", &self.type_identifier)
            .field("def", &self.def)
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_identifier)
    }
}

/// Returns `T::SHAPE`.
///
/// Shapes refer to each other through `fn() -> &'static Shape` pointers to
/// this function, which lets a record hold an `Option<Box<Self>>` field
/// without a const cycle.
#[inline]
pub const fn shape_of<T: FormBind>() -> &'static Shape {
    T::SHAPE
}

/// The semantic definition of a shape: is it a record, a sequence, a map?
#[derive(Clone, Copy)]
#[non_exhaustive]
pub enum Def {
    /// A leaf value parsed from a single string, e.g. `u32`, `String`, `bool`.
    Scalar(ScalarType),

    /// A struct with named fields, addressed by `.name` path segments.
    Record(RecordDef),

    /// An ordered, growable list addressed by `[index]`, e.g. `Vec<T>`.
    Sequence(SequenceDef),

    /// Associative container addressed by `[key]`, e.g. `HashMap<K, V>`.
    Map(MapDef),

    /// An optional slot allocated on first use, e.g. `Option<T>`.
    Option(OptionDef),

    /// A transparent owning pointer, e.g. `Box<T>`.
    Pointer(PointerDef),
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Def::Scalar(scalar) => write!(f, "Scalar({scalar:?})"),
            Def::Record(record) => write!(f, "Record({} fields)", record.fields.len()),
            Def::Sequence(seq) => write!(f, "Sequence<{}>", seq.t()),
            Def::Map(map) => write!(f, "Map<{}, {}>", map.k(), map.v()),
            Def::Option(opt) => write!(f, "Option<{}>", opt.t()),
            Def::Pointer(ptr) => write!(f, "Pointer<{}>", ptr.pointee()),
        }
    }
}

/// Fields of a record.
#[derive(Clone, Copy, Debug)]
pub struct RecordDef {
    /// Decodable fields, in declaration order. Skipped fields are not listed.
    pub fields: &'static [Field],
}

impl RecordDef {
    /// Creates a record definition.
    pub const fn new(fields: &'static [Field]) -> Self {
        RecordDef { fields }
    }
}

/// Element type of a sequence.
#[derive(Clone, Copy)]
pub struct SequenceDef {
    /// shape of the element type
    pub t: fn() -> &'static Shape,
}

impl SequenceDef {
    /// Returns the shape of the items in the sequence
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Key and value types of a map.
#[derive(Clone, Copy)]
pub struct MapDef {
    /// shape of the keys in the map
    pub k: fn() -> &'static Shape,
    /// shape of the values in the map
    pub v: fn() -> &'static Shape,
}

impl MapDef {
    /// Returns shape of the keys in the map
    pub fn k(&self) -> &'static Shape {
        (self.k)()
    }

    /// Returns shape of the values in the map
    pub fn v(&self) -> &'static Shape {
        (self.v)()
    }
}

/// Inner type of an option.
#[derive(Clone, Copy)]
pub struct OptionDef {
    /// shape of the inner type
    pub t: fn() -> &'static Shape,
}

impl OptionDef {
    /// Returns the inner type of the option
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Pointee of an owning pointer.
#[derive(Clone, Copy)]
pub struct PointerDef {
    /// shape of the pointed-to type
    pub pointee: fn() -> &'static Shape,
}

impl PointerDef {
    /// Returns the shape of the pointee
    pub fn pointee(&self) -> &'static Shape {
        (self.pointee)()
    }
}

/// Describes a field in a record
#[derive(Clone, Copy)]
pub struct Field {
    /// declared name of the field (without any `r#` prefix)
    pub name: &'static str,

    /// shape of the field's type
    ///
    /// the layer of indirection allows for cyclic type definitions
    pub shape: fn() -> &'static Shape,

    /// `key = "value"` pairs from `#[formbind(key = "value")]`
    pub tags: &'static [FieldTag],
}

impl Field {
    /// Creates a field.
    pub const fn new(
        name: &'static str,
        shape: fn() -> &'static Shape,
        tags: &'static [FieldTag],
    ) -> Self {
        Field { name, shape, tags }
    }

    /// Returns the shape of the field's type
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Returns the value of the tag named `key`, if the field carries one.
    #[inline]
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("shape", &self.shape().type_identifier)
            .field("tags", &self.tags)
            .finish()
    }
}

/// One `key = "value"` annotation on a field.
///
/// The decoder's tag name selects which key supplies the field's effective
/// name, so one struct can carry names for several input conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldTag {
    /// annotation key, e.g. `form`
    pub key: &'static str,
    /// annotation value, e.g. `user_name` or `-`
    pub value: &'static str,
}

impl FieldTag {
    /// Creates a tag.
    pub const fn new(key: &'static str, value: &'static str) -> Self {
        FieldTag { key, value }
    }
}

/// All scalar types the decoder knows how to parse from text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `String`
    String,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    USize,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    ISize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `ordered_float::OrderedFloat<f32>`
    OrderedF32,
    /// `ordered_float::OrderedFloat<f64>`
    OrderedF64,
    /// `time::OffsetDateTime`, parsed as RFC 3339
    #[cfg(feature = "time")]
    OffsetDateTime,
    /// A leaf the decoder cannot parse by itself; it needs a custom type
    /// function registered on the decoder.
    Opaque,
}

impl ScalarType {
    /// Returns true for the signed integer types.
    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            ScalarType::I8
                | ScalarType::I16
                | ScalarType::I32
                | ScalarType::I64
                | ScalarType::I128
                | ScalarType::ISize
        )
    }

    /// Returns true for the unsigned integer types.
    pub const fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            ScalarType::U8
                | ScalarType::U16
                | ScalarType::U32
                | ScalarType::U64
                | ScalarType::U128
                | ScalarType::USize
        )
    }

    /// Returns true for the floating point types, ordered or not.
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            ScalarType::F32 | ScalarType::F64 | ScalarType::OrderedF32 | ScalarType::OrderedF64
        )
    }
}
