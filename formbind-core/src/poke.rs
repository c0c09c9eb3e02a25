use alloc::boxed::Box;
use alloc::collections::TryReserveError;
use core::any::Any;

use crate::Shape;

/// A type the decoder can write into.
///
/// Implementations exist for scalars, `Vec`, maps, `Option` and `Box`; records
/// and opaque newtypes get theirs from `#[derive(FormBind)]`.
pub trait FormBind: Any + Sized {
    /// The shape of this type
    const SHAPE: &'static Shape;

    /// Value a freshly materialized slot starts out with: a new sequence
    /// element, a new map entry, or the inside of an `Option` that was `None`.
    fn default_value() -> Self;

    /// Borrows this value as a mutable destination.
    fn poke(&mut self) -> Poke<'_>;
}

/// A mutable view into a destination value, split by what it can do.
///
/// Every variant wraps a trait object, so the decoder walks arbitrary types
/// without being generic over them.
pub enum Poke<'mem> {
    /// A leaf value; can only be replaced wholesale.
    Scalar(&'mem mut dyn Slot),
    /// A struct; fields are reached by index.
    Record(&'mem mut dyn RecordSlots),
    /// A growable list.
    Sequence(&'mem mut dyn SequenceSlots),
    /// A map with get-or-create entries.
    Map(&'mem mut dyn MapSlots),
    /// An optional slot.
    Option(&'mem mut dyn OptionSlot),
}

impl<'mem> Poke<'mem> {
    /// Creates a poke for a value.
    #[inline]
    pub fn new<T: FormBind>(value: &'mem mut T) -> Self {
        value.poke()
    }

    /// Returns the shape of the value being poked.
    pub fn shape(&self) -> &'static Shape {
        match self {
            Poke::Scalar(slot) => slot.shape(),
            Poke::Record(record) => record.shape(),
            Poke::Sequence(seq) => seq.shape(),
            Poke::Map(map) => map.shape(),
            Poke::Option(opt) => opt.shape(),
        }
    }

    /// Replaces the value with `value`, which must be of the poked type.
    ///
    /// On a type mismatch the value is handed back untouched.
    pub fn set_boxed(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        match self {
            Poke::Scalar(slot) => slot.set_boxed(value),
            Poke::Record(record) => record.set_boxed(value),
            Poke::Sequence(seq) => seq.set_boxed(value),
            Poke::Map(map) => map.set_boxed(value),
            Poke::Option(opt) => opt.set_boxed(value),
        }
    }

    /// Returns a short name for the variant, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Poke::Scalar(_) => "scalar",
            Poke::Record(_) => "record",
            Poke::Sequence(_) => "sequence",
            Poke::Map(_) => "map",
            Poke::Option(_) => "option",
        }
    }
}

/// Capabilities shared by every destination: know your shape, accept a
/// replacement value.
///
/// Implemented for every [`FormBind`] type.
pub trait Slot {
    /// Returns the shape of the value behind this slot.
    fn shape(&self) -> &'static Shape;

    /// Replaces the value with `value` if it has the right concrete type.
    fn set_boxed(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;
}

impl<T: FormBind> Slot for T {
    #[inline]
    fn shape(&self) -> &'static Shape {
        T::SHAPE
    }

    fn set_boxed(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self = *value.downcast::<T>()?;
        Ok(())
    }
}

/// A struct whose fields can be borrowed by index.
///
/// Indices follow `RecordDef::fields`.
pub trait RecordSlots: Slot {
    /// Borrows the field at `index`, or `None` if there is no such field.
    fn field_mut(&mut self, index: usize) -> Option<Poke<'_>>;
}

/// A growable sequence.
pub trait SequenceSlots: Slot {
    /// Number of initialized elements.
    fn len(&self) -> usize;

    /// Returns true if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements the current allocation can hold.
    fn capacity(&self) -> usize;

    /// Makes room for at least `additional` more elements, allocating no
    /// more than that.
    ///
    /// # Errors
    ///
    /// Fails if the new capacity overflows or the allocator refuses; the
    /// sequence is left unchanged.
    fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError>;

    /// Appends default values until the sequence holds `len` elements.
    ///
    /// Never shrinks the sequence.
    fn grow_to(&mut self, len: usize);

    /// Drops elements past `len`. Does nothing if the sequence is shorter.
    fn truncate(&mut self, len: usize);

    /// Borrows the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn element_mut(&mut self, index: usize) -> Poke<'_>;
}

/// A map whose entries are created on first access.
pub trait MapSlots: Slot {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns true if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the value stored under `key`, inserting a default value first
    /// if the key is absent.
    ///
    /// `key` must be of the map's key type; otherwise it is handed back.
    fn entry_mut(&mut self, key: Box<dyn Any>) -> Result<Poke<'_>, Box<dyn Any>>;
}

/// An optional value.
pub trait OptionSlot: Slot {
    /// Returns true if a value is present.
    fn is_some(&self) -> bool;

    /// Borrows the inner value, inserting a default one first if absent.
    fn get_or_insert_default(&mut self) -> Poke<'_>;

    /// Runs `fill` on the inner value.
    ///
    /// When the option is `None`, `fill` works on a detached default value
    /// that is only stored if `fill` returns true. Returns what `fill`
    /// returned.
    fn fill_with(&mut self, fill: &mut dyn FnMut(Poke<'_>) -> bool) -> bool;
}
