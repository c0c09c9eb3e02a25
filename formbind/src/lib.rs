#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;
extern crate self as formbind;

#[macro_use]
mod tracing_macros;

mod custom;
mod decoder;
mod error;
mod fields;
mod input;
mod map;
pub mod path;
mod scalar;
mod sequence;
mod walk;

pub use decoder::{DEFAULT_MAX_ARRAY_SIZE, Decoder};
pub use error::{BoxError, ConversionKind, DecodeError, DecodeErrorKind, DecodeErrors};
pub use fields::IGNORE_MARKER;
pub use input::FlatInput;

// Used by `#[derive(FormBind)]` output and by hand-written impls.
pub use formbind_core::{
    ConstTypeId, Def, Field, FieldTag, FormBind, MapDef, MapSlots, OptionDef, OptionSlot,
    OrderedFloat, PointerDef, Poke, RecordDef, RecordSlots, ScalarType, SequenceDef,
    SequenceSlots, Shape, Slot, shape_of,
};
pub use formbind_macros::FormBind;
