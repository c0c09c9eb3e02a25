#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod const_typeid;
pub use const_typeid::*;

// Static descriptors: shapes, defs, fields
mod shape;
pub use shape::*;

// Mutable views the decoder writes through
mod poke;
pub use poke::*;

// Definitions for standard library and optional third-party types
mod impls;

pub use ordered_float::OrderedFloat;
