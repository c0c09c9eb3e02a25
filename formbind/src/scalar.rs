//! Text to built-in scalar coercion.

use core::any::Any;
use core::str::FromStr;

use formbind_core::{OrderedFloat, ScalarType, Shape};

use crate::error::{ConversionKind, DecodeErrorKind};

/// Parses `text` into the concrete type behind `shape`.
///
/// The returned box always holds the exact Rust type `scalar` stands for, so
/// it can be handed to `Poke::set_boxed`.
pub(crate) fn parse(
    shape: &'static Shape,
    scalar: ScalarType,
    text: &str,
) -> Result<Box<dyn Any>, DecodeErrorKind> {
    let type_name = shape.type_identifier;
    match scalar {
        ScalarType::String => Ok(Box::new(text.to_string())),
        ScalarType::Bool => match parse_bool(text) {
            Some(b) => Ok(Box::new(b)),
            None => Err(conversion(text, type_name, ConversionKind::Boolean)),
        },
        ScalarType::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Box::new(c)),
                _ => Err(conversion(text, type_name, ConversionKind::Character)),
            }
        }
        ScalarType::I8 => number::<i8>(text, type_name, scalar),
        ScalarType::I16 => number::<i16>(text, type_name, scalar),
        ScalarType::I32 => number::<i32>(text, type_name, scalar),
        ScalarType::I64 => number::<i64>(text, type_name, scalar),
        ScalarType::I128 => number::<i128>(text, type_name, scalar),
        ScalarType::ISize => number::<isize>(text, type_name, scalar),
        ScalarType::U8 => number::<u8>(text, type_name, scalar),
        ScalarType::U16 => number::<u16>(text, type_name, scalar),
        ScalarType::U32 => number::<u32>(text, type_name, scalar),
        ScalarType::U64 => number::<u64>(text, type_name, scalar),
        ScalarType::U128 => number::<u128>(text, type_name, scalar),
        ScalarType::USize => number::<usize>(text, type_name, scalar),
        ScalarType::F32 => number::<f32>(text, type_name, scalar),
        ScalarType::F64 => number::<f64>(text, type_name, scalar),
        ScalarType::OrderedF32 => number::<OrderedFloat<f32>>(text, type_name, scalar),
        ScalarType::OrderedF64 => number::<OrderedFloat<f64>>(text, type_name, scalar),
        #[cfg(feature = "time")]
        ScalarType::OffsetDateTime => {
            use time::format_description::well_known::Rfc3339;
            match time::OffsetDateTime::parse(text, &Rfc3339) {
                Ok(t) => Ok(Box::new(t)),
                Err(_) => Err(conversion(text, type_name, ConversionKind::Time)),
            }
        }
        _ => Err(DecodeErrorKind::UnsupportedDestinationKind { type_name }),
    }
}

/// Parses the boolean spellings accepted in forms.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" | "on" | "y" | "yes" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" | "off" | "n" | "no" => Some(false),
        _ => None,
    }
}

fn number<T: FromStr + 'static>(
    text: &str,
    type_name: &'static str,
    scalar: ScalarType,
) -> Result<Box<dyn Any>, DecodeErrorKind> {
    match text.parse::<T>() {
        Ok(n) => Ok(Box::new(n)),
        Err(_) => Err(conversion(text, type_name, numeric_kind(scalar))),
    }
}

/// Error family for a numeric scalar that failed to parse.
fn numeric_kind(scalar: ScalarType) -> ConversionKind {
    if scalar.is_signed_integer() {
        ConversionKind::Integer
    } else if scalar.is_unsigned_integer() {
        ConversionKind::UnsignedInteger
    } else {
        debug_assert!(scalar.is_float(), "{scalar:?} is not numeric");
        ConversionKind::Float
    }
}

fn conversion(text: &str, type_name: &'static str, kind: ConversionKind) -> DecodeErrorKind {
    DecodeErrorKind::Conversion {
        value: text.to_string(),
        type_name,
        kind,
    }
}
