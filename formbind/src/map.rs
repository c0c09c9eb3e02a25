//! Turning bracket tokens into typed map keys.

use core::any::Any;

use formbind_core::{Def, ScalarType, Shape};

use crate::decoder::Decoder;
use crate::error::DecodeErrorKind;
use crate::scalar;

/// Decodes `text` into a value of the map key type `key_shape`.
///
/// A custom type function registered for the key type takes precedence over
/// the built-in scalar parsers.
pub(crate) fn decode_key(
    decoder: &Decoder,
    key_shape: &'static Shape,
    text: &str,
) -> Result<Box<dyn Any>, DecodeErrorKind> {
    if let Some(func) = decoder.custom_type_func(key_shape) {
        return func(&[text.to_string()]).map_err(|err| DecodeErrorKind::Custom(err.into()));
    }

    let unsupported = || DecodeErrorKind::UnsupportedMapKeyType {
        key: text.to_string(),
        type_name: key_shape.type_identifier,
    };
    match key_shape.def {
        Def::Scalar(scalar) if scalar != ScalarType::Opaque => {
            scalar::parse(key_shape, scalar, text).map_err(|err| match err {
                DecodeErrorKind::UnsupportedDestinationKind { .. } => unsupported(),
                other => other,
            })
        }
        _ => Err(unsupported()),
    }
}
