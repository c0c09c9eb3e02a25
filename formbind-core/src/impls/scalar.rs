use alloc::string::String;

use ordered_float::OrderedFloat;

use crate::{Def, FormBind, Poke, ScalarType, Shape};

macro_rules! impl_scalar {
    ($($ty:ty => $identifier:literal, $scalar:ident;)*) => {
        $(
            impl FormBind for $ty {
                const SHAPE: &'static Shape =
                    &const { Shape::new::<Self>($identifier, Def::Scalar(ScalarType::$scalar)) };

                #[inline]
                fn default_value() -> Self {
                    <$ty as Default>::default()
                }

                #[inline]
                fn poke(&mut self) -> Poke<'_> {
                    Poke::Scalar(self)
                }
            }
        )*
    };
}

impl_scalar! {
    bool => "bool", Bool;
    char => "char", Char;
    String => "String", String;
    u8 => "u8", U8;
    u16 => "u16", U16;
    u32 => "u32", U32;
    u64 => "u64", U64;
    u128 => "u128", U128;
    usize => "usize", USize;
    i8 => "i8", I8;
    i16 => "i16", I16;
    i32 => "i32", I32;
    i64 => "i64", I64;
    i128 => "i128", I128;
    isize => "isize", ISize;
    f32 => "f32", F32;
    f64 => "f64", F64;
    OrderedFloat<f32> => "OrderedFloat<f32>", OrderedF32;
    OrderedFloat<f64> => "OrderedFloat<f64>", OrderedF64;
}

#[cfg(feature = "time")]
impl FormBind for time::OffsetDateTime {
    const SHAPE: &'static Shape =
        &const { Shape::new::<Self>("OffsetDateTime", Def::Scalar(ScalarType::OffsetDateTime)) };

    fn default_value() -> Self {
        time::OffsetDateTime::UNIX_EPOCH
    }

    #[inline]
    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(self)
    }
}
