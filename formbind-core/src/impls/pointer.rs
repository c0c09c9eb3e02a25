use alloc::boxed::Box;

use crate::{Def, FormBind, PointerDef, Poke, Shape, shape_of};

impl<T: FormBind> FormBind for Box<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new::<Self>(
            "Box",
            Def::Pointer(PointerDef {
                pointee: shape_of::<T>,
            }),
        )
    };

    fn default_value() -> Self {
        Box::new(T::default_value())
    }

    /// A box is transparent: poking it pokes the pointee.
    #[inline]
    fn poke(&mut self) -> Poke<'_> {
        (**self).poke()
    }
}
