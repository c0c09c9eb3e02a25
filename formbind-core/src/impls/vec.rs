use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use crate::{Def, FormBind, Poke, SequenceDef, SequenceSlots, Shape, shape_of};

impl<T: FormBind> FormBind for Vec<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new::<Self>(
            "Vec",
            Def::Sequence(SequenceDef {
                t: shape_of::<T>,
            }),
        )
    };

    #[inline]
    fn default_value() -> Self {
        Vec::new()
    }

    #[inline]
    fn poke(&mut self) -> Poke<'_> {
        Poke::Sequence(self)
    }
}

impl<T: FormBind> SequenceSlots for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    #[inline]
    fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
        Vec::try_reserve_exact(self, additional)
    }

    fn grow_to(&mut self, len: usize) {
        if len > Vec::len(self) {
            self.resize_with(len, T::default_value);
        }
    }

    #[inline]
    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }

    fn element_mut(&mut self, index: usize) -> Poke<'_> {
        self[index].poke()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_to_never_shrinks() {
        let mut v = vec![1u8, 2, 3];
        SequenceSlots::grow_to(&mut v, 1);
        assert_eq!(v, [1, 2, 3]);
        SequenceSlots::grow_to(&mut v, 5);
        assert_eq!(v, [1, 2, 3, 0, 0]);
    }

    #[test]
    fn reserve_exact_keeps_existing_elements() {
        let mut v: Vec<String> = vec!["a".into()];
        assert!(SequenceSlots::try_reserve_exact(&mut v, 9).is_ok());
        assert!(SequenceSlots::capacity(&v) >= 10);
        assert_eq!(v, ["a"]);
    }

    #[test]
    fn reserve_overflow_is_an_error() {
        let mut v: Vec<String> = vec!["a".into()];
        assert!(SequenceSlots::try_reserve_exact(&mut v, usize::MAX).is_err());
        assert_eq!(v, ["a"]);
    }

    #[test]
    fn truncate_only_shrinks() {
        let mut v = vec![1u8, 2, 3];
        SequenceSlots::truncate(&mut v, 5);
        assert_eq!(v, [1, 2, 3]);
        SequenceSlots::truncate(&mut v, 1);
        assert_eq!(v, [1]);
    }

    #[test]
    fn element_mut_pokes_the_element() {
        let mut v = vec![0i32; 2];
        let mut poke = SequenceSlots::element_mut(&mut v, 1);
        assert!(poke.set_boxed(Box::new(42i32)).is_ok());
        assert_eq!(v, [0, 42]);
    }
}
