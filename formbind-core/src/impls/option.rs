use crate::{Def, FormBind, OptionDef, OptionSlot, Poke, Shape, shape_of};

impl<T: FormBind> FormBind for Option<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new::<Self>(
            "Option",
            Def::Option(OptionDef {
                t: shape_of::<T>,
            }),
        )
    };

    #[inline]
    fn default_value() -> Self {
        None
    }

    #[inline]
    fn poke(&mut self) -> Poke<'_> {
        Poke::Option(self)
    }
}

impl<T: FormBind> OptionSlot for Option<T> {
    #[inline]
    fn is_some(&self) -> bool {
        Option::is_some(self)
    }

    fn get_or_insert_default(&mut self) -> Poke<'_> {
        self.get_or_insert_with(T::default_value).poke()
    }

    fn fill_with(&mut self, fill: &mut dyn FnMut(Poke<'_>) -> bool) -> bool {
        if let Some(value) = self {
            return fill(value.poke());
        }

        let mut value = T::default_value();
        let filled = fill(value.poke());
        if filled {
            *self = Some(value);
        }
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_with_keeps_none_when_fill_fails() {
        let mut opt: Option<u32> = None;
        let filled = OptionSlot::fill_with(&mut opt, &mut |_| false);
        assert!(!filled);
        assert_eq!(opt, None);
    }

    #[test]
    fn fill_with_stores_value_on_success() {
        let mut opt: Option<u32> = None;
        let filled = OptionSlot::fill_with(&mut opt, &mut |mut poke| {
            poke.set_boxed(Box::new(7u32)).is_ok()
        });
        assert!(filled);
        assert_eq!(opt, Some(7));
    }

    #[test]
    fn fill_with_reuses_existing_value() {
        let mut opt: Option<String> = Some("before".to_string());
        OptionSlot::fill_with(&mut opt, &mut |poke| {
            assert!(poke.shape().is_type::<String>());
            true
        });
        assert_eq!(opt.as_deref(), Some("before"));
    }

    #[test]
    fn get_or_insert_default_allocates_once() {
        let mut opt: Option<Vec<u8>> = None;
        match OptionSlot::get_or_insert_default(&mut opt) {
            Poke::Sequence(seq) => seq.grow_to(2),
            other => panic!("expected a sequence, got {}", other.kind_name()),
        }
        let _ = OptionSlot::get_or_insert_default(&mut opt);
        assert_eq!(opt, Some(vec![0, 0]));
    }
}
