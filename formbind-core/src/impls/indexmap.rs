use alloc::boxed::Box;
use core::any::Any;
use core::hash::{BuildHasher, Hash};

use ::indexmap::IndexMap;

use crate::{Def, FormBind, MapDef, MapSlots, Poke, Shape, shape_of};

impl<K, V, S> FormBind for IndexMap<K, V, S>
where
    K: FormBind + Eq + Hash,
    V: FormBind,
    S: BuildHasher + Default + 'static,
{
    const SHAPE: &'static Shape = &const {
        Shape::new::<Self>(
            "IndexMap",
            Def::Map(MapDef {
                k: shape_of::<K>,
                v: shape_of::<V>,
            }),
        )
    };

    #[inline]
    fn default_value() -> Self {
        IndexMap::default()
    }

    #[inline]
    fn poke(&mut self) -> Poke<'_> {
        Poke::Map(self)
    }
}

impl<K, V, S> MapSlots for IndexMap<K, V, S>
where
    K: FormBind + Eq + Hash,
    V: FormBind,
    S: BuildHasher + Default + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn entry_mut(&mut self, key: Box<dyn Any>) -> Result<Poke<'_>, Box<dyn Any>> {
        let key = *key.downcast::<K>()?;
        Ok(self.entry(key).or_insert_with(V::default_value).poke())
    }
}
