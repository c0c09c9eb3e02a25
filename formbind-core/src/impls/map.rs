use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::Any;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use crate::{Def, FormBind, MapDef, MapSlots, Poke, Shape, shape_of};

impl<K, V, S> FormBind for HashMap<K, V, S>
where
    K: FormBind + Eq + Hash,
    V: FormBind,
    S: BuildHasher + Default + 'static,
{
    const SHAPE: &'static Shape = &const {
        Shape::new::<Self>(
            "HashMap",
            Def::Map(MapDef {
                k: shape_of::<K>,
                v: shape_of::<V>,
            }),
        )
    };

    #[inline]
    fn default_value() -> Self {
        HashMap::default()
    }

    #[inline]
    fn poke(&mut self) -> Poke<'_> {
        Poke::Map(self)
    }
}

impl<K, V, S> MapSlots for HashMap<K, V, S>
where
    K: FormBind + Eq + Hash,
    V: FormBind,
    S: BuildHasher + Default + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entry_mut(&mut self, key: Box<dyn Any>) -> Result<Poke<'_>, Box<dyn Any>> {
        let key = *key.downcast::<K>()?;
        Ok(self.entry(key).or_insert_with(V::default_value).poke())
    }
}

impl<K, V> FormBind for BTreeMap<K, V>
where
    K: FormBind + Ord,
    V: FormBind,
{
    const SHAPE: &'static Shape = &const {
        Shape::new::<Self>(
            "BTreeMap",
            Def::Map(MapDef {
                k: shape_of::<K>,
                v: shape_of::<V>,
            }),
        )
    };

    #[inline]
    fn default_value() -> Self {
        BTreeMap::new()
    }

    #[inline]
    fn poke(&mut self) -> Poke<'_> {
        Poke::Map(self)
    }
}

impl<K, V> MapSlots for BTreeMap<K, V>
where
    K: FormBind + Ord,
    V: FormBind,
{
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entry_mut(&mut self, key: Box<dyn Any>) -> Result<Poke<'_>, Box<dyn Any>> {
        let key = *key.downcast::<K>()?;
        Ok(self.entry(key).or_insert_with(V::default_value).poke())
    }
}
