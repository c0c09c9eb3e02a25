use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::hash::{Hash, Hasher};

/// TypeId equivalent usable in const contexts.
///
/// `TypeId::of` cannot be called while building a `const SHAPE`, but a pointer
/// to it can be stored and called later.
#[derive(Copy, Clone)]
pub struct ConstTypeId {
    type_id_fn: fn() -> TypeId,
}

impl ConstTypeId {
    /// Create a [`ConstTypeId`] for a type.
    #[must_use]
    pub const fn of<T: 'static>() -> Self {
        ConstTypeId {
            type_id_fn: TypeId::of::<T>,
        }
    }

    /// Get the underlying [`TypeId`] for this `ConstTypeId`.
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

impl Debug for ConstTypeId {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        Debug::fmt(&self.get(), formatter)
    }
}

impl PartialEq for ConstTypeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl PartialEq<TypeId> for ConstTypeId {
    #[inline]
    fn eq(&self, other: &TypeId) -> bool {
        self.get() == *other
    }
}

impl Eq for ConstTypeId {}

impl PartialOrd for ConstTypeId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl Ord for ConstTypeId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.get(), &other.get())
    }
}

impl Hash for ConstTypeId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Function pointers are not guaranteed unique across codegen units,
        // so hash the resolved TypeId to stay consistent with `Eq`.
        self.get().hash(state);
    }
}
