//! Registry of user-supplied parsers for specific destination types.

use alloc::sync::Arc;
use core::any::{Any, TypeId};
use std::collections::HashMap;

use formbind_core::FormBind;

use crate::error::BoxError;

/// A type-erased custom type function.
pub(crate) type CustomTypeFn =
    Arc<dyn Fn(&[String]) -> Result<Box<dyn Any>, BoxError> + Send + Sync>;

/// Custom type functions keyed by the type they produce.
#[derive(Clone, Default)]
pub(crate) struct CustomTypeFuncs {
    funcs: HashMap<TypeId, (&'static str, CustomTypeFn)>,
}

impl CustomTypeFuncs {
    /// Registers `f` for `T`, replacing any earlier function for `T`.
    pub(crate) fn register<T, E, F>(&mut self, f: F)
    where
        T: FormBind,
        E: Into<BoxError>,
        F: Fn(&[String]) -> Result<T, E> + Send + Sync + 'static,
    {
        let erased: CustomTypeFn = Arc::new(move |values: &[String]| {
            f(values)
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(Into::into)
        });
        self.funcs
            .insert(TypeId::of::<T>(), (T::SHAPE.type_identifier, erased));
    }

    pub(crate) fn get(&self, id: TypeId) -> Option<&CustomTypeFn> {
        self.funcs.get(&id).map(|(_, f)| f)
    }

    /// Names of the types with a registered function, for `Debug`.
    pub(crate) fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.funcs.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }
}
