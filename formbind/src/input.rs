//! Sources of flat `key → values` input.

use alloc::collections::BTreeMap;
use core::hash::BuildHasher;
use std::collections::HashMap;

/// A flat mapping from path-encoded keys to lists of values, such as a parsed
/// query string or `application/x-www-form-urlencoded` body.
///
/// The decoder sorts the entries by key before walking them, so the
/// iteration order of the source does not matter.
pub trait FlatInput {
    /// Returns every `(key, values)` pair.
    fn entries(&self) -> Vec<(&str, Vec<&str>)>;
}

fn collect<'a, K, V>(
    pairs: impl Iterator<Item = (&'a K, &'a [V])>,
) -> Vec<(&'a str, Vec<&'a str>)>
where
    K: AsRef<str> + 'a,
    V: AsRef<str> + 'a,
{
    pairs
        .map(|(key, values)| {
            (
                key.as_ref(),
                values.iter().map(AsRef::as_ref).collect(),
            )
        })
        .collect()
}

impl<K, V, S> FlatInput for HashMap<K, Vec<V>, S>
where
    K: AsRef<str>,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn entries(&self) -> Vec<(&str, Vec<&str>)> {
        collect(self.iter().map(|(k, v)| (k, v.as_slice())))
    }
}

impl<K, V> FlatInput for BTreeMap<K, Vec<V>>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn entries(&self) -> Vec<(&str, Vec<&str>)> {
        collect(self.iter().map(|(k, v)| (k, v.as_slice())))
    }
}

#[cfg(feature = "indexmap")]
impl<K, V, S> FlatInput for indexmap::IndexMap<K, Vec<V>, S>
where
    K: AsRef<str>,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn entries(&self) -> Vec<(&str, Vec<&str>)> {
        collect(self.iter().map(|(k, v)| (k, v.as_slice())))
    }
}

/// Pairs in a slice; a key may repeat, and repeated keys are decoded in
/// slice order.
impl<K, V> FlatInput for [(K, Vec<V>)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn entries(&self) -> Vec<(&str, Vec<&str>)> {
        collect(self.iter().map(|(k, v)| (k, v.as_slice())))
    }
}

impl<K, V> FlatInput for [(K, &[V])]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn entries(&self) -> Vec<(&str, Vec<&str>)> {
        collect(self.iter().map(|(k, v)| (k, *v)))
    }
}

impl<K, V> FlatInput for Vec<(K, Vec<V>)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn entries(&self) -> Vec<(&str, Vec<&str>)> {
        self.as_slice().entries()
    }
}

impl<T: FlatInput + ?Sized> FlatInput for &T {
    fn entries(&self) -> Vec<(&str, Vec<&str>)> {
        (**self).entries()
    }
}
