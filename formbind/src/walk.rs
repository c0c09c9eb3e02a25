//! Type-directed assignment of one key's values into a destination.

use alloc::sync::Arc;

use formbind_core::{Def, Poke, ScalarType, SequenceSlots};

use crate::decoder::Decoder;
use crate::error::{DecodeError, DecodeErrorKind, DecodeErrors};
use crate::map;
use crate::path::PathToken;
use crate::scalar;
use crate::sequence;

/// Walks keys through a destination, collecting failures as it goes.
pub(crate) struct Walker<'d> {
    decoder: &'d Decoder,
    errors: DecodeErrors,
}

impl<'d> Walker<'d> {
    pub(crate) fn new(decoder: &'d Decoder) -> Self {
        Walker {
            decoder,
            errors: DecodeErrors::default(),
        }
    }

    pub(crate) fn finish(self) -> Result<(), DecodeErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn fail(&mut self, namespace: &str, kind: DecodeErrorKind) {
        debug!("decode error at {namespace:?}: {}", kind.code());
        self.errors.insert(DecodeError::new(namespace, kind));
    }

    /// Consumes `tokens` starting at `poke`, then assigns `values` to the slot
    /// they lead to. `ns` holds the path consumed so far and is restored
    /// before returning.
    ///
    /// Returns true if a value was stored.
    pub(crate) fn walk(
        &mut self,
        poke: Poke<'_>,
        tokens: &[PathToken<'_>],
        values: &[&str],
        ns: &mut String,
    ) -> bool {
        let Some((token, rest)) = tokens.split_first() else {
            return self.assign_leaf(poke, values, ns);
        };

        let shape = poke.shape();
        match poke {
            Poke::Option(opt) => {
                let inner = opt.get_or_insert_default();
                self.walk(inner, tokens, values, ns)
            }
            Poke::Record(record) => {
                let PathToken::Field(name) = *token else {
                    trace!("skipping {token} at record {}", shape.type_identifier);
                    return false;
                };
                let Def::Record(def) = shape.def else {
                    return false;
                };
                let Some(index) = self.decoder.field_index(shape, &def, name) else {
                    trace!("no field {name:?} in {}", shape.type_identifier);
                    return false;
                };
                let Some(field) = record.field_mut(index) else {
                    return false;
                };

                let mark = ns.len();
                if !ns.is_empty() {
                    ns.push('.');
                }
                ns.push_str(name);
                let stored = self.walk(field, rest, values, ns);
                ns.truncate(mark);
                stored
            }
            Poke::Sequence(seq) => {
                let index = match *token {
                    PathToken::Index { index, .. } => index,
                    PathToken::MapKey(text) => {
                        self.fail(
                            ns,
                            DecodeErrorKind::InvalidArrayIndex {
                                index: text.to_string(),
                            },
                        );
                        return false;
                    }
                    PathToken::Field(_) => {
                        trace!("skipping {token} at sequence");
                        return false;
                    }
                };
                let len = index.saturating_add(1);
                let max = self.decoder.max_array_size();
                let before = seq.len();
                if let Err(kind) = sequence::check_len(len, max)
                    .and_then(|()| sequence::ensure_len(&mut *seq, len, max))
                {
                    self.fail(ns, kind);
                    return false;
                }

                let mark = ns.len();
                ns.push_str(&token.to_string());
                let stored = self.walk(seq.element_mut(index), rest, values, ns);
                ns.truncate(mark);
                if !stored {
                    seq.truncate(before);
                }
                stored
            }
            Poke::Map(map) => {
                if matches!(token, PathToken::Field(_)) {
                    trace!("skipping {token} at map");
                    return false;
                }
                let Def::Map(def) = shape.def else {
                    return false;
                };
                let key = match map::decode_key(self.decoder, def.k(), token.text()) {
                    Ok(key) => key,
                    Err(kind) => {
                        self.fail(ns, kind);
                        return false;
                    }
                };
                let Ok(entry) = map.entry_mut(key) else {
                    self.fail(
                        ns,
                        DecodeErrorKind::UnsupportedMapKeyType {
                            key: token.text().to_string(),
                            type_name: def.k().type_identifier,
                        },
                    );
                    return false;
                };

                let mark = ns.len();
                ns.push_str(&token.to_string());
                let stored = self.walk(entry, rest, values, ns);
                ns.truncate(mark);
                stored
            }
            Poke::Scalar(_) => {
                trace!("skipping {token}: {} has no children", shape.type_identifier);
                false
            }
        }
    }

    /// Stores `values` into the slot a key ended at.
    fn assign_leaf(&mut self, poke: Poke<'_>, values: &[&str], ns: &mut String) -> bool {
        let shape = poke.shape();

        if let Some(func) = self.decoder.custom_type_func(shape) {
            if values.is_empty() {
                return false;
            }
            let owned: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            return match func(&owned) {
                Ok(value) => self.store(poke, value, ns),
                Err(err) => {
                    self.fail(ns, DecodeErrorKind::Custom(Arc::from(err)));
                    false
                }
            };
        }

        match poke {
            Poke::Option(opt) => {
                opt.fill_with(&mut |inner| self.assign_leaf(inner, values, ns))
            }
            Poke::Sequence(seq) => self.assign_bare_key(seq, values, ns),
            Poke::Scalar(_) => {
                let Some(scalar) = shape.scalar_type() else {
                    return false;
                };
                let Some(text) = values.first() else {
                    return false;
                };
                if text.is_empty() && scalar != ScalarType::String {
                    return false;
                }
                match scalar::parse(shape, scalar, text) {
                    Ok(value) => self.store(poke, value, ns),
                    Err(kind) => {
                        self.fail(ns, kind);
                        false
                    }
                }
            }
            Poke::Record(_) | Poke::Map(_) => {
                trace!("ignoring values for {} at {ns:?}", shape.type_identifier);
                false
            }
        }
    }

    /// A key naming a sequence with no index: value `i` goes to element `i`.
    ///
    /// Elements added for this key are dropped again if none of them took a
    /// value.
    fn assign_bare_key(
        &mut self,
        seq: &mut dyn SequenceSlots,
        values: &[&str],
        ns: &mut String,
    ) -> bool {
        if values.is_empty() {
            return false;
        }
        let len = values.len();
        let max = self.decoder.max_array_size();
        let before = seq.len();
        if let Err(kind) = sequence::check_len(len, max)
            .and_then(|()| sequence::ensure_len(&mut *seq, len, max))
        {
            self.fail(ns, kind);
            return false;
        }

        let mark = ns.len();
        let mut stored = false;
        for (index, value) in values.iter().enumerate() {
            ns.push('[');
            ns.push_str(&index.to_string());
            ns.push(']');
            stored |= self.assign_leaf(seq.element_mut(index), core::slice::from_ref(value), ns);
            ns.truncate(mark);
        }
        if !stored {
            seq.truncate(before);
        }
        stored
    }

    fn store(&mut self, mut poke: Poke<'_>, value: Box<dyn core::any::Any>, ns: &str) -> bool {
        match poke.set_boxed(value) {
            Ok(()) => true,
            Err(_) => {
                self.fail(
                    ns,
                    DecodeErrorKind::UnsupportedDestinationKind {
                        type_name: poke.shape().type_identifier,
                    },
                );
                false
            }
        }
    }
}
