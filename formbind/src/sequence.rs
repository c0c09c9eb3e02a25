//! Growing sequences to reach an index.

use formbind_core::SequenceSlots;

use crate::error::DecodeErrorKind;

/// Checks that a sequence of `len` elements stays within `max`.
pub(crate) fn check_len(len: usize, max: usize) -> Result<(), DecodeErrorKind> {
    if len > max {
        return Err(DecodeErrorKind::ArrayTooLarge { size: len, max });
    }
    Ok(())
}

/// Grows `seq` to at least `len` elements.
///
/// Spare capacity is used when it suffices; otherwise exactly enough is
/// reserved. Existing elements are kept and the sequence never shrinks.
/// If the allocation fails the sequence is untouched and the error reports
/// `len` against `max`.
pub(crate) fn ensure_len(
    seq: &mut dyn SequenceSlots,
    len: usize,
    max: usize,
) -> Result<(), DecodeErrorKind> {
    let current = seq.len();
    if len <= current {
        return Ok(());
    }
    if seq.capacity() < len {
        trace!("reallocating sequence: len {current}, need {len}");
        if seq.try_reserve_exact(len - current).is_err() {
            debug!("cannot grow sequence from {current} to {len}");
            return Err(DecodeErrorKind::ArrayTooLarge { size: len, max });
        }
    }
    seq.grow_to(len);
    Ok(())
}
