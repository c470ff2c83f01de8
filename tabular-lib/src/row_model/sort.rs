//! Stable merge sort with a fallible comparator.

use std::cmp::Ordering;

/// Stable-sorts `items` with `compare`, stopping at the first error.
///
/// Bottom-up merge sort: it always terminates after `log2(n)` passes and
/// always leaves `items` a permutation of its input, whatever `compare`
/// returns. Only `Greater` moves a right-hand element ahead of a left-hand
/// one, so equal elements keep their order. On error `items` is unchanged.
pub(crate) fn stable_sort_by<T, E, F>(items: &mut Vec<T>, mut compare: F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let len = items.len();
    if len < 2 {
        return Ok(());
    }

    let mut src = items.clone();
    let mut dst = Vec::with_capacity(len);
    let mut width = 1;
    while width < len {
        dst.clear();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if compare(&src[i], &src[j])? == Ordering::Greater {
                    dst.push(src[j]);
                    j += 1;
                } else {
                    dst.push(src[i]);
                    i += 1;
                }
            }
            dst.extend_from_slice(&src[i..mid]);
            dst.extend_from_slice(&src[j..end]);
            start = end;
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }
    *items = src;
    Ok(())
}
