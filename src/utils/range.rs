use std::ops::Range;

/// Resolves a pair of inclusive, possibly negative, indices against a sequence of `len` elements.
///
/// Negative indices count from the end (`-1` is the last element) and both ends are clamped to the
/// sequence. Returns `None` when the resolved range selects nothing: the sequence is empty, `start`
/// lies past the end, or `start` comes after `stop`.
pub fn clamp_range(start: i64, stop: i64, len: usize) -> Option<Range<usize>> {
    let len = len as i64;
    if len == 0 {
        return None;
    }

    let start = resolve(start, len).max(0);
    let stop = resolve(stop, len).min(len - 1);

    if start >= len || stop < 0 || start > stop {
        return None;
    }

    Some(start as usize..(stop + 1) as usize)
}

/// Resolves the inclusive byte offsets of `GETRANGE` and `BITCOUNT`. Unlike [`clamp_range`], an
/// end that resolves before the first byte still selects the first byte, unless both offsets are
/// negative and out of order.
pub fn byte_range(start: i64, end: i64, len: usize) -> Option<Range<usize>> {
    if start < 0 && end < 0 && start > end {
        return None;
    }

    let len = len as i64;
    let start = resolve(start, len).max(0);
    let end = resolve(end, len).max(0).min(len - 1);

    if len == 0 || start > end {
        return None;
    }

    Some(start as usize..(end + 1) as usize)
}

fn resolve(index: i64, len: i64) -> i64 {
    if index < 0 {
        len.saturating_add(index)
    } else {
        index
    }
}
