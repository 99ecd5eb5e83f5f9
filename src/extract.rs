//! Path extraction over structured values

use crate::model::Structured;

/// Navigate `root` by a dot-separated path with bracketed array indices,
/// e.g. `results.items.[2].name`.
///
/// An empty or entirely-blank path returns the root unchanged. A segment
/// shaped `[<digits>]` (length >= 3) indexes the current value as an array;
/// any other segment keys into it as an object. Trailing empty segments
/// (a dangling `.`) are ignored. Missing keys and out-of-range indices are
/// delegated to the value layer and propagate as absent values; the
/// extractor synthesizes no defaults.
///
/// Only the final segment's result is captured. Should the walk ever
/// observe an already-captured result before the final segment, it aborts
/// and returns `None`; with single-pass iteration over well-formed input
/// that state is unreachable, and the guard exists to keep it that way.
/// A non-numeric bracket segment also returns `None`.
pub fn extract(root: Box<dyn Structured>, path: &str) -> Option<Box<dyn Structured>> {
    let mut segments: Vec<&str> = path.split('.').collect();
    while segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    }

    let last = segments.len() - 1;
    if last == 0 && segments[0].trim().is_empty() {
        return Some(root);
    }

    let mut next = root;
    let mut value: Option<Box<dyn Structured>> = None;

    for (index, segment) in segments.iter().enumerate() {
        if value.is_some() {
            return None;
        }

        next = match index_from_segment(segment) {
            Some(Ok(array_index)) => next.child_at(array_index),
            Some(Err(())) => return None,
            None => next.child_key(segment),
        };

        if index == last {
            value = Some(next.independent_copy());
        }
    }

    value
}

/// Recognize a `[<digits>]` segment. `None` means "not an index segment";
/// `Some(Err(()))` means index-shaped but unparseable.
fn index_from_segment(segment: &str) -> Option<Result<usize, ()>> {
    if segment.len() >= 3 && segment.starts_with('[') && segment.ends_with(']') {
        Some(segment[1..segment.len() - 1].parse::<usize>().map_err(|_| ()))
    } else {
        None
    }
}
