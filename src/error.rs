use thiserror::Error;

/// Errors reported by the checked operations of a [`List`](crate::List).
///
/// Most accessors of the list report an absent element with `None`; the
/// `try_*` family and the index-addressed splice report a `ListError`
/// instead, for callers that want to propagate the failure with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// An element was requested from an empty list.
    #[error("`{op}` called on an empty list")]
    EmptyContainer { op: &'static str },

    /// An index does not address a position of the list.
    #[error("index {index} is out of bounds for a list of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// The destination of a splice lies strictly inside the moved range.
    #[error("cannot splice {start}..{end} before {at}, which lies inside the range")]
    OverlappingSplice { at: usize, start: usize, end: usize },

    /// An index range whose start lies after its end.
    #[error("range {start}..{end} is decreasing")]
    InvalidRange { start: usize, end: usize },

    /// A non-cyclic cursor move would pass through the ghost node.
    #[error("cursor move across the ghost node")]
    GhostBoundary,
}

#[cfg(test)]
mod tests {
    use super::ListError;

    #[test]
    fn error_messages() {
        assert_eq!(
            ListError::EmptyContainer { op: "pop_front" }.to_string(),
            "`pop_front` called on an empty list"
        );
        assert_eq!(
            ListError::OutOfBounds { index: 4, len: 3 }.to_string(),
            "index 4 is out of bounds for a list of length 3"
        );
        assert_eq!(
            ListError::OverlappingSplice { at: 2, start: 1, end: 3 }.to_string(),
            "cannot splice 1..3 before 2, which lies inside the range"
        );
    }
}
