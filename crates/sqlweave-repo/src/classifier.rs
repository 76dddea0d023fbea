//! Duplicate-key detection.

use std::error::Error;

/// Decides whether a back-end error is a uniqueness violation.
///
/// The repository asks about the error and every error in its `source()`
/// chain, so wrapping errors are seen through.
pub trait DuplicateKeyClassifier {
    fn is_duplicate(&self, err: &(dyn Error + 'static)) -> bool;
}

impl<F> DuplicateKeyClassifier for F
where
    F: Fn(&(dyn Error + 'static)) -> bool,
{
    fn is_duplicate(&self, err: &(dyn Error + 'static)) -> bool {
        self(err)
    }
}

/// Classifier that recognizes nothing. Every failure stays a back-end error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverDuplicate;

impl DuplicateKeyClassifier for NeverDuplicate {
    fn is_duplicate(&self, _err: &(dyn Error + 'static)) -> bool {
        false
    }
}

/// Walks `err` and its sources.
pub(crate) fn chain_is_duplicate(
    classifier: &dyn DuplicateKeyClassifier,
    err: &(dyn Error + 'static),
) -> bool {
    std::iter::successors(Some(err), |e| (*e).source()).any(|e| classifier.is_duplicate(e))
}
