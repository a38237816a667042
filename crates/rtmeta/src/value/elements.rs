// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::iter::Fuse;

use super::Any;

/// Lazy iterator over the elements of an iterable [`Any`].
///
/// Single pass. Once it returns `None` it keeps returning `None`.
pub struct Elements<'a> {
    inner: Fuse<Box<dyn Iterator<Item = Any> + 'a>>,
}

impl<'a> Elements<'a> {
    pub(crate) fn new(inner: Box<dyn Iterator<Item = Any> + 'a>) -> Self {
        Self {
            inner: inner.fuse(),
        }
    }
}

impl Iterator for Elements<'_> {
    type Item = Any;

    fn next(&mut self) -> Option<Any> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl std::iter::FusedIterator for Elements<'_> {}

impl fmt::Debug for Elements<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elements").finish_non_exhaustive()
    }
}
