//! Operand iteration for iterated expressions.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::handle::{ExprHandle, ExprRef, Sealed};

/// Forward iterator over the operands of an iterated expression.
///
/// Yields typed handles in insertion order. Cloning is O(1) and yields an
/// independent cursor; two iterators compare equal when they walk the
/// operands of the same expression and sit at the same position, so
/// `it == args.clone()` is the Rust spelling of comparing against `begin()`.
pub struct ArgIter<'a, A> {
    owner: Option<ExprRef>,
    args: &'a [ExprRef],
    front: usize,
    back: usize,
    _arg: PhantomData<fn() -> A>,
}

impl<'a, A: ExprHandle> ArgIter<'a, A> {
    pub(crate) fn new(owner: Option<ExprRef>, args: &'a [ExprRef]) -> Self {
        ArgIter {
            owner,
            args,
            front: 0,
            back: args.len(),
            _arg: PhantomData,
        }
    }

    /// Position of the next operand `next()` would yield.
    pub fn position(&self) -> usize {
        self.front
    }
}

impl<A> Clone for ArgIter<'_, A> {
    fn clone(&self) -> Self {
        ArgIter {
            owner: self.owner,
            args: self.args,
            front: self.front,
            back: self.back,
            _arg: PhantomData,
        }
    }
}

impl<A> PartialEq for ArgIter<'_, A> {
    fn eq(&self, other: &Self) -> bool {
        // Empty lists share one slice, so identity comes from the owner.
        self.owner == other.owner && self.front == other.front && self.back == other.back
    }
}

impl<A> Eq for ArgIter<'_, A> {}

impl<A: ExprHandle> Iterator for ArgIter<'_, A> {
    type Item = A;

    #[inline]
    fn next(&mut self) -> Option<A> {
        if self.front == self.back {
            return None;
        }
        let raw = self.args[self.front];
        self.front += 1;
        Some(<A as Sealed>::from_raw(raw))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<A: ExprHandle> DoubleEndedIterator for ArgIter<'_, A> {
    #[inline]
    fn next_back(&mut self) -> Option<A> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(<A as Sealed>::from_raw(self.args[self.back]))
    }
}

impl<A: ExprHandle> ExactSizeIterator for ArgIter<'_, A> {}

impl<A: ExprHandle> FusedIterator for ArgIter<'_, A> {}

impl<A: ExprHandle> fmt::Debug for ArgIter<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgIter")
            .field("position", &self.front)
            .field("remaining", &(self.back - self.front))
            .finish()
    }
}
