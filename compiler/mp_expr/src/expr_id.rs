//! Index newtypes into the expression store.
//!
//! - `ExprId(u32)` instead of references: handles stay `Copy` and compare
//!   with an integer compare
//! - `ListRange` for operand lists, slopes, and breakpoints
//! - `FunctionId(u32)` for registered functions
//!
//! `u32::MAX` is reserved as the "no node" sentinel in both ID spaces.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Index into the expression store.
///
/// # Design
/// - Memory: 4 bytes
/// - Equality: O(1) integer compare
/// - Cache locality: indices into contiguous arrays
#[derive(Copy, Clone, Eq, PartialEq)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Invalid expression ID (sentinel value).
    pub const INVALID: ExprId = ExprId(u32::MAX);

    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the store.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Hash for ExprId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Index into the function table.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct FunctionId(u32);

impl FunctionId {
    pub const INVALID: FunctionId = FunctionId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        FunctionId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "FunctionId({})", self.0)
        } else {
            write!(f, "FunctionId::INVALID")
        }
    }
}

impl Default for FunctionId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Contiguous range in one of the store's flattened lists.
///
/// Operand lists, PL slopes, and PL breakpoints all use this layout:
/// `start: u32, len: u32` = 8 bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub(crate) struct ListRange {
    pub(crate) start: u32,
    pub(crate) len: u32,
}

impl ListRange {
    /// Empty range.
    pub(crate) const EMPTY: ListRange = ListRange { start: 0, len: 0 };

    #[inline]
    pub(crate) const fn new(start: u32, len: u32) -> Self {
        ListRange { start, len }
    }

    /// The range as `usize` bounds into the backing list.
    #[inline]
    pub(crate) const fn bounds(&self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }
}

impl fmt::Debug for ListRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListRange({}..{})", self.start, u64::from(self.start) + u64::from(self.len))
    }
}
