//! Arena storage for expression nodes.
//!
//! - Contiguous storage for all nodes of one factory
//! - Child references are `ExprRef` (index + kind), never pointers
//! - Operand lists, slopes, and breakpoints live in flat side tables
//!   addressed by `ListRange`
//! - Bulk deallocation: nodes live exactly as long as the arena
//!
//! The arena is append-only. Nodes are pushed complete, so a node is
//! never observable in a partially built state.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::handle::ExprRef;
use crate::{Expr, ExprHandle, ExprId, Function, FunctionId, Kind, ListRange};

/// Kind-specific payload of a stored node.
///
/// Operand slots that may be absent (the else-branch of `if` and
/// implication) are `Option`; every other slot is always present.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum ExprNode {
    Number(f64),
    Variable(u32),
    Bool(bool),
    /// Unary numeric operand, or the operand of `not`.
    Unary(ExprRef),
    /// Binary arithmetic, binary logical, relational, and logical count.
    Binary(ExprRef, ExprRef),
    /// `if` and implication.
    Conditional {
        condition: ExprRef,
        true_expr: ExprRef,
        false_expr: Option<ExprRef>,
    },
    PiecewiseLinear {
        slopes: ListRange,
        breakpoints: ListRange,
        var: ExprRef,
    },
    Iterated {
        args: ListRange,
    },
    Call {
        function: FunctionId,
        args: ListRange,
    },
}

/// Converts a store length into a 32-bit index.
///
/// # Panics
/// Panics if `len` does not fit in a `u32`; the store cannot address it.
#[inline]
#[track_caller]
fn to_u32(len: usize, what: &str) -> u32 {
    match u32::try_from(len) {
        Ok(value) => value,
        Err(_) => panic!("too many {what} in one expression store: {len}"),
    }
}

/// Contiguous storage for every expression built by one factory.
///
/// # Index Spaces
///
/// - `kinds`/`nodes`: parallel arrays indexed by [`ExprId`]
/// - `args`: flat operand list indexed by `ListRange`
/// - `numbers`: flat PL slope/breakpoint list indexed by `ListRange`
/// - `functions`: names indexed by [`FunctionId`]
#[derive(Clone, Default)]
pub struct ExprArena {
    /// Kind of every node (parallel with `nodes`).
    kinds: Vec<Kind>,
    /// Payload of every node (parallel with `kinds`).
    nodes: Vec<ExprNode>,
    /// Flattened operand lists of iterated nodes.
    args: Vec<ExprRef>,
    /// Flattened slopes and breakpoints of PL terms.
    numbers: Vec<f64>,
    /// Registered function names.
    functions: Vec<Box<str>>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `nodes` nodes and `list_items`
    /// operand-list entries before reallocating.
    pub fn with_capacity(nodes: usize, list_items: usize) -> Self {
        ExprArena {
            kinds: Vec::with_capacity(nodes),
            nodes: Vec::with_capacity(nodes),
            args: Vec::with_capacity(list_items),
            numbers: Vec::new(),
            functions: Vec::new(),
        }
    }

    // ===== Node allocation =====

    /// Append a finished node, returning its reference.
    #[inline]
    pub(crate) fn alloc(&mut self, kind: Kind, node: ExprNode) -> ExprRef {
        let id = ExprId::new(to_u32(self.nodes.len(), "expressions"));
        self.kinds.push(kind);
        self.nodes.push(node);
        ExprRef::new(id, kind)
    }

    /// Get a node's payload.
    ///
    /// # Panics
    /// Panics if `raw` is `None` (a null handle) or out of bounds.
    #[inline]
    #[track_caller]
    pub(crate) fn node<H: ExprHandle>(&self, raw: Option<ExprRef>) -> &ExprNode {
        match raw {
            Some(raw) => &self.nodes[raw.id.index()],
            None => panic!("null {} dereferenced", H::NAME),
        }
    }

    // ===== Side tables =====

    /// Append an operand list, return its range.
    pub(crate) fn alloc_args(&mut self, args: &[ExprRef]) -> ListRange {
        if args.is_empty() {
            return ListRange::EMPTY;
        }
        let start = to_u32(self.args.len(), "operands");
        self.args.extend_from_slice(args);
        ListRange::new(start, to_u32(args.len(), "operands"))
    }

    /// Get an operand list from a range.
    #[inline]
    pub(crate) fn args(&self, range: ListRange) -> &[ExprRef] {
        &self.args[range.bounds()]
    }

    /// Append slopes or breakpoints, return their range.
    pub(crate) fn alloc_numbers(&mut self, numbers: &[f64]) -> ListRange {
        let start = to_u32(self.numbers.len(), "breakpoints and slopes");
        self.numbers.extend_from_slice(numbers);
        ListRange::new(start, to_u32(numbers.len(), "breakpoints and slopes"))
    }

    /// Get slopes or breakpoints from a range.
    #[inline]
    pub(crate) fn numbers(&self, range: ListRange) -> &[f64] {
        &self.numbers[range.bounds()]
    }

    // ===== Functions =====

    /// Register a function name.
    pub(crate) fn alloc_function(&mut self, name: &str) -> FunctionId {
        let id = FunctionId::new(to_u32(self.functions.len(), "functions"));
        self.functions.push(name.into());
        id
    }

    /// Name of a registered function.
    #[inline]
    #[track_caller]
    pub(crate) fn function_name(&self, id: FunctionId) -> &str {
        &self.functions[id.index()]
    }

    /// Number of registered functions.
    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }

    /// Function registered at `index`, if any.
    pub fn function(&self, index: usize) -> Option<Function> {
        if index < self.functions.len() {
            Some(Function::new(FunctionId::new(to_u32(index, "functions"))))
        } else {
            None
        }
    }

    // ===== Introspection =====

    /// Number of stored nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes have been stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Kind of the node at `id`, if it exists.
    pub fn kind(&self, id: ExprId) -> Option<Kind> {
        self.kinds.get(id.index()).copied()
    }

    /// Generic handle for the node at `id`, if it exists.
    pub fn expr(&self, id: ExprId) -> Option<Expr> {
        self.kind(id)
            .map(|kind| <Expr as crate::handle::Sealed>::from_raw(ExprRef::new(id, kind)))
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("nodes", &self.nodes.len())
            .field("operands", &self.args.len())
            .field("numbers", &self.numbers.len())
            .field("functions", &self.functions.len())
            .finish()
    }
}

// SharedArena

/// Reference-counted, read-only expression store.
///
/// Produced by [`ExprFactory::into_shared`](crate::ExprFactory::into_shared)
/// once construction is finished. Cloning is O(1), and the store can be
/// read from several threads at once since nothing can mutate it anymore.
#[derive(Clone)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    /// Wrap a finished arena.
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedArena({:?})", &*self.0)
    }
}
