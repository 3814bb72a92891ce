//! Factory configuration.

/// Construction-time options for an [`ExprFactory`](crate::ExprFactory).
///
/// Every field has a neutral default; `ExprFactory::new()` uses
/// `FactoryConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Node slots reserved up front.
    pub node_capacity: usize,
    /// Operand-list slots reserved up front.
    pub list_capacity: usize,
    /// Return the existing function when `add_function` sees a name again.
    /// Off by default: every call registers a new function.
    pub dedupe_functions: bool,
}

impl FactoryConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `nodes` expression nodes.
    pub fn with_node_capacity(mut self, nodes: usize) -> Self {
        self.node_capacity = nodes;
        self
    }

    /// Reserve room for `items` operand-list entries.
    pub fn with_list_capacity(mut self, items: usize) -> Self {
        self.list_capacity = items;
        self
    }

    /// Enable or disable function-name deduplication.
    pub fn with_dedupe_functions(mut self, enabled: bool) -> Self {
        self.dedupe_functions = enabled;
        self
    }
}
