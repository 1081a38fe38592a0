//! Configuration carried by every graph handle.
//!
//! A handle keeps the configuration it was created with; copies and graphs
//! derived from it (operators, subgraphs) inherit it.

use rand::{SeedableRng, rngs::StdRng};

/// Options passed through to engine calls.
///
/// # Default Configuration
///
/// ```rust
/// use graphbind::EngineConfig;
/// let config = EngineConfig::default();
/// assert!(config.seed.is_none());
/// assert!(config.reserve_edge_capacity.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for random generators and random layouts
    ///
    /// **Default:** `None` (entropy)
    ///
    /// With a seed, every random constructor called with this configuration
    /// produces the same graph.
    ///
    /// ```rust
    /// use graphbind::{ErdosRenyi, GraphConfig, GraphFactory};
    ///
    /// let factory = GraphFactory::new(GraphConfig::seeded(42));
    /// let a = factory.erdos_renyi(20, ErdosRenyi::Gnp(0.3), false, false)?;
    /// let b = factory.erdos_renyi(20, ErdosRenyi::Gnp(0.3), false, false)?;
    /// assert_eq!(a.get_edgelist(), b.get_edgelist());
    /// # Ok::<(), graphbind::GraphError>(())
    /// ```
    pub seed: Option<u64>,

    /// Optional edge capacity reserved when the engine allocates a graph
    ///
    /// **Default:** `None`
    ///
    /// This is a hint, not a limit.
    pub reserve_edge_capacity: Option<usize>,
}

impl EngineConfig {
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Attribute store behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeConfig {
    /// Whether a single value assigned to a multi-element selection is
    /// repeated over the whole selection
    ///
    /// **Default:** `true`
    pub broadcast_single_value: bool,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            broadcast_single_value: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphConfig {
    pub engine: EngineConfig,
    pub attributes: AttributeConfig,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            engine: EngineConfig {
                seed: Some(seed),
                ..EngineConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn with_edge_capacity(mut self, capacity: usize) -> Self {
        self.engine.reserve_edge_capacity = Some(capacity);
        self
    }

    pub fn with_broadcast(mut self, broadcast: bool) -> Self {
        self.attributes.broadcast_single_value = broadcast;
        self
    }
}
