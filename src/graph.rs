// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the feasible connections between heat sources
//! and heat sinks, with the derived graphs needed to merge coherent sites and
//! to compute maximum flows.

mod attributes;
mod creation;
mod derivation;
mod max_flow;
mod mutation;
mod retrieval;
mod spanning_tree;
mod validation;

pub mod iterators;

#[cfg(test)]
mod test_utils;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::graph::UnGraph;

use crate::{NetworkGraphConfig, SiteRef};

pub use max_flow::FlowSolution;

pub(crate) use derivation::{Clusters, DerivedGraphs};

/// The real topology: one vertex per site, sources first, then sinks, and
/// one edge per connection, in the order the connections were given.
pub(crate) type BaseGraph = UnGraph<SiteRef, ()>;

/// Edge attribute values by attribute name.  Each list is aligned with the
/// edges of the [`BaseGraph`].
pub(crate) type EdgeAttributes = BTreeMap<String, Vec<f64>>;

/// A value that marks sites as part of the same physically coherent cluster.
///
/// Implemented for every type that is `Eq + Hash + Clone + Debug`, so
/// integers, strings or custom ids can be used directly.
pub trait CorrespondenceKey: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> CorrespondenceKey for T {}

/// Three adjacency lists describing connections between sources and sinks,
/// or values aligned with such connections.
///
/// With `T = usize`, `source_sink[i]` lists the sinks connected to source
/// `i`, `source_source[i]` the other sources connected to source `i`, and
/// `sink_sink[i]` the other sinks connected to sink `i`.  The number of
/// sources is `source_source.len()`, and the number of sinks is
/// `sink_sink.len()`.
///
/// With `T = f64`, the lists have the same shape and hold one attribute
/// value per connection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyLists<T> {
    /// Sinks connected to each source.
    pub source_sink: Vec<Vec<T>>,
    /// Other sources connected to each source.
    pub source_source: Vec<Vec<T>>,
    /// Other sinks connected to each sink.
    pub sink_sink: Vec<Vec<T>>,
}

impl<T> AdjacencyLists<T> {
    /// Creates adjacency lists from the three per-site lists.
    pub fn new(
        source_sink: Vec<Vec<T>>,
        source_source: Vec<Vec<T>>,
        sink_sink: Vec<Vec<T>>,
    ) -> Self {
        Self {
            source_sink,
            source_source,
            sink_sink,
        }
    }

    /// Iterates over all values, `source_sink` first, then `source_source`,
    /// then `sink_sink`.  This is the order in which connections become
    /// edges.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.source_sink
            .iter()
            .chain(self.source_source.iter())
            .chain(self.sink_sink.iter())
            .flatten()
    }

    /// Returns the total number of values in the three lists.
    pub fn len(&self) -> usize {
        self.source_sink
            .iter()
            .chain(self.source_source.iter())
            .chain(self.sink_sink.iter())
            .map(Vec::len)
            .sum()
    }

    /// Returns `true` if none of the three lists holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A graph of heat sources, heat sinks and the feasible connections between
/// them.
///
/// Besides the real topology, the graph holds two derived graphs that are
/// rebuilt from it after every change:
///
/// - the *correspondence graph*, in which all sites sharing a correspondence
///   key are linked to one extra connector vertex, and
/// - the *max-flow graph*, which adds an infinite source linked to every
///   source (or source connector) and an infinite sink linked to every sink
///   (or sink connector).
///
/// Methods take `&mut self` to mutate, so a graph can't be changed while it
/// is being read.  Independent problems need independent graphs.
pub struct NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    base: BaseGraph,
    attributes: EdgeAttributes,
    source_clusters: Clusters<K>,
    sink_clusters: Clusters<K>,
    derived: DerivedGraphs,
    config: NetworkGraphConfig,
}
