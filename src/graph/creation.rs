// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`NetworkGraph`] instances from given connections and
//! correspondence keys.

use crate::{AdjacencyLists, CorrespondenceKey, Error, NetworkGraphConfig, SiteKind, SiteRef};

use super::{derivation::base_vertex, BaseGraph, Clusters, EdgeAttributes, NetworkGraph};

/// `NetworkGraph` instantiation.
impl<K> NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    /// Creates a new [`NetworkGraph`] from the given connections and
    /// correspondence keys.
    ///
    /// The number of sources is `adjacency.source_source.len()` and the
    /// number of sinks is `adjacency.sink_sink.len()`.  There must be one
    /// `source_sink` list and one correspondence key per source, and one
    /// correspondence key per sink.
    ///
    /// Sites that share a correspondence key are treated as one coherent
    /// cluster in flow computations.
    ///
    /// Returns an error if the shapes don't agree, or if a connection refers
    /// to a missing site or connects a site to itself.
    pub fn try_new(
        adjacency: AdjacencyLists<usize>,
        source_correspondence: Vec<K>,
        sink_correspondence: Vec<K>,
        config: NetworkGraphConfig,
    ) -> Result<Self, Error> {
        let number_of_sources = adjacency.source_source.len();
        let number_of_sinks = adjacency.sink_sink.len();

        if adjacency.source_sink.len() != number_of_sources {
            return Err(Error::shape_mismatch(format!(
                "Expected {number_of_sources} source-sink adjacency lists, got {}.",
                adjacency.source_sink.len()
            )));
        }
        if source_correspondence.len() != number_of_sources {
            return Err(Error::shape_mismatch(format!(
                "Expected {number_of_sources} source correspondence keys, got {}.",
                source_correspondence.len()
            )));
        }
        if sink_correspondence.len() != number_of_sinks {
            return Err(Error::shape_mismatch(format!(
                "Expected {number_of_sinks} sink correspondence keys, got {}.",
                sink_correspondence.len()
            )));
        }
        if !(config.unrestricted_capacity.is_finite() && config.unrestricted_capacity > 0.0) {
            return Err(Error::invalid_input(format!(
                "Unrestricted capacity must be positive and finite, got {}.",
                config.unrestricted_capacity
            )));
        }

        let base = Self::create_base_graph(&adjacency, number_of_sources, number_of_sinks)?;

        let mut ng = Self {
            base: BaseGraph::default(),
            attributes: EdgeAttributes::new(),
            source_clusters: Clusters::new(SiteKind::Source, source_correspondence),
            sink_clusters: Clusters::new(SiteKind::Sink, sink_correspondence),
            derived: Default::default(),
            config,
        };
        ng.replace_base(base, EdgeAttributes::new())?;

        Ok(ng)
    }

    fn create_base_graph(
        adjacency: &AdjacencyLists<usize>,
        number_of_sources: usize,
        number_of_sinks: usize,
    ) -> Result<BaseGraph, Error> {
        let mut graph =
            BaseGraph::with_capacity(number_of_sources + number_of_sinks, adjacency.len());

        for index in 0..number_of_sources {
            graph.add_node(SiteRef::source(index));
        }
        for index in 0..number_of_sinks {
            graph.add_node(SiteRef::sink(index));
        }

        let counts = (number_of_sources, number_of_sinks);
        Self::add_connections(
            &mut graph,
            &adjacency.source_sink,
            (SiteKind::Source, SiteKind::Sink),
            counts,
        )?;
        Self::add_connections(
            &mut graph,
            &adjacency.source_source,
            (SiteKind::Source, SiteKind::Source),
            counts,
        )?;
        Self::add_connections(
            &mut graph,
            &adjacency.sink_sink,
            (SiteKind::Sink, SiteKind::Sink),
            counts,
        )?;

        Ok(graph)
    }

    fn add_connections(
        graph: &mut BaseGraph,
        lists: &[Vec<usize>],
        (from_kind, to_kind): (SiteKind, SiteKind),
        (number_of_sources, number_of_sinks): (usize, usize),
    ) -> Result<(), Error> {
        let limit = match to_kind {
            SiteKind::Source => number_of_sources,
            SiteKind::Sink => number_of_sinks,
        };

        for (from, targets) in lists.iter().enumerate() {
            let from = SiteRef {
                kind: from_kind,
                index: from,
            };
            for &to in targets {
                let to = SiteRef {
                    kind: to_kind,
                    index: to,
                };

                if to.index >= limit {
                    return Err(Error::invalid_input(format!(
                        "Connection:{from} -> {to} Can't find a {to_kind} with index {}.",
                        to.index
                    )));
                }
                if from == to {
                    return Err(Error::invalid_input(format!(
                        "Connection:{from} -> {to} Can't connect a site to itself."
                    )));
                }

                graph.add_edge(
                    base_vertex(number_of_sources, from),
                    base_vertex(number_of_sources, to),
                    (),
                );
            }
        }

        Ok(())
    }
}
