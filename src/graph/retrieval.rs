// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving sites and connections from a [`NetworkGraph`].

use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;

use crate::iterators::{Connections, Vertices};
use crate::{AdjacencyLists, CorrespondenceKey, Error, NetworkGraph, SiteKind, SiteRef};

use super::derivation::base_vertex;

/// Site and connection retrieval.
impl<K> NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    /// Returns the number of sources the graph was created with.
    pub fn number_of_sources(&self) -> usize {
        self.source_clusters.number_of_sites()
    }

    /// Returns the number of sinks the graph was created with.
    pub fn number_of_sinks(&self) -> usize {
        self.sink_clusters.number_of_sites()
    }

    /// Returns the number of real sites, which excludes connector and super
    /// vertices.
    pub fn number_of_vertices(&self) -> usize {
        self.base.node_count()
    }

    /// Returns the number of real connections.
    pub fn number_of_edges(&self) -> usize {
        self.base.edge_count()
    }

    /// Returns the number of distinct source correspondence keys.
    pub fn number_of_source_clusters(&self) -> usize {
        self.source_clusters.len()
    }

    /// Returns the number of distinct sink correspondence keys.
    pub fn number_of_sink_clusters(&self) -> usize {
        self.sink_clusters.len()
    }

    /// Returns the number of connector vertices, one for each correspondence
    /// key shared by more than one site.
    pub fn number_of_connectors(&self) -> usize {
        self.source_clusters.number_of_coherent() + self.sink_clusters.number_of_coherent()
    }

    /// Returns the distinct source correspondence keys, in order of first
    /// appearance.  This is the order of
    /// [`FlowSolution::source_cluster_flow`][crate::FlowSolution].
    pub fn source_cluster_keys(&self) -> &[K] {
        self.source_clusters.keys()
    }

    /// Returns the distinct sink correspondence keys, in order of first
    /// appearance.
    pub fn sink_cluster_keys(&self) -> &[K] {
        self.sink_clusters.keys()
    }

    /// Returns an iterator over the sites in the graph, sources first.
    pub fn vertices(&self) -> Vertices {
        Vertices {
            iter: self.base.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the endpoints of the connections in the
    /// graph, in edge order.
    pub fn connections(&self) -> Connections {
        Connections {
            graph: &self.base,
            iter: self.base.raw_edges().iter(),
        }
    }

    /// Returns the endpoints of every connection, in edge order.
    ///
    /// Edge attributes and connection flows are aligned with this list.
    pub fn edge_endpoints(&self) -> Vec<(SiteRef, SiteRef)> {
        self.connections().collect()
    }

    /// Returns the connections in the same form as accepted by
    /// [`try_new`][NetworkGraph::try_new].
    ///
    /// Each list is sorted and free of duplicates.  Source–source and
    /// sink–sink connections are listed once, under the lower index.
    pub fn adjacency_lists(&self) -> AdjacencyLists<usize> {
        let mut source_sink = vec![BTreeSet::new(); self.number_of_sources()];
        let mut source_source = vec![BTreeSet::new(); self.number_of_sources()];
        let mut sink_sink = vec![BTreeSet::new(); self.number_of_sinks()];

        for (a, b) in self.connections() {
            match (a.kind, b.kind) {
                (SiteKind::Source, SiteKind::Sink) => source_sink[a.index].insert(b.index),
                (SiteKind::Sink, SiteKind::Source) => source_sink[b.index].insert(a.index),
                (SiteKind::Source, SiteKind::Source) => {
                    source_source[a.index.min(b.index)].insert(a.index.max(b.index))
                }
                (SiteKind::Sink, SiteKind::Sink) => {
                    sink_sink[a.index.min(b.index)].insert(a.index.max(b.index))
                }
            };
        }

        let into_lists = |sets: Vec<BTreeSet<usize>>| {
            sets.into_iter()
                .map(|s| s.into_iter().collect())
                .collect::<Vec<Vec<usize>>>()
        };
        AdjacencyLists::new(
            into_lists(source_sink),
            into_lists(source_source),
            into_lists(sink_sink),
        )
    }

    /// Returns the vertex of `site` in the base graph.
    pub(crate) fn site_vertex(&self, site: SiteRef) -> Result<NodeIndex, Error> {
        let count = match site.kind {
            SiteKind::Source => self.number_of_sources(),
            SiteKind::Sink => self.number_of_sinks(),
        };
        if site.index >= count {
            return Err(Error::site_not_found(format!("Site {site} not found.")));
        }
        Ok(base_vertex(self.number_of_sources(), site))
    }
}
