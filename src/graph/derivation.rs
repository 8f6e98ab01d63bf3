// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Derivation of the correspondence graph and the max-flow graph from the
//! base graph.
//!
//! Derived graphs are never edited in place.  Every change to the base graph
//! goes through [`NetworkGraph::replace_base`][super::NetworkGraph], which
//! derives both of them again.

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use crate::{site_kind::Vertex, CorrespondenceKey, SiteKind, SiteRef};

use super::BaseGraph;

/// Groups the sources or the sinks of a graph by their correspondence keys.
///
/// Clusters are numbered in the order in which their keys first appear.
#[derive(Clone, Debug)]
pub(crate) struct Clusters<K>
where
    K: CorrespondenceKey,
{
    kind: SiteKind,
    keys: Vec<K>,
    of_site: Vec<usize>,
    members: Vec<Vec<usize>>,
}

impl<K> Clusters<K>
where
    K: CorrespondenceKey,
{
    pub(crate) fn new(kind: SiteKind, site_keys: Vec<K>) -> Self {
        let mut positions: HashMap<K, usize> = HashMap::new();
        let mut keys = vec![];
        let mut members: Vec<Vec<usize>> = vec![];
        let mut of_site = Vec::with_capacity(site_keys.len());

        for (site, key) in site_keys.into_iter().enumerate() {
            let cluster = match positions.get(&key) {
                Some(&cluster) => cluster,
                None => {
                    positions.insert(key.clone(), keys.len());
                    keys.push(key);
                    members.push(vec![]);
                    keys.len() - 1
                }
            };
            members[cluster].push(site);
            of_site.push(cluster);
        }

        Self {
            kind,
            keys,
            of_site,
            members,
        }
    }

    pub(crate) fn kind(&self) -> SiteKind {
        self.kind
    }

    /// Number of clusters.
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn number_of_sites(&self) -> usize {
        self.of_site.len()
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    pub(crate) fn members(&self, cluster: usize) -> &[usize] {
        &self.members[cluster]
    }

    pub(crate) fn cluster_of(&self, site: usize) -> usize {
        self.of_site[site]
    }

    /// A cluster is coherent if it has more than one member, and only then
    /// gets a connector vertex.
    pub(crate) fn is_coherent(&self, cluster: usize) -> bool {
        self.members[cluster].len() > 1
    }

    pub(crate) fn number_of_coherent(&self) -> usize {
        (0..self.len()).filter(|c| self.is_coherent(*c)).count()
    }

    /// Sums per-site values into per-cluster values.
    pub(crate) fn aggregate(&self, values: &[f64]) -> Vec<f64> {
        let mut aggregated = vec![0.0; self.len()];
        for (site, value) in values.iter().enumerate() {
            aggregated[self.of_site[site]] += value;
        }
        aggregated
    }
}

/// Where an edge of the correspondence graph comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum CorrespondenceEdge {
    /// A real connection, with its index in the base graph.
    Connection(EdgeIndex),
    /// Links a cluster member to its connector.
    Coherence,
}

/// Where an edge of the max-flow graph comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FlowEdge {
    Connection(EdgeIndex),
    Coherence,
    /// From the infinite source to the supply vertex of a source cluster.
    Supply(usize),
    /// From the demand vertex of a sink cluster to the infinite sink.
    Demand(usize),
}

/// The graphs derived from a base graph and the correspondence clusters.
#[derive(Clone, Debug, Default)]
pub(crate) struct DerivedGraphs {
    pub(crate) correspondence: UnGraph<Vertex, CorrespondenceEdge>,
    pub(crate) max_flow: UnGraph<Vertex, FlowEdge>,
    pub(crate) infinite_source: NodeIndex,
    pub(crate) infinite_sink: NodeIndex,
}

impl DerivedGraphs {
    /// Derives the correspondence graph from `base`, then the max-flow graph
    /// from the correspondence graph.
    pub(crate) fn derive<K>(base: &BaseGraph, sources: &Clusters<K>, sinks: &Clusters<K>) -> Self
    where
        K: CorrespondenceKey,
    {
        let (correspondence, source_connectors, sink_connectors) =
            Self::correspondence_graph(base, sources, sinks);
        let (max_flow, infinite_source, infinite_sink) = Self::max_flow_graph(
            &correspondence,
            sources,
            sinks,
            &source_connectors,
            &sink_connectors,
        );

        tracing::debug!(
            "Derived graphs: {} base edges, {} connectors, {} max-flow vertices, {} max-flow edges.",
            base.edge_count(),
            correspondence.node_count() - base.node_count(),
            max_flow.node_count(),
            max_flow.edge_count()
        );

        Self {
            correspondence,
            max_flow,
            infinite_source,
            infinite_sink,
        }
    }

    /// Copies the base graph and adds one connector per coherent cluster,
    /// source connectors before sink connectors.
    ///
    /// Returns the graph and the connector of each source and sink cluster.
    #[allow(clippy::type_complexity)]
    fn correspondence_graph<K>(
        base: &BaseGraph,
        sources: &Clusters<K>,
        sinks: &Clusters<K>,
    ) -> (
        UnGraph<Vertex, CorrespondenceEdge>,
        Vec<Option<NodeIndex>>,
        Vec<Option<NodeIndex>>,
    )
    where
        K: CorrespondenceKey,
    {
        let mut graph = base.map(
            |_, site| Vertex::Site(*site),
            |index, _| CorrespondenceEdge::Connection(index),
        );

        let mut connectors = [vec![], vec![]];
        for (clusters, connectors) in [sources, sinks].into_iter().zip(connectors.iter_mut()) {
            for cluster in 0..clusters.len() {
                if !clusters.is_coherent(cluster) {
                    connectors.push(None);
                    continue;
                }
                let connector = graph.add_node(Vertex::Connector {
                    kind: clusters.kind(),
                    cluster,
                });
                for &member in clusters.members(cluster) {
                    let site = base_vertex(
                        sources.number_of_sites(),
                        SiteRef {
                            kind: clusters.kind(),
                            index: member,
                        },
                    );
                    graph.add_edge(site, connector, CorrespondenceEdge::Coherence);
                }
                connectors.push(Some(connector));
            }
        }

        let [source_connectors, sink_connectors] = connectors;
        (graph, source_connectors, sink_connectors)
    }

    /// Copies the correspondence graph and adds the infinite source and the
    /// infinite sink.
    ///
    /// Each source cluster gets exactly one supply edge, to its connector if
    /// it is coherent and to its only site otherwise.  Sink clusters get
    /// demand edges the same way.
    fn max_flow_graph<K>(
        correspondence: &UnGraph<Vertex, CorrespondenceEdge>,
        sources: &Clusters<K>,
        sinks: &Clusters<K>,
        source_connectors: &[Option<NodeIndex>],
        sink_connectors: &[Option<NodeIndex>],
    ) -> (UnGraph<Vertex, FlowEdge>, NodeIndex, NodeIndex)
    where
        K: CorrespondenceKey,
    {
        let mut graph = correspondence.map(
            |_, vertex| *vertex,
            |_, edge| match edge {
                CorrespondenceEdge::Connection(index) => FlowEdge::Connection(*index),
                CorrespondenceEdge::Coherence => FlowEdge::Coherence,
            },
        );

        let infinite_source = graph.add_node(Vertex::InfiniteSource);
        let infinite_sink = graph.add_node(Vertex::InfiniteSink);

        for (cluster, connector) in source_connectors.iter().enumerate() {
            let supply = connector.unwrap_or_else(|| {
                base_vertex(
                    sources.number_of_sites(),
                    SiteRef::source(sources.members(cluster)[0]),
                )
            });
            graph.add_edge(infinite_source, supply, FlowEdge::Supply(cluster));
        }
        for (cluster, connector) in sink_connectors.iter().enumerate() {
            let demand = connector.unwrap_or_else(|| {
                base_vertex(
                    sources.number_of_sites(),
                    SiteRef::sink(sinks.members(cluster)[0]),
                )
            });
            graph.add_edge(demand, infinite_sink, FlowEdge::Demand(cluster));
        }

        (graph, infinite_source, infinite_sink)
    }
}

/// Returns the vertex of `site` in the base graph layout: sources occupy
/// `[0, ns)` and sinks `[ns, ns + nk)`.
pub(crate) fn base_vertex(number_of_sources: usize, site: SiteRef) -> NodeIndex {
    match site.kind {
        SiteKind::Source => NodeIndex::new(site.index),
        SiteKind::Sink => NodeIndex::new(number_of_sources + site.index),
    }
}
