// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Reduction of a [`NetworkGraph`] to a minimum spanning forest.

use petgraph::unionfind::UnionFind;

use crate::{CorrespondenceKey, Error, NetworkGraph};

use super::derivation::CorrespondenceEdge;

impl<K> NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    /// Removes connections until the correspondence graph is a minimum
    /// spanning forest, weighted by the edge attribute `attribute_name`.
    ///
    /// Connector edges cost nothing and are always kept, so the members of a
    /// cluster stay joined.  Among connections of equal weight, the one that
    /// comes first in [`edge_endpoints`][NetworkGraph::edge_endpoints] order
    /// wins.  Connected sites stay connected.
    ///
    /// Because connector edges are taken first, a connection weighted zero
    /// or less is still removed when it closes a cycle through a connector.
    pub fn reduce_to_minimum_spanning_tree(&mut self, attribute_name: &str) -> Result<(), Error> {
        let weights = self.edge_attribute(attribute_name)?;
        let correspondence = &self.derived.correspondence;

        let mut components = UnionFind::<usize>::new(correspondence.node_count());
        let mut connections = vec![];
        for edge in correspondence.raw_edges() {
            match edge.weight {
                CorrespondenceEdge::Coherence => {
                    components.union(edge.source().index(), edge.target().index());
                }
                CorrespondenceEdge::Connection(index) => connections.push((
                    index.index(),
                    edge.source().index(),
                    edge.target().index(),
                )),
            }
        }

        // `sort_by` is stable, so equal weights keep their edge order.
        connections.sort_by(|a, b| weights[a.0].total_cmp(&weights[b.0]));

        let mut keep = vec![false; self.base.edge_count()];
        for (index, a, b) in connections {
            if components.union(a, b) {
                keep[index] = true;
            }
        }

        tracing::debug!(
            "Minimum spanning tree on {attribute_name:?} keeps {} of {} connections.",
            keep.iter().filter(|k| **k).count(),
            keep.len()
        );

        self.retain_connections(&keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::NetworkGraphBuilder;
    use crate::AdjacencyLists;
    use petgraph::algo::connected_components;
    use proptest::prelude::*;

    #[test]
    fn test_minimum_spanning_tree() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(0);
        let s1 = builder.source(1);
        let k0 = builder.sink(0);
        let k1 = builder.sink(1);
        builder
            .connect(s0, k0)
            .connect(s0, k1)
            .connect(s1, k0)
            .connect(s1, k1)
            .connect(k0, k1);
        let mut graph = builder.build()?;
        graph.set_edge_attribute("cost", vec![1.0, 5.0, 2.0, 3.0, 4.0])?;

        graph.reduce_to_minimum_spanning_tree("cost")?;

        assert_eq!(graph.edge_endpoints(), vec![(s0, k0), (s1, k0), (s1, k1)]);
        assert_eq!(graph.edge_attribute("cost")?, &[1.0, 2.0, 3.0]);

        Ok(())
    }

    #[test]
    fn test_ties_keep_edge_order() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(0);
        let k0 = builder.sink(0);
        let k1 = builder.sink(1);
        builder.connect(s0, k0).connect(s0, k1).connect(k0, k1);
        let mut graph = builder.build()?;
        graph.set_edge_attribute("cost", vec![1.0, 1.0, 1.0])?;

        graph.reduce_to_minimum_spanning_tree("cost")?;

        assert_eq!(graph.edge_endpoints(), vec![(s0, k0), (s0, k1)]);

        Ok(())
    }

    #[test]
    fn test_clusters_stay_joined() -> Result<(), Error> {
        // both sources share a key, so one of their sink connections is
        // redundant
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(7);
        let s1 = builder.source(7);
        let k0 = builder.sink(0);
        builder.connect(s0, k0).connect(s1, k0);
        let mut graph = builder.build()?;
        graph.set_edge_attribute("cost", vec![9.0, 2.0])?;

        graph.reduce_to_minimum_spanning_tree("cost")?;

        assert_eq!(graph.edge_endpoints(), vec![(s1, k0)]);
        assert_eq!(graph.number_of_connectors(), 1);

        Ok(())
    }

    #[test]
    fn test_connector_edges_win_over_non_positive_weights() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(5);
        let s1 = builder.source(5);
        let k0 = builder.sink(0);
        builder.connect(s0, k0).connect(s1, k0);
        let mut graph = builder.build()?;
        graph.set_edge_attribute("cost", vec![-1.0, -1.0])?;

        graph.reduce_to_minimum_spanning_tree("cost")?;

        assert_eq!(graph.edge_endpoints(), vec![(s0, k0)]);
        assert_eq!(graph.edge_attribute("cost")?, &[-1.0]);
        assert_eq!(graph.number_of_connectors(), 1);

        Ok(())
    }

    #[test]
    fn test_missing_attribute() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(0);
        let k0 = builder.sink(0);
        builder.connect(s0, k0);
        let mut graph = builder.build()?;

        assert!(graph
            .reduce_to_minimum_spanning_tree("length")
            .is_err_and(|e| e == Error::attribute_not_found("Edge attribute \"length\" not found.")));
        assert_eq!(graph.number_of_edges(), 1);

        Ok(())
    }

    fn arbitrary_graph() -> impl Strategy<Value = (Vec<u8>, Vec<u8>, Vec<(usize, usize)>, Vec<f64>)>
    {
        (1usize..6, 1usize..6).prop_flat_map(|(ns, nk)| {
            let n = ns + nk;
            (
                prop::collection::vec(0u8..3, ns),
                prop::collection::vec(0u8..3, nk),
                prop::collection::vec((0..n, 0..n), 0..20),
                prop::collection::vec(-5.0f64..10.0, 20),
            )
        })
    }

    proptest! {
        #[test]
        fn spanning_forest_keeps_components(
            (source_keys, sink_keys, pairs, weights) in arbitrary_graph()
        ) {
            let ns = source_keys.len();
            let mut builder = NetworkGraphBuilder::new();
            let sources = source_keys.iter().map(|k| builder.source(*k as u64)).collect::<Vec<_>>();
            let sinks = sink_keys.iter().map(|k| builder.sink(*k as u64)).collect::<Vec<_>>();
            let site = |i: usize| if i < ns { sources[i] } else { sinks[i - ns] };
            for (a, b) in pairs.iter().copied().filter(|(a, b)| a != b) {
                builder.connect(site(a), site(b));
            }
            let mut graph = builder.build().unwrap();
            let edges = graph.number_of_edges();
            graph.set_edge_attribute("w", weights[..edges].to_vec()).unwrap();

            let components = connected_components(&graph.derived.correspondence);
            let (sources_before, sinks_before) =
                (graph.number_of_sources(), graph.number_of_sinks());

            graph.reduce_to_minimum_spanning_tree("w").unwrap();

            let correspondence = &graph.derived.correspondence;
            prop_assert_eq!(connected_components(correspondence), components);
            prop_assert_eq!(
                correspondence.edge_count(),
                correspondence.node_count() - components
            );
            prop_assert!(graph.number_of_edges() <= edges);
            prop_assert_eq!(graph.number_of_sources(), sources_before);
            prop_assert_eq!(graph.number_of_sinks(), sinks_before);

            // a second reduction has nothing left to remove
            let reduced = graph.edge_endpoints();
            graph.reduce_to_minimum_spanning_tree("w").unwrap();
            prop_assert_eq!(graph.edge_endpoints(), reduced);
        }
    }

    #[test]
    fn test_round_trip_after_reduction() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(0);
        let k0 = builder.sink(0);
        let k1 = builder.sink(1);
        builder.connect(s0, k0).connect(s0, k1).connect(k1, k0);
        let mut graph = builder.build()?;
        graph.set_edge_attribute("cost", vec![3.0, 1.0, 2.0])?;

        graph.reduce_to_minimum_spanning_tree("cost")?;

        assert_eq!(
            graph.adjacency_lists(),
            AdjacencyLists::new(vec![vec![1]], vec![vec![]], vec![vec![1], vec![]])
        );

        Ok(())
    }
}
