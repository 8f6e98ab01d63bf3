// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for changing the connections of a [`NetworkGraph`].
//!
//! Every change builds a new base graph and passes it to `replace_base`,
//! which derives the correspondence and max-flow graphs again before the
//! method returns.

use crate::{CorrespondenceKey, Error, SiteRef};

use super::{BaseGraph, DerivedGraphs, EdgeAttributes, NetworkGraph};

impl<K> NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    /// Deletes one connection for each given pair of sites.
    ///
    /// The order of the sites in a pair doesn't matter.  If a pair is
    /// connected more than once, the first connection in
    /// [`edge_endpoints`][NetworkGraph::edge_endpoints] order is deleted.
    ///
    /// Returns an error, and leaves the graph unchanged, if a site doesn't
    /// exist or a pair isn't connected.
    pub fn delete_edges(&mut self, edges: &[(SiteRef, SiteRef)]) -> Result<(), Error> {
        let mut keep = vec![true; self.base.edge_count()];

        for &(first, second) in edges {
            let a = self.site_vertex(first)?;
            let b = self.site_vertex(second)?;

            let found = self
                .base
                .raw_edges()
                .iter()
                .zip(&keep)
                .position(|(e, k)| {
                    *k && ((e.source() == a && e.target() == b)
                        || (e.source() == b && e.target() == a))
                });
            match found {
                Some(i) => keep[i] = false,
                None => {
                    return Err(Error::edge_not_found(format!(
                        "No connection between {first} and {second}."
                    )))
                }
            }
        }

        self.retain_connections(&keep)
    }

    /// Rebuilds the base graph with the connections for which `keep` is
    /// `true`, in their current order, together with their attributes.
    pub(super) fn retain_connections(&mut self, keep: &[bool]) -> Result<(), Error> {
        if keep.len() != self.base.edge_count() {
            return Err(Error::internal(format!(
                "Got {} retain flags for {} edges.",
                keep.len(),
                self.base.edge_count()
            )));
        }

        let retained = keep.iter().filter(|k| **k).count();
        let mut base = BaseGraph::with_capacity(self.base.node_count(), retained);
        for node in self.base.raw_nodes() {
            base.add_node(node.weight);
        }
        for (edge, _) in self.base.raw_edges().iter().zip(keep).filter(|(_, k)| **k) {
            base.add_edge(edge.source(), edge.target(), ());
        }

        let attributes = self
            .attributes
            .iter()
            .map(|(name, values)| {
                let values = values
                    .iter()
                    .zip(keep)
                    .filter_map(|(value, k)| k.then_some(*value))
                    .collect();
                (name.clone(), values)
            })
            .collect::<EdgeAttributes>();

        tracing::debug!(
            "Keeping {retained} of {} connections.",
            self.base.edge_count()
        );

        self.replace_base(base, attributes)
    }

    /// Replaces the base graph and its attributes, and derives the
    /// correspondence and max-flow graphs from them.
    pub(super) fn replace_base(
        &mut self,
        base: BaseGraph,
        attributes: EdgeAttributes,
    ) -> Result<(), Error> {
        self.derived = DerivedGraphs::derive(&base, &self.source_clusters, &self.sink_clusters);
        self.base = base;
        self.attributes = attributes;

        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::NetworkGraphBuilder;
    use crate::AdjacencyLists;

    #[test]
    fn test_delete_edges() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(0);
        let s1 = builder.source(1);
        let k0 = builder.sink(0);
        let k1 = builder.sink(0);
        builder
            .connect(s0, k0)
            .connect(s0, k1)
            .connect(s1, k1)
            .connect(s0, s1)
            .connect(k0, k1);
        let mut graph = builder.build()?;
        graph.add_edge_attribute(
            "distance",
            &AdjacencyLists::new(
                vec![vec![1.0, 2.0], vec![3.0]],
                vec![vec![4.0], vec![]],
                vec![vec![5.0], vec![]],
            ),
        )?;

        // reversed orientation matches too
        graph.delete_edges(&[(k1, s0), (s0, s1)])?;

        assert_eq!(
            graph.edge_endpoints(),
            vec![(s0, k0), (s1, k1), (k0, k1)]
        );
        assert_eq!(graph.edge_attribute("distance")?, &[1.0, 3.0, 5.0]);
        assert_eq!(
            graph.adjacency_lists(),
            AdjacencyLists::new(vec![vec![0], vec![1]], vec![vec![], vec![]], vec![vec![1], vec![]])
        );

        // the sink cluster is still merged behind one connector
        assert_eq!(graph.number_of_connectors(), 1);
        assert_eq!(graph.number_of_sources(), 2);
        assert_eq!(graph.number_of_sinks(), 2);

        Ok(())
    }

    #[test]
    fn test_delete_edges_errors() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(0);
        let k0 = builder.sink(0);
        let k1 = builder.sink(1);
        builder.connect(s0, k0);
        let mut graph = builder.build()?;

        assert!(graph
            .delete_edges(&[(s0, k0), (s0, k1)])
            .is_err_and(|e| e == Error::edge_not_found("No connection between (source, 0) and (sink, 1).")));
        // nothing was deleted
        assert_eq!(graph.number_of_edges(), 1);

        assert!(graph
            .delete_edges(&[(s0, SiteRef::sink(2))])
            .is_err_and(|e| e == Error::site_not_found("Site (sink, 2) not found.")));

        // a pair can only be deleted as often as it is connected
        assert!(graph
            .delete_edges(&[(s0, k0), (k0, s0)])
            .is_err_and(|e| e == Error::edge_not_found("No connection between (sink, 0) and (source, 0).")));

        graph.delete_edges(&[(k0, s0)])?;
        assert_eq!(graph.number_of_edges(), 0);
        assert!(graph.edge_endpoints().is_empty());

        Ok(())
    }

    #[test]
    fn test_delete_parallel_edges() -> Result<(), Error> {
        let mut builder = NetworkGraphBuilder::new();
        let s0 = builder.source(0);
        let k0 = builder.sink(0);
        builder.connect(s0, k0).connect(s0, k0);
        let mut graph = builder.build()?;
        graph.add_edge_attribute(
            "cost",
            &AdjacencyLists::new(vec![vec![10.0, 20.0]], vec![vec![]], vec![vec![]]),
        )?;

        graph.delete_edges(&[(s0, k0)])?;
        assert_eq!(graph.edge_attribute("cost")?, &[20.0]);

        Ok(())
    }
}
