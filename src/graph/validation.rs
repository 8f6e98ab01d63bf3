// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Consistency checks between the base graph, its attributes and the derived
//! graphs.  These run after every rebuild, so a failure here is always an
//! internal error.

use crate::{site_kind::Vertex, CorrespondenceKey, Error, SiteRef};

use super::NetworkGraph;

impl<K> NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    pub(super) fn validate(&self) -> Result<(), Error> {
        self.validate_base()?;
        self.validate_attributes()?;
        self.validate_derived()?;
        Ok(())
    }

    /// Sources must occupy `[0, ns)` and sinks `[ns, ns + nk)`.
    fn validate_base(&self) -> Result<(), Error> {
        let expected = (0..self.number_of_sources())
            .map(SiteRef::source)
            .chain((0..self.number_of_sinks()).map(SiteRef::sink));

        if !self.base.raw_nodes().iter().map(|n| n.weight).eq(expected) {
            return Err(Error::internal(
                "Base graph vertices don't follow the source-sink layout.",
            ));
        }
        Ok(())
    }

    fn validate_attributes(&self) -> Result<(), Error> {
        for (name, values) in &self.attributes {
            if values.len() != self.base.edge_count() {
                return Err(Error::internal(format!(
                    "Edge attribute {name:?} has {} values for {} edges.",
                    values.len(),
                    self.base.edge_count()
                )));
            }
        }
        Ok(())
    }

    fn validate_derived(&self) -> Result<(), Error> {
        let sources = &self.source_clusters;
        let sinks = &self.sink_clusters;
        let connectors = sources.number_of_coherent() + sinks.number_of_coherent();
        let coherence_edges = (0..sources.len())
            .filter(|c| sources.is_coherent(*c))
            .map(|c| sources.members(c).len())
            .chain(
                (0..sinks.len())
                    .filter(|c| sinks.is_coherent(*c))
                    .map(|c| sinks.members(c).len()),
            )
            .sum::<usize>();

        let correspondence = &self.derived.correspondence;
        if correspondence.node_count() != self.base.node_count() + connectors
            || correspondence.edge_count() != self.base.edge_count() + coherence_edges
        {
            return Err(Error::internal(format!(
                "Correspondence graph has {} vertices and {} edges, expected {} and {}.",
                correspondence.node_count(),
                correspondence.edge_count(),
                self.base.node_count() + connectors,
                self.base.edge_count() + coherence_edges
            )));
        }

        let max_flow = &self.derived.max_flow;
        if max_flow.node_count() != correspondence.node_count() + 2
            || max_flow.edge_count() != correspondence.edge_count() + sources.len() + sinks.len()
        {
            return Err(Error::internal(format!(
                "Max-flow graph has {} vertices and {} edges, expected {} and {}.",
                max_flow.node_count(),
                max_flow.edge_count(),
                correspondence.node_count() + 2,
                correspondence.edge_count() + sources.len() + sinks.len()
            )));
        }
        if max_flow[self.derived.infinite_source] != Vertex::InfiniteSource
            || max_flow[self.derived.infinite_sink] != Vertex::InfiniteSink
        {
            return Err(Error::internal(
                "Super vertices of the max-flow graph are misplaced.",
            ));
        }

        Ok(())
    }
}
