// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Maximum flow from all sources to all sinks of a [`NetworkGraph`].

mod push_relabel;

use crate::{CorrespondenceKey, Error, NetworkGraph, SiteKind, SiteRef};

use super::derivation::{Clusters, FlowEdge};
use push_relabel::ResidualNetwork;

/// The flows of a maximum-flow solution, in the units of the capacities
/// passed to [`NetworkGraph::maximum_flow`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowSolution {
    /// Flow out of each source, in source order.
    pub source_flow: Vec<f64>,

    /// Flow into each sink, in sink order.
    pub sink_flow: Vec<f64>,

    /// Flow along each connection, aligned with
    /// [`NetworkGraph::edge_endpoints`].  Positive values flow from the first
    /// endpoint to the second.
    pub connection_flow: Vec<f64>,

    /// Flow out of each source cluster, in the order of
    /// [`NetworkGraph::source_cluster_keys`].
    pub source_cluster_flow: Vec<f64>,

    /// Flow into each sink cluster, in the order of
    /// [`NetworkGraph::sink_cluster_keys`].
    pub sink_cluster_flow: Vec<f64>,
}

impl FlowSolution {
    fn zeros(sources: usize, sinks: usize, connections: usize, clusters: (usize, usize)) -> Self {
        Self {
            source_flow: vec![0.0; sources],
            sink_flow: vec![0.0; sinks],
            connection_flow: vec![0.0; connections],
            source_cluster_flow: vec![0.0; clusters.0],
            sink_cluster_flow: vec![0.0; clusters.1],
        }
    }

    /// Returns the total flow from all sources to all sinks.
    pub fn total_flow(&self) -> f64 {
        self.sink_cluster_flow.iter().sum()
    }
}

impl<K> NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    /// Computes a maximum flow from the sources to the sinks.
    ///
    /// Each source can supply at most its capacity, and each sink can take
    /// at most its capacity.  Connections have no capacity limit.  Sites
    /// sharing a correspondence key supply or take their summed capacities
    /// as one, and the flow of a cluster is split among its members in
    /// proportion to their capacities.
    ///
    /// Returns an error if the number of capacities doesn't match the number
    /// of sites, or if a capacity is negative or not finite.
    pub fn maximum_flow(
        &self,
        source_capacities: &[f64],
        sink_capacities: &[f64],
    ) -> Result<FlowSolution, Error> {
        self.validate_capacities(source_capacities, SiteKind::Source)?;
        self.validate_capacities(sink_capacities, SiteKind::Sink)?;

        let supply = self.source_clusters.aggregate(source_capacities);
        let demand = self.sink_clusters.aggregate(sink_capacities);

        let mut solution = FlowSolution::zeros(
            self.number_of_sources(),
            self.number_of_sinks(),
            self.number_of_edges(),
            (supply.len(), demand.len()),
        );

        let largest = supply.iter().chain(&demand).fold(0.0, |a: f64, b| a.max(*b));
        if largest == 0.0 {
            tracing::debug!("All capacities are zero, returning an empty flow.");
            return Ok(solution);
        }

        // Normalized capacities are at most 1, so their sum bounds every
        // flow.
        let supply = supply.iter().map(|c| c / largest).collect::<Vec<_>>();
        let demand = demand.iter().map(|c| c / largest).collect::<Vec<_>>();
        let unrestricted = self
            .config
            .unrestricted_capacity
            .max(supply.iter().chain(&demand).sum());

        let graph = &self.derived.max_flow;
        let mut network = ResidualNetwork::new(graph.node_count());
        let arcs = graph
            .raw_edges()
            .iter()
            .map(|edge| {
                let (from, to) = (edge.source().index(), edge.target().index());
                match edge.weight {
                    FlowEdge::Connection(_) | FlowEdge::Coherence => {
                        network.add_pair(from, to, unrestricted, unrestricted)
                    }
                    FlowEdge::Supply(cluster) => network.add_pair(from, to, supply[cluster], 0.0),
                    FlowEdge::Demand(cluster) => network.add_pair(from, to, demand[cluster], 0.0),
                }
            })
            .collect::<Vec<_>>();

        let total = network.solve(
            self.derived.infinite_source.index(),
            self.derived.infinite_sink.index(),
        ) * largest;

        for (edge, arc) in graph.raw_edges().iter().zip(arcs) {
            let flow = network.flow(arc) * largest;
            match edge.weight {
                FlowEdge::Connection(index) => solution.connection_flow[index.index()] = flow,
                FlowEdge::Coherence => {}
                FlowEdge::Supply(cluster) => solution.source_cluster_flow[cluster] = flow,
                FlowEdge::Demand(cluster) => solution.sink_cluster_flow[cluster] = flow,
            }
        }

        solution.source_flow = distribute(
            &self.source_clusters,
            &solution.source_cluster_flow,
            source_capacities,
        );
        solution.sink_flow = distribute(
            &self.sink_clusters,
            &solution.sink_cluster_flow,
            sink_capacities,
        );

        tracing::debug!(
            "Maximum flow {total} over {} connections.",
            self.number_of_edges()
        );

        Ok(solution)
    }

    fn validate_capacities(&self, capacities: &[f64], kind: SiteKind) -> Result<(), Error> {
        let expected = match kind {
            SiteKind::Source => self.number_of_sources(),
            SiteKind::Sink => self.number_of_sinks(),
        };
        if capacities.len() != expected {
            return Err(Error::shape_mismatch(format!(
                "Expected {expected} {kind} capacities, got {}.",
                capacities.len()
            )));
        }

        for (index, capacity) in capacities.iter().enumerate() {
            if !(capacity.is_finite() && *capacity >= 0.0) {
                return Err(Error::invalid_input(format!(
                    "Capacity of {} must be non-negative and finite, got {capacity}.",
                    SiteRef { kind, index }
                )));
            }
        }

        Ok(())
    }
}

/// Splits the flow of each cluster among its members in proportion to their
/// capacities.
fn distribute<K>(clusters: &Clusters<K>, cluster_flow: &[f64], capacities: &[f64]) -> Vec<f64>
where
    K: CorrespondenceKey,
{
    let totals = clusters.aggregate(capacities);
    capacities
        .iter()
        .enumerate()
        .map(|(site, capacity)| {
            let cluster = clusters.cluster_of(site);
            if totals[cluster] > 0.0 {
                cluster_flow[cluster] * capacity / totals[cluster]
            } else {
                0.0
            }
        })
        .collect()
}
