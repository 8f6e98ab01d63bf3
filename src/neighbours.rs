// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Fixed-radius search for feasible source–sink pairs.

use crate::{NeighbourSearchConfig, Site};

/// The result of [`find_neighbours`].
///
/// `adjacency[i]` lists the indices of the sinks that source `i` can supply,
/// in sink input order, and `distances[i][j]` is the distance in km between
/// source `i` and sink `adjacency[i][j]`.  Both lists have exactly the same
/// shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Neighbours {
    pub adjacency: Vec<Vec<usize>>,
    pub distances: Vec<Vec<f64>>,
}

impl Neighbours {
    /// Returns the total number of feasible pairs.
    pub fn number_of_pairs(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

/// Finds, for every source, the sinks within `config.max_distance_km` for
/// which all three temperature conditions hold.
///
/// Every source–sink pair is checked, so this is `O(sources × sinks)`.
/// Results are in input order and reproducible.  Sources and sinks may also
/// be the same collection, to find source–source or sink–sink links.
pub fn find_neighbours<S, T>(sources: &[S], sinks: &[T], config: &NeighbourSearchConfig) -> Neighbours
where
    S: Site,
    T: Site,
{
    let mut neighbours = Neighbours {
        adjacency: Vec::with_capacity(sources.len()),
        distances: Vec::with_capacity(sources.len()),
    };

    let sink_passes = sinks
        .iter()
        .map(|sink| {
            config
                .sink_condition
                .check(sink.temperature(), config.network_temperature)
        })
        .collect::<Vec<_>>();

    for source in sources {
        let mut adjacent = vec![];
        let mut distances = vec![];

        let source_temperature = source.temperature();
        if config
            .source_condition
            .check(source_temperature, config.network_temperature)
        {
            let source_coordinate = source.coordinate();
            for (index, sink) in sinks.iter().enumerate() {
                if !sink_passes[index]
                    || !config
                        .source_sink_condition
                        .check(source_temperature, sink.temperature())
                {
                    continue;
                }
                let distance = config
                    .distance_method
                    .distance(source_coordinate, sink.coordinate());
                if distance <= config.max_distance_km {
                    adjacent.push(index);
                    distances.push(distance);
                }
            }
        }

        neighbours.adjacency.push(adjacent);
        neighbours.distances.push(distances);
    }

    tracing::debug!(
        "Found {} feasible pairs between {} sources and {} sinks.",
        neighbours.number_of_pairs(),
        sources.len(),
        sinks.len()
    );

    neighbours
}
