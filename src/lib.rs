// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Heat Network Matching

This is a library for deciding which heat sources can feasibly supply which
heat sinks in a district heating study, and for allocating capacity between
them.

It has three parts, which are usually used in this order:

1. A feasibility filter, [`find_neighbours`], which pairs sources and sinks
   that are close enough and whose temperatures fit the heating network.
2. A cost model, in the [`cost`] module, for pricing pipes and heat
   exchangers from hourly flow series.
3. A graph engine, [`NetworkGraph`], which holds the feasible connections,
   can reduce them to a minimum spanning tree, and computes how much heat can
   flow from the sources to the sinks.

## The `Site` trait

Because this is an independent library, it doesn't know about the types
that describe sites in a study.  [`find_neighbours`] only needs a location and
a temperature, so any type implementing the [`Site`] trait can be passed to
it.  Check out the trait documentation for a sample implementation.

## Correspondence keys

A [`NetworkGraph`] is created with the
[`try_new`][NetworkGraph::try_new] method from three adjacency lists, for
source–sink, source–source and sink–sink connections, and one correspondence
key per source and per sink.

Sites sharing a correspondence key are physically one coherent cluster, for
example several heat outlets of the same plant.  The graph joins them through
an extra connector vertex, and [`maximum_flow`][NetworkGraph::maximum_flow]
treats their summed capacity as a single supply or demand.  Any type that is
`Eq + Hash + Clone + Debug` can be used as a key, see
[`CorrespondenceKey`].

## Mutation

Connections can be removed with
[`delete_edges`][NetworkGraph::delete_edges] or
[`reduce_to_minimum_spanning_tree`][NetworkGraph::reduce_to_minimum_spanning_tree].
After every change, the derived graphs used for flow computations are rebuilt
before the method returns, so queries never see a stale state.

If any input is inconsistent, for example an attribute with the wrong number
of values, methods return an [`Error`] and leave the graph unchanged.
*/

mod condition;
pub use condition::TemperatureCondition;

mod config;
pub use config::{NeighbourSearchConfig, NetworkGraphConfig};

pub mod cost;

mod distance;
pub use distance::{approximate_distance, orthodrome_distance, DistanceMethod, Ellipsoid};

mod error;
pub use error::{Error, ErrorKind};

mod graph;
pub use graph::{iterators, AdjacencyLists, CorrespondenceKey, FlowSolution, NetworkGraph};

mod neighbours;
pub use neighbours::{find_neighbours, Neighbours};

mod site_kind;
pub use site_kind::{SiteKind, SiteRef};

mod site_traits;
pub use site_traits::{Coordinate, Site};
