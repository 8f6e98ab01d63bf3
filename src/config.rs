// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `NetworkGraph` and
//! for the neighbour search.

use crate::{DistanceMethod, Error, TemperatureCondition};

/// Configuration options for the `NetworkGraph`.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkGraphConfig {
    /// The capacity given to connections and connector edges in the max-flow
    /// graph, relative to the largest source or sink capacity.  These edges
    /// have no physical limit.  The value used is raised automatically if the
    /// total supply of a problem would otherwise exceed it.
    pub unrestricted_capacity: f64,
}

impl Default for NetworkGraphConfig {
    fn default() -> Self {
        Self {
            unrestricted_capacity: 1000.0,
        }
    }
}

/// Parameters of a fixed-radius search for sinks that a source can supply.
#[derive(Clone, Debug, PartialEq)]
pub struct NeighbourSearchConfig {
    /// Sites further apart than this are never connected, in km.
    pub max_distance_km: f64,

    /// Temperature of the heating network in °C, which the source and sink
    /// conditions compare against.
    pub network_temperature: f64,

    /// Compares the source temperature (left) to the network temperature.
    pub source_condition: TemperatureCondition,

    /// Compares the sink temperature (left) to the network temperature.
    pub sink_condition: TemperatureCondition,

    /// Compares the source temperature (left) to the sink temperature.
    pub source_sink_condition: TemperatureCondition,

    pub distance_method: DistanceMethod,
}

impl NeighbourSearchConfig {
    /// Creates a search configuration from condition strings.
    ///
    /// Each condition must be one of `>`, `>=`, `=`, `<`, `<=`, `!=`, `true`
    /// or `false`.
    pub fn try_new(
        max_distance_km: f64,
        network_temperature: f64,
        source_condition: &str,
        sink_condition: &str,
        source_sink_condition: &str,
        distance_method: DistanceMethod,
    ) -> Result<Self, Error> {
        if max_distance_km.is_nan() {
            return Err(Error::invalid_input("Maximum distance must be a number."));
        }

        Ok(Self {
            max_distance_km,
            network_temperature,
            source_condition: source_condition.parse()?,
            sink_condition: sink_condition.parse()?,
            source_sink_condition: source_sink_condition.parse()?,
            distance_method,
        })
    }
}
