// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `graph` module.
//!
//! - the `NetworkGraphBuilder`, which can declaratively build network graphs
//!   site by site, for use in tests.

use crate::{AdjacencyLists, Error, NetworkGraph, NetworkGraphConfig, SiteKind, SiteRef};

/// A builder for creating network graphs easily, for use in tests.
pub(super) struct NetworkGraphBuilder {
    source_keys: Vec<u64>,
    sink_keys: Vec<u64>,
    connections: Vec<(SiteRef, SiteRef)>,
}

impl NetworkGraphBuilder {
    /// Creates a new `NetworkGraphBuilder`.
    pub(super) fn new() -> Self {
        NetworkGraphBuilder {
            source_keys: vec![],
            sink_keys: vec![],
            connections: vec![],
        }
    }

    /// Adds a source with the given correspondence key.
    pub(super) fn source(&mut self, key: u64) -> SiteRef {
        self.source_keys.push(key);
        SiteRef::source(self.source_keys.len() - 1)
    }

    /// Adds a sink with the given correspondence key.
    pub(super) fn sink(&mut self, key: u64) -> SiteRef {
        self.sink_keys.push(key);
        SiteRef::sink(self.sink_keys.len() - 1)
    }

    /// Connects two sites.
    ///
    /// A sink-source pair is stored as source-sink, otherwise the first site
    /// owns the connection in the adjacency lists.
    pub(super) fn connect(&mut self, a: SiteRef, b: SiteRef) -> &mut Self {
        if a.is_sink() && b.is_source() {
            self.connections.push((b, a));
        } else {
            self.connections.push((a, b));
        }
        self
    }

    /// Returns the adjacency lists for the sites and connections added so
    /// far.
    pub(super) fn adjacency_lists(&self) -> AdjacencyLists<usize> {
        let mut lists = AdjacencyLists::new(
            vec![vec![]; self.source_keys.len()],
            vec![vec![]; self.source_keys.len()],
            vec![vec![]; self.sink_keys.len()],
        );
        for (a, b) in &self.connections {
            match (a.kind, b.kind) {
                (SiteKind::Source, SiteKind::Sink) => lists.source_sink[a.index].push(b.index),
                (SiteKind::Source, SiteKind::Source) => lists.source_source[a.index].push(b.index),
                (SiteKind::Sink, SiteKind::Sink) => lists.sink_sink[a.index].push(b.index),
                (SiteKind::Sink, SiteKind::Source) => unreachable!(),
            }
        }
        lists
    }

    /// Builds a `NetworkGraph` with the default configuration.
    pub(super) fn build(&self) -> Result<NetworkGraph<u64>, Error> {
        NetworkGraph::try_new(
            self.adjacency_lists(),
            self.source_keys.clone(),
            self.sink_keys.clone(),
            NetworkGraphConfig::default(),
        )
    }
}
