// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over sites and connections in a `NetworkGraph`.

use crate::SiteRef;

use super::BaseGraph;

/// An iterator over the sites in a `NetworkGraph`.
pub struct Vertices<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<SiteRef>>,
}

impl Iterator for Vertices<'_> {
    type Item = SiteRef;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| n.weight)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Vertices<'_> {}

/// An iterator over the endpoints of the connections in a `NetworkGraph`.
pub struct Connections<'a> {
    pub(crate) graph: &'a BaseGraph,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<()>>,
}

impl Iterator for Connections<'_> {
    type Item = (SiteRef, SiteRef);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Connections<'_> {}
