// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Named numeric attributes on the connections of a [`NetworkGraph`], such
//! as distances or costs.

use crate::{AdjacencyLists, CorrespondenceKey, Error, NetworkGraph};

use super::derivation::CorrespondenceEdge;

impl<K> NetworkGraph<K>
where
    K: CorrespondenceKey,
{
    /// Adds an edge attribute, or replaces an existing one with the same
    /// name.
    ///
    /// `values` must have exactly the shape of the adjacency lists the graph
    /// was built from, with one value per connection.  Connector edges of the
    /// correspondence graph get `0.0`.
    pub fn add_edge_attribute(
        &mut self,
        name: impl Into<String>,
        values: &AdjacencyLists<f64>,
    ) -> Result<(), Error> {
        self.set_edge_attribute(name, values.values().copied().collect())
    }

    /// Adds an edge attribute, or replaces an existing one with the same
    /// name, from values aligned with
    /// [`edge_endpoints`][NetworkGraph::edge_endpoints].
    ///
    /// Useful after connections were removed, when the original adjacency
    /// lists no longer describe the graph.
    pub fn set_edge_attribute(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), Error> {
        let name = name.into();
        if values.len() != self.base.edge_count() {
            return Err(Error::shape_mismatch(format!(
                "Edge attribute {name:?} has {} values for {} edges.",
                values.len(),
                self.base.edge_count()
            )));
        }

        self.attributes.insert(name, values);
        Ok(())
    }

    /// Returns the values of an edge attribute, aligned with
    /// [`edge_endpoints`][NetworkGraph::edge_endpoints].
    pub fn edge_attribute(&self, name: &str) -> Result<&[f64], Error> {
        self.attributes
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::attribute_not_found(format!("Edge attribute {name:?} not found.")))
    }

    /// Returns the names of all edge attributes, in alphabetical order.
    pub fn edge_attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Returns the values of an edge attribute on the edges of the
    /// correspondence graph: the real connections first, in edge order, then
    /// one `0.0` for each connector edge.
    pub fn correspondence_edge_attribute(&self, name: &str) -> Result<Vec<f64>, Error> {
        let values = self.edge_attribute(name)?;

        Ok(self
            .derived
            .correspondence
            .raw_edges()
            .iter()
            .map(|edge| match edge.weight {
                CorrespondenceEdge::Connection(index) => values[index.index()],
                CorrespondenceEdge::Coherence => 0.0,
            })
            .collect())
    }
}
