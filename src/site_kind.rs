// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `SiteKind`, `SiteRef` and `Vertex` types, which
//! identify the vertices of a [`NetworkGraph`][crate::NetworkGraph].

use std::fmt::Display;

/// Whether a site supplies or demands heat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiteKind {
    Source,
    Sink,
}

impl Display for SiteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteKind::Source => write!(f, "source"),
            SiteKind::Sink => write!(f, "sink"),
        }
    }
}

/// A reference to a real site, by its kind and its position in the list of
/// sources or sinks the graph was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteRef {
    /// Whether the site is a source or a sink.
    pub kind: SiteKind,
    /// Position in the list of sources or sinks.
    pub index: usize,
}

impl SiteRef {
    /// Creates a reference to the source at `index`.
    pub fn source(index: usize) -> Self {
        Self {
            kind: SiteKind::Source,
            index,
        }
    }

    /// Creates a reference to the sink at `index`.
    pub fn sink(index: usize) -> Self {
        Self {
            kind: SiteKind::Sink,
            index,
        }
    }

    pub fn is_source(&self) -> bool {
        self.kind == SiteKind::Source
    }

    pub fn is_sink(&self) -> bool {
        self.kind == SiteKind::Sink
    }
}

impl Display for SiteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.kind, self.index)
    }
}

/// A vertex in one of the derived graphs.
///
/// Real sites keep their [`SiteRef`].  Connector vertices join the members of
/// a correspondence cluster and are identified by the kind of the members and
/// the cluster position.  The two super vertices only exist in the max-flow
/// graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Vertex {
    Site(SiteRef),
    Connector { kind: SiteKind, cluster: usize },
    InfiniteSource,
    InfiniteSink,
}

impl Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vertex::Site(site) => write!(f, "{site}"),
            Vertex::Connector { kind, cluster } => write!(f, "{kind}-connector({cluster})"),
            Vertex::InfiniteSource => write!(f, "infinite-source"),
            Vertex::InfiniteSink => write!(f, "infinite-sink"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SiteRef::source(3).to_string(), "(source, 3)");
        assert_eq!(SiteRef::sink(0).to_string(), "(sink, 0)");
        assert_eq!(
            Vertex::Connector {
                kind: SiteKind::Sink,
                cluster: 2
            }
            .to_string(),
            "sink-connector(2)"
        );
        assert!(SiteRef::source(1).is_source());
        assert!(SiteRef::sink(1).is_sink());
    }
}
