// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A FIFO push-relabel maximum-flow solver over `f64` capacities.

use std::collections::VecDeque;

/// Residual capacities at or below this are treated as zero.
const EPS: f64 = 1e-12;

#[derive(Clone, Debug)]
struct Arc {
    head: usize,
    residual: f64,
    capacity: f64,
}

/// A flow network stored as residual arcs.
///
/// Arcs are added in pairs, so the reverse of arc `i` is always `i ^ 1`.
#[derive(Clone, Debug)]
pub(super) struct ResidualNetwork {
    arcs: Vec<Arc>,
    outgoing: Vec<Vec<usize>>,
}

impl ResidualNetwork {
    pub(super) fn new(number_of_vertices: usize) -> Self {
        Self {
            arcs: vec![],
            outgoing: vec![vec![]; number_of_vertices],
        }
    }

    /// Adds an arc from `from` to `to` and its reverse, and returns the index
    /// of the forward arc.
    ///
    /// An undirected edge has the same capacity in both directions, a
    /// directed one has a `backward` capacity of zero.
    pub(super) fn add_pair(&mut self, from: usize, to: usize, forward: f64, backward: f64) -> usize {
        let index = self.arcs.len();
        self.arcs.push(Arc {
            head: to,
            residual: forward,
            capacity: forward,
        });
        self.arcs.push(Arc {
            head: from,
            residual: backward,
            capacity: backward,
        });
        self.outgoing[from].push(index);
        self.outgoing[to].push(index + 1);
        index
    }

    /// Returns the net flow along `arc`, which is negative if more flows
    /// through its reverse.
    pub(super) fn flow(&self, arc: usize) -> f64 {
        let arc = &self.arcs[arc];
        arc.capacity - arc.residual
    }

    fn push(&mut self, arc: usize, amount: f64, excess: &mut [f64]) {
        let tail = self.arcs[arc ^ 1].head;
        let head = self.arcs[arc].head;
        self.arcs[arc].residual -= amount;
        self.arcs[arc ^ 1].residual += amount;
        excess[tail] -= amount;
        excess[head] += amount;
    }

    /// Pushes as much flow as possible from `source` to `sink` and returns
    /// its value.  Flows can be read with [`flow`][Self::flow] afterwards.
    pub(super) fn solve(&mut self, source: usize, sink: usize) -> f64 {
        let n = self.outgoing.len();
        if source == sink || n == 0 {
            return 0.0;
        }

        let mut height = vec![0; n];
        let mut excess = vec![0.0; n];
        let mut current = vec![0; n];
        let mut queued = vec![false; n];
        let mut active = VecDeque::new();
        let (mut pushes, mut relabels) = (0usize, 0usize);

        height[source] = n;
        for i in 0..self.outgoing[source].len() {
            let arc = self.outgoing[source][i];
            let amount = self.arcs[arc].residual;
            if amount > EPS {
                self.push(arc, amount, &mut excess);
                let head = self.arcs[arc].head;
                if head != sink && !queued[head] {
                    queued[head] = true;
                    active.push_back(head);
                }
            }
        }

        while let Some(vertex) = active.pop_front() {
            queued[vertex] = false;

            while excess[vertex] > EPS {
                if current[vertex] == self.outgoing[vertex].len() {
                    let lowest = self.outgoing[vertex]
                        .iter()
                        .filter(|arc| self.arcs[**arc].residual > EPS)
                        .map(|arc| height[self.arcs[*arc].head])
                        .min();
                    match lowest {
                        Some(h) if h < 2 * n => {
                            height[vertex] = h + 1;
                            current[vertex] = 0;
                            relabels += 1;
                        }
                        _ => {
                            tracing::warn!(
                                "Dropping excess {} stuck at vertex {vertex}.",
                                excess[vertex]
                            );
                            excess[vertex] = 0.0;
                        }
                    }
                    continue;
                }

                let arc = self.outgoing[vertex][current[vertex]];
                let head = self.arcs[arc].head;
                let residual = self.arcs[arc].residual;
                if residual > EPS && height[vertex] == height[head] + 1 {
                    let amount = excess[vertex].min(residual);
                    self.push(arc, amount, &mut excess);
                    pushes += 1;
                    if head != source && head != sink && !queued[head] {
                        queued[head] = true;
                        active.push_back(head);
                    }
                } else {
                    current[vertex] += 1;
                }
            }
        }

        tracing::trace!(
            "Push-relabel on {n} vertices and {} arcs: {pushes} pushes, {relabels} relabels.",
            self.arcs.len()
        );

        excess[sink]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn test_directed_path() {
        let mut network = ResidualNetwork::new(3);
        let a = network.add_pair(0, 1, 5.0, 0.0);
        let b = network.add_pair(1, 2, 3.0, 0.0);

        assert_close(network.solve(0, 2), 3.0);
        assert_close(network.flow(a), 3.0);
        assert_close(network.flow(b), 3.0);
    }

    #[test]
    fn test_undirected_edge_carries_flow_backwards() {
        // 0 -> 2 -> 1 -> 3, where 2 -- 1 is stored as 1 -> 2
        let mut network = ResidualNetwork::new(4);
        network.add_pair(0, 2, 4.0, 0.0);
        let middle = network.add_pair(1, 2, 10.0, 10.0);
        network.add_pair(1, 3, 2.5, 0.0);

        assert_close(network.solve(0, 3), 2.5);
        assert_close(network.flow(middle), -2.5);
    }

    #[test]
    fn test_textbook_network() {
        // CLRS figure 26.1, maximum flow 23
        let mut network = ResidualNetwork::new(6);
        for (from, to, capacity) in [
            (0, 1, 16.0),
            (0, 2, 13.0),
            (2, 1, 4.0),
            (1, 3, 12.0),
            (3, 2, 9.0),
            (2, 4, 14.0),
            (4, 3, 7.0),
            (3, 5, 20.0),
            (4, 5, 4.0),
        ] {
            network.add_pair(from, to, capacity, 0.0);
        }

        assert_close(network.solve(0, 5), 23.0);
    }

    #[test]
    fn test_disconnected() {
        let mut network = ResidualNetwork::new(4);
        let a = network.add_pair(0, 1, 1.0, 0.0);
        network.add_pair(2, 3, 1.0, 0.0);

        assert_close(network.solve(0, 3), 0.0);
        // the excess pushed into 1 returns to the source
        assert_close(network.flow(a), 0.0);
    }
}
