//! Explicit conflict graph for inspection.
//!
//! The energy model works on the grouped constraints directly; this graph
//! materializes them pairwise so external tools can walk neighborhoods.

use super::types::{Constraint, ConstraintKind};
use serde::{Deserialize, Serialize};

/// A weighted conflict between two candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictEdge {
    pub a: usize,
    pub b: usize,
    pub kind: ConstraintKind,
    pub weight: f64,
}

/// Candidates as nodes, pairwise conflicts as edges, preferences as
/// self-loop weights.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConflictGraph {
    num_nodes: usize,
    edges: Vec<ConflictEdge>,
    self_loops: Vec<f64>,
    adjacency: Vec<Vec<usize>>,
}

impl ConflictGraph {
    /// Builds the graph over `num_nodes` candidates.
    ///
    /// Group constraints expand into one edge per member pair.
    pub fn from_constraints(num_nodes: usize, constraints: &[Constraint]) -> Self {
        let mut graph = Self {
            num_nodes,
            edges: Vec::new(),
            self_loops: vec![0.0; num_nodes],
            adjacency: vec![Vec::new(); num_nodes],
        };

        for c in constraints {
            if c.kind == ConstraintKind::TimePreference {
                for &i in &c.candidate_indices {
                    graph.self_loops[i] += c.penalty_weight;
                }
                continue;
            }
            let members = &c.candidate_indices;
            for (k, &a) in members.iter().enumerate() {
                for &b in &members[k + 1..] {
                    graph.add_edge(a, b, c.kind, c.penalty_weight);
                }
            }
        }
        graph
    }

    fn add_edge(&mut self, a: usize, b: usize, kind: ConstraintKind, weight: f64) {
        let e = self.edges.len();
        self.edges.push(ConflictEdge { a, b, kind, weight });
        self.adjacency[a].push(e);
        self.adjacency[b].push(e);
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[ConflictEdge] {
        &self.edges
    }

    pub fn edges_of_kind(&self, kind: ConstraintKind) -> impl Iterator<Item = &ConflictEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Number of conflict edges touching `node`.
    #[inline]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Nodes in conflict with `node`, with edge kind and weight.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, ConstraintKind, f64)> + '_ {
        self.adjacency[node].iter().map(move |&e| {
            let edge = &self.edges[e];
            let other = if edge.a == node { edge.b } else { edge.a };
            (other, edge.kind, edge.weight)
        })
    }

    /// Preference weight on `node`'s self-loop.
    #[inline]
    pub fn preference(&self, node: usize) -> f64 {
        self.self_loops[node]
    }
}
