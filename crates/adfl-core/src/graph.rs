//! Lineage edges, edge-list merging, and transitive folding

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One target node and the source nodes feeding it.
///
/// Empty `parent_nodes` marks a root source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub node_name: String,
    pub parent_nodes: Vec<String>,
}

impl Edge {
    pub fn new(node_name: impl Into<String>, parent_nodes: impl IntoIterator<Item = String>) -> Self {
        Self {
            node_name: node_name.into(),
            parent_nodes: parent_nodes.into_iter().collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_nodes.is_empty()
    }

    /// Append parents not already present, keeping first-seen order
    fn absorb_parents(&mut self, parents: &[String]) {
        for parent in parents {
            if !self.parent_nodes.contains(parent) {
                self.parent_nodes.push(parent.clone());
            }
        }
    }
}

/// Merged lineage of one pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineLineage {
    pub pipeline_name: String,
    pub lineage: Vec<Edge>,
}

/// Fold `right` into `left`.
///
/// Edges sharing a `node_name` collapse into one whose parents are the union
/// of both, in first-seen order. Node order follows first appearance. No
/// parent set already recorded for a node is ever dropped.
pub fn merge_edges(left: Vec<Edge>, right: Vec<Edge>) -> Vec<Edge> {
    let mut merged: Vec<Edge> = Vec::with_capacity(left.len() + right.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for edge in left.into_iter().chain(right) {
        match positions.get(&edge.node_name) {
            Some(&idx) => merged[idx].absorb_parents(&edge.parent_nodes),
            None => {
                let mut fresh = Edge::new(edge.node_name.clone(), Vec::new());
                fresh.absorb_parents(&edge.parent_nodes);
                positions.insert(edge.node_name, merged.len());
                merged.push(fresh);
            }
        }
    }

    merged
}

/// Merged edges as a petgraph digraph (parent -> child)
#[derive(Debug, Default)]
pub struct LineageGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl LineageGraph {
    /// One node per distinct name, one graph edge per parent/child pair
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut lineage = Self::default();
        for edge in edges {
            let child = lineage.node(&edge.node_name);
            for parent in &edge.parent_nodes {
                let parent = lineage.node(parent);
                lineage.graph.update_edge(parent, child, ());
            }
        }
        lineage
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    /// Every node upstream of `node`, excluding `node` itself even on a cycle
    pub fn ancestors(&self, node: &str) -> BTreeSet<String> {
        let Some(&start) = self.node_map.get(node) else {
            return BTreeSet::new();
        };
        let upstream = Reversed(&self.graph);
        let mut dfs = Dfs::new(upstream, start);
        let mut found = BTreeSet::new();
        while let Some(idx) = dfs.next(upstream) {
            if idx != start {
                found.insert(self.graph[idx].clone());
            }
        }
        found
    }
}

/// Rewrite each edge's parents as its full upstream set.
///
/// Direct parents keep their order; indirect ancestors follow, sorted. With
/// `B <- A` and `C <- B`, `C` becomes `C <- B, A`. Root edges are unchanged.
pub fn fold_transitive(edges: &[Edge]) -> Vec<Edge> {
    let graph = LineageGraph::from_edges(edges);
    edges
        .iter()
        .map(|edge| {
            let mut folded = edge.clone();
            let indirect: Vec<String> = graph
                .ancestors(&edge.node_name)
                .into_iter()
                .filter(|name| !edge.parent_nodes.contains(name))
                .collect();
            folded.absorb_parents(&indirect);
            folded
        })
        .collect()
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
