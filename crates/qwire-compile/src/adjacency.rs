//! Per-compile adjacency over a graph snapshot.

use std::collections::hash_map::Entry;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use tracing::trace;

use qwire_ir::{CircuitGraph, Edge, Handle, Node, NodeId};

/// Node index type for the adjacency graph.
pub type NodeIndex = PetNodeIndex<u32>;

/// Handles carried by one wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Wire {
    /// Output port on the source node.
    pub source_handle: Option<Handle>,
    /// Input port on the target node.
    pub target_handle: Option<Handle>,
}

/// An outgoing wire as seen from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outgoing {
    /// The node the wire enters.
    pub target: NodeIndex,
    /// The wire's handles.
    pub wire: Wire,
}

/// Adjacency derived from one [`CircuitGraph`] snapshot.
///
/// Built once per compile call and shared between validation and
/// scheduling. Outgoing wires of every node are sorted by source handle
/// (unlabelled, `output1`, `output2`), then target id, then target handle,
/// so every consumer sees the same order regardless of how the editor
/// listed its edges.
///
/// Degree counts follow the raw edge list: a wire whose other end is
/// missing still counts toward the end that exists. Only wires with both
/// endpoints present become graph edges.
#[derive(Debug)]
pub struct Adjacency<'g> {
    source: &'g CircuitGraph,
    graph: DiGraph<&'g Node, Wire, u32>,
    index: FxHashMap<&'g str, NodeIndex>,
    outgoing: Vec<Vec<Outgoing>>,
    in_degree: Vec<usize>,
    out_degree: Vec<usize>,
    by_id: Vec<NodeIndex>,
    duplicates: Vec<&'g NodeId>,
    dangling: Vec<&'g Edge>,
}

impl<'g> Adjacency<'g> {
    /// Index a snapshot.
    ///
    /// When two nodes share an id the first one in collection order is
    /// indexed; the duplicate is recorded and reported by validation.
    pub fn build(source: &'g CircuitGraph) -> Self {
        let nodes = source.nodes();
        let mut graph = DiGraph::with_capacity(nodes.len(), source.edges().len());
        let mut index = FxHashMap::default();
        let mut duplicates = Vec::new();

        for node in nodes {
            let ix = graph.add_node(node);
            match index.entry(node.id.as_str()) {
                Entry::Occupied(_) => duplicates.push(&node.id),
                Entry::Vacant(slot) => {
                    slot.insert(ix);
                }
            }
        }

        let mut in_degree = vec![0; nodes.len()];
        let mut out_degree = vec![0; nodes.len()];
        let mut dangling = Vec::new();

        for edge in source.edges() {
            let from = index.get(edge.source.as_str()).copied();
            let to = index.get(edge.target.as_str()).copied();
            if let Some(from) = from {
                out_degree[from.index()] += 1;
            }
            if let Some(to) = to {
                in_degree[to.index()] += 1;
            }
            match (from, to) {
                (Some(from), Some(to)) => {
                    graph.add_edge(
                        from,
                        to,
                        Wire {
                            source_handle: edge.source_handle,
                            target_handle: edge.target_handle,
                        },
                    );
                }
                _ => {
                    trace!(source = %edge.source, target = %edge.target, "dangling wire");
                    dangling.push(edge);
                }
            }
        }

        let mut outgoing = vec![Vec::new(); nodes.len()];
        for ix in graph.node_indices() {
            let mut wires: Vec<Outgoing> = graph
                .edges_directed(ix, Direction::Outgoing)
                .map(|e| Outgoing {
                    target: e.target(),
                    wire: *e.weight(),
                })
                .collect();
            wires.sort_by(|a, b| {
                a.wire
                    .source_handle
                    .cmp(&b.wire.source_handle)
                    .then_with(|| graph[a.target].id.cmp(&graph[b.target].id))
                    .then_with(|| a.wire.target_handle.cmp(&b.wire.target_handle))
            });
            outgoing[ix.index()] = wires;
        }

        let mut by_id: Vec<NodeIndex> = graph.node_indices().collect();
        by_id.sort_by(|&a, &b| graph[a].id.cmp(&graph[b].id).then(a.cmp(&b)));

        Self {
            source,
            graph,
            index,
            outgoing,
            in_degree,
            out_degree,
            by_id,
            duplicates,
            dangling,
        }
    }

    /// The snapshot this adjacency was built from.
    #[inline]
    pub fn graph(&self) -> &'g CircuitGraph {
        self.source
    }

    /// Node at `ix`.
    #[inline]
    pub fn node(&self, ix: NodeIndex) -> &'g Node {
        self.graph[ix]
    }

    /// Look up a node index by id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Number of nodes, duplicates included.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Incoming wire count of `ix`.
    #[inline]
    pub fn in_degree(&self, ix: NodeIndex) -> usize {
        self.in_degree[ix.index()]
    }

    /// Outgoing wire count of `ix`.
    #[inline]
    pub fn out_degree(&self, ix: NodeIndex) -> usize {
        self.out_degree[ix.index()]
    }

    /// Outgoing wires of `ix` in deterministic order.
    #[inline]
    pub fn outgoing(&self, ix: NodeIndex) -> &[Outgoing] {
        &self.outgoing[ix.index()]
    }

    /// Incoming wires of `ix`, in no particular order.
    pub fn incoming(&self, ix: NodeIndex) -> impl Iterator<Item = &Wire> + '_ {
        self.graph
            .edges_directed(ix, Direction::Incoming)
            .map(|e| e.weight())
    }

    /// All node indices sorted by node id.
    ///
    /// Validation rules walk nodes in this order so the first violation
    /// reported does not depend on collection order.
    pub fn nodes_by_id(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.by_id.iter().copied()
    }

    /// Ids that appear on more than one node, in collection order.
    pub fn duplicate_ids(&self) -> &[&'g NodeId] {
        &self.duplicates
    }

    /// Wires with at least one endpoint missing from the snapshot.
    pub fn dangling(&self) -> &[&'g Edge] {
        &self.dangling
    }
}
