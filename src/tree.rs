//! Huffman Tree Structures and Building
//!
//! Builds the prefix tree from a frequency model, derives the code table,
//! and converts the tree to and from its pre-order header encoding.
//!
//! Nodes live in an arena addressed by [`NodeId`]. Every traversal uses an
//! explicit stack, so a maximally skewed tree (depth 256) is handled the
//! same as a balanced one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bitvec::prelude::*;
use tracing::{debug, trace, warn};

use crate::bit_buffer::BitBuffer;
use crate::error::{GrinError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

/// Upper bound on nodes in a tree over the 257-symbol alphabet.
pub const MAX_NODES: usize = 2 * Symbol::COUNT - 1;

// =============================================================================
// Nodes
// =============================================================================

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        left: NodeId,
        right: NodeId,
        weight: u64,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child reached by following `bit` (false = left, true = right).
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
        }
    }
}

/// Priority queue entry. Ordered by weight, then by the smallest symbol in
/// the subtree, so equal weights always resolve the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    weight: u64,
    min_symbol: Symbol,
    id: NodeId,
}

// =============================================================================
// Huffman Tree
// =============================================================================

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// The EOF symbol always gets weight 1, whatever the table says. A table
    /// with no byte symbols gets a zero-weight placeholder leaf for byte 0
    /// so the result still has two leaves.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let eof_count = freqs.get(Symbol::EOF);
        if eof_count != 0 && eof_count != 1 {
            warn!(eof_count, "ignoring supplied EOF frequency, using 1");
        }

        let mut nodes = Vec::with_capacity(MAX_NODES);
        let mut heap = BinaryHeap::with_capacity(Symbol::COUNT);

        let mut leaves: Vec<(Symbol, u64)> =
            freqs.iter().filter(|(symbol, _)| !symbol.is_eof()).collect();
        if leaves.is_empty() {
            leaves.push((Symbol::from(0u8), 0));
        }
        leaves.push((Symbol::EOF, 1));

        for (symbol, weight) in leaves {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, weight });
            heap.push(Reverse(Pending {
                weight,
                min_symbol: symbol,
                id,
            }));
        }

        while heap.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let weight = left.weight.saturating_add(right.weight);
            let id = NodeId(nodes.len());
            trace!(
                left = left.weight,
                right = right.weight,
                weight,
                "merging nodes"
            );
            nodes.push(Node::Internal {
                left: left.id,
                right: right.id,
                weight,
            });
            heap.push(Reverse(Pending {
                weight,
                min_symbol: left.min_symbol.min(right.min_symbol),
                id,
            }));
        }

        let Some(Reverse(root)) = heap.pop() else {
            unreachable!("the EOF leaf is always queued");
        };

        let tree = HuffmanTree {
            nodes,
            root: root.id,
        };
        debug!(
            leaves = tree.leaf_count(),
            root_weight = tree.weight(),
            depth = tree.depth(),
            "built huffman tree"
        );
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Weight of the root, the sum of all leaf weights.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        max
    }

    /// Leaf symbols in pre-order (left to right).
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.node(id) {
                Node::Leaf { symbol, .. } => out.push(*symbol),
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }
        out
    }

    /// Structural equality: same shape and same leaf symbols at the same
    /// positions. Weights are ignored.
    pub fn same_shape(&self, other: &HuffmanTree) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (self.node(a), other.node(b)) {
                (Node::Leaf { symbol: x, .. }, Node::Leaf { symbol: y, .. }) => {
                    if x != y {
                        return false;
                    }
                }
                (
                    Node::Internal {
                        left: la,
                        right: ra,
                        ..
                    },
                    Node::Internal {
                        left: lb,
                        right: rb,
                        ..
                    },
                ) => {
                    stack.push((*ra, *rb));
                    stack.push((*la, *lb));
                }
                _ => return false,
            }
        }
        true
    }

    /// Derive the code table: left edges append 0, right edges append 1.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::empty();
        let mut stack = vec![(self.root, BitVec::<u8, Msb0>::new())];
        while let Some((id, path)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { symbol, .. } => table.codes[symbol.index()] = Some(path),
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((*right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((*left, left_path));
                }
            }
        }
        table
    }

    // =========================================================================
    // Header encoding
    // =========================================================================

    /// Write the tree in pre-order: `0` + 9-bit symbol for a leaf, `1`
    /// followed by both subtrees for an internal node.
    pub fn serialize(&self, out: &mut BitBuffer) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.node(id) {
                Node::Leaf { symbol, .. } => {
                    out.write_bit(false);
                    out.write_bits(symbol.value() as u64, Symbol::BITS);
                }
                Node::Internal { left, right, .. } => {
                    out.write_bit(true);
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }
    }

    /// Read a tree written by [`HuffmanTree::serialize`]. Leaf weights come
    /// back as 0.
    pub fn deserialize(input: &mut BitBuffer) -> Result<Self> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut seen = [false; Symbol::COUNT];
        // Internal nodes still waiting for children, with the left child
        // once it is complete.
        let mut open: Vec<(NodeId, Option<NodeId>)> = Vec::new();

        loop {
            let bit = input.read_bit().ok_or(GrinError::TruncatedTree)?;
            if nodes.len() == MAX_NODES {
                return Err(GrinError::TreeTooLarge);
            }
            let id = NodeId(nodes.len());

            if bit {
                // children are patched in once both subtrees are read
                nodes.push(Node::Internal {
                    left: id,
                    right: id,
                    weight: 0,
                });
                open.push((id, None));
                continue;
            }

            let raw = input
                .read_bits(Symbol::BITS)
                .ok_or(GrinError::TruncatedTree)?;
            let symbol = Symbol::new(raw as u16)?;
            if std::mem::replace(&mut seen[symbol.index()], true) {
                return Err(GrinError::DuplicateSymbol(symbol));
            }
            nodes.push(Node::Leaf { symbol, weight: 0 });

            // Close every internal node this leaf completes.
            let mut done = id;
            loop {
                match open.last().copied() {
                    None => {
                        let tree = HuffmanTree { nodes, root: done };
                        debug!(
                            nodes = tree.node_count(),
                            leaves = tree.leaf_count(),
                            "read huffman tree header"
                        );
                        return Ok(tree);
                    }
                    Some((_, None)) => {
                        if let Some(top) = open.last_mut() {
                            top.1 = Some(done);
                        }
                        break;
                    }
                    Some((parent, Some(left))) => {
                        open.pop();
                        nodes[parent.0] = Node::Internal {
                            left,
                            right: done,
                            weight: 0,
                        };
                        done = parent;
                    }
                }
            }
        }
    }
}

// =============================================================================
// Code Table
// =============================================================================

/// Symbol to code mapping derived from a [`HuffmanTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<BitVec<u8, Msb0>>>,
}

impl CodeTable {
    fn empty() -> Self {
        Self {
            codes: vec![None; Symbol::COUNT],
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol.index()].as_deref()
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, code)| code.as_deref().map(|c| (Symbol::from_index(i), c)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
