//! Tree Display/Visualization
//!
//! Renders a Huffman tree and its code table in a human-readable form for
//! `grin inspect`, plus a serializable report for `--json`.

use std::fmt::Write;

use bitvec::prelude::*;
use serde::Serialize;

use crate::symbol::Symbol;
use crate::tree::{CodeTable, HuffmanTree, Node, NodeId};

// =============================================================================
// Tree Display
// =============================================================================

/// Draw the tree with box characters, left branch (`0`) above right (`1`).
pub fn render_tree(tree: &HuffmanTree) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "HUFFMAN TREE");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Total nodes: {}", tree.node_count());
    let _ = writeln!(out, "Leaves: {}", tree.leaf_count());
    let _ = writeln!(out, "Depth: {}", tree.depth());
    let _ = writeln!(out, "{}", "-".repeat(60));

    // (node, prefix for its children, edge label, is last child)
    let mut stack: Vec<(NodeId, String, Option<char>, bool)> =
        vec![(tree.root(), String::new(), None, true)];

    while let Some((id, prefix, edge, is_last)) = stack.pop() {
        let label = match tree.node(id) {
            Node::Leaf { symbol, .. } => format!("[{}]", symbol),
            Node::Internal { .. } => "*".to_string(),
        };

        let child_prefix = match edge {
            None => {
                let _ = writeln!(out, "ROOT {}", label);
                String::new()
            }
            Some(bit) => {
                let connector = if is_last { "└─" } else { "├─" };
                let _ = writeln!(out, "{}{}{} {}", prefix, connector, bit, label);
                format!("{}{}", prefix, if is_last { "  " } else { "│ " })
            }
        };

        if let Node::Internal { left, right, .. } = tree.node(id) {
            stack.push((*right, child_prefix.clone(), Some('1'), true));
            stack.push((*left, child_prefix, Some('0'), false));
        }
    }

    let _ = writeln!(out, "{}", "=".repeat(60));
    out
}

/// One line per symbol: symbol, code length, code bits.
pub fn render_code_table(codes: &CodeTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:>5}  CODE", "SYMBOL", "BITS");
    for (symbol, code) in codes.iter() {
        let _ = writeln!(
            out,
            "{:<12} {:>5}  {}",
            symbol.to_string(),
            code.len(),
            code_string(code)
        );
    }
    out
}

fn code_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

// =============================================================================
// JSON Report
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CodeEntry {
    pub symbol: Symbol,
    pub eof: bool,
    pub bits: usize,
    pub code: String,
}

/// Summary of a tree header, serialized for `grin inspect --json`.
#[derive(Debug, Clone, Serialize)]
pub struct CodeReport {
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
    pub codes: Vec<CodeEntry>,
}

impl CodeReport {
    pub fn new(tree: &HuffmanTree, codes: &CodeTable) -> Self {
        let codes = codes
            .iter()
            .map(|(symbol, code)| CodeEntry {
                symbol,
                eof: symbol.is_eof(),
                bits: code.len(),
                code: code_string(code),
            })
            .collect();

        Self {
            nodes: tree.node_count(),
            leaves: tree.leaf_count(),
            depth: tree.depth(),
            codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn scenario_tree() -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"AAAAABBC"))
    }

    #[test]
    fn test_render_tree_layout() {
        let rendered = render_tree(&scenario_tree());
        let body: Vec<&str> = rendered
            .lines()
            .skip_while(|l| !l.starts_with("ROOT"))
            .take_while(|l| !l.starts_with('='))
            .collect();

        assert_eq!(
            body,
            vec![
                "ROOT *",
                "├─0 *",
                "│ ├─0 [0x42 'B']",
                "│ └─1 *",
                "│   ├─0 [0x43 'C']",
                "│   └─1 [EOF]",
                "└─1 [0x41 'A']",
            ]
        );
        assert!(rendered.contains("Leaves: 4"));
    }

    #[test]
    fn test_render_code_table() {
        let tree = scenario_tree();
        let table = render_code_table(&tree.code_table());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("0x41 'A'"));
        assert!(lines[1].ends_with("1"));
        assert!(lines[4].starts_with("EOF"));
        assert!(lines[4].ends_with("011"));
    }

    #[test]
    fn test_report_serializes() {
        let tree = scenario_tree();
        let report = CodeReport::new(&tree, &tree.code_table());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["leaves"], 4);
        assert_eq!(json["nodes"], 7);
        assert_eq!(json["codes"][0]["symbol"], 65);
        assert_eq!(json["codes"][0]["code"], "1");
        assert_eq!(json["codes"][3]["symbol"], 256);
        assert_eq!(json["codes"][3]["eof"], true);
        assert_eq!(json["codes"][3]["bits"], 3);
    }
}
