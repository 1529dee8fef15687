//! The concrete syntax tree produced by the driver, and its pretty-printer.

use std::fmt;

/// One CST node: a label (a terminal's text, or a rule's head for an
/// interior node) and its children in left-to-right order.
///
/// The driver owns the whole tree it builds except the final root, which is
/// handed to the caller.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    pub fn leaf(label: impl Into<String>) -> Node {
        Node {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn interior(label: impl Into<String>, children: Vec<Node>) -> Node {
        Node {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order print, one node per line, two spaces of indent per depth.
    pub fn write_pretty(&self, w: &mut impl fmt::Write) -> fmt::Result {
        self.write_at_depth(w, 0)
    }

    fn write_at_depth(&self, w: &mut impl fmt::Write, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            w.write_str("  ")?;
        }
        writeln!(w, "{}", self.label)?;
        for child in &self.children {
            child.write_at_depth(w, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_pretty(f)
    }
}
