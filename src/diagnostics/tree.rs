// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The explored decision tree, recorded as an observer.

use super::{NodeId, NodeInfo, SearchObserver};
use crate::engine::SolveFailure;
use std::fmt::Write;

/// Children shown around the interesting one before the rest are summarised.
const SIBLING_WINDOW: usize = 2;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub info: NodeInfo,
    pub children: Vec<NodeId>,
    /// Why this placement was rolled back, if it was.
    pub failure: Option<String>,
    pub on_solution_path: bool,
}

impl TreeNode {
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Arena of every node the solver created, indexed by [`NodeId`].
#[derive(Debug, Default, Clone)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    solution: Option<NodeId>,
}

impl DecisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    pub fn failed_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.failed()).count()
    }

    /// Nodes from the root down to the solution leaf; empty if unsolved.
    pub fn solution_path(&self) -> Vec<&TreeNode> {
        let mut path = Vec::new();
        let mut current = self.solution;
        while let Some(id) = current {
            let node = &self.nodes[id];
            path.push(node);
            current = node.info.parent;
        }
        path.reverse();
        path
    }

    /// The solution path, one placement per line.
    pub fn render_solution_path(&self) -> String {
        let mut out = String::new();
        for node in self.solution_path() {
            let _ = writeln!(out, "{}", Self::label(node));
        }
        out
    }

    /// The whole tree. Failed subtrees whose children all failed are
    /// collapsed; long sibling lists are windowed around the solution path.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            let _ = writeln!(out, "ROOT {}", Self::label(root));
            self.render_children(&mut out, root, "");
        }
        out
    }

    fn label(node: &TreeNode) -> String {
        let mut label = format!("{} at {}", node.info.component, node.info.position);
        if let Some(constraint) = &node.info.constraint {
            let _ = write!(label, " via {constraint}");
        }
        label
    }

    fn all_children_failed(&self, node: &TreeNode) -> bool {
        !node.children.is_empty() && node.children.iter().all(|&c| self.nodes[c].failed())
    }

    fn render_children(&self, out: &mut String, node: &TreeNode, prefix: &str) {
        let children = &node.children;
        if children.is_empty() {
            return;
        }
        let (start, end) = match children
            .iter()
            .position(|&c| self.nodes[c].on_solution_path)
        {
            Some(path) => (
                path.saturating_sub(SIBLING_WINDOW),
                (path + SIBLING_WINDOW).min(children.len() - 1),
            ),
            None => (0, (2 * SIBLING_WINDOW).min(children.len() - 1)),
        };
        if start > 0 {
            let failed = children[..start].iter().filter(|&&c| self.nodes[c].failed()).count();
            let _ = writeln!(out, "{prefix}├─ [{start} hidden: {failed} failed]");
        }
        for (i, &child) in children.iter().enumerate().take(end + 1).skip(start) {
            let last = i == children.len() - 1;
            let child = &self.nodes[child];
            let branch = if last { "└─" } else { "├─" };
            let collapsed = child.failed() && self.all_children_failed(child);
            let mark = if child.on_solution_path {
                "* "
            } else if child.failed() {
                "x "
            } else {
                ""
            };
            let _ = write!(out, "{prefix}{branch} {mark}{}", Self::label(child));
            if let Some(reason) = &child.failure {
                let _ = write!(out, " [{reason}]");
            }
            if collapsed {
                let _ = write!(out, " ({} children failed)", child.children.len());
            }
            out.push('\n');
            if !collapsed {
                let next = format!("{prefix}{}", if last { "   " } else { "│  " });
                self.render_children(out, child, &next);
            }
        }
        let hidden = children.len() - 1 - end;
        if hidden > 0 {
            let failed = children[end + 1..].iter().filter(|&&c| self.nodes[c].failed()).count();
            let _ = writeln!(out, "{prefix}└─ [{hidden} hidden: {failed} failed]");
        }
    }
}

impl SearchObserver for DecisionTree {
    fn node_created(&mut self, node: &NodeInfo) {
        debug_assert_eq!(node.id, self.nodes.len(), "node ids must be sequential");
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.push(node.id);
        }
        self.nodes.push(TreeNode {
            info: node.clone(),
            children: Vec::new(),
            failure: None,
            on_solution_path: false,
        });
    }

    fn backtrack(&mut self, node: NodeId, failure: &SolveFailure) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.failure = Some(failure.to_string());
        }
    }

    fn solved(&mut self, leaf: NodeId) {
        self.solution = Some(leaf);
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.on_solution_path = true;
            current = node.info.parent;
        }
    }
}
