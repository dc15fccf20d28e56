use std::collections::{HashMap, VecDeque};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Which slot of its parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Root,
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Root => "root",
            Side::Left => "left",
            Side::Right => "right",
        };
        f.write_str(name)
    }
}

/// Binary tree node in the arena.
#[derive(Debug)]
pub struct TreeNode {
    /// Move notation, the root sentinel, or empty for a missing black move
    pub label: String,
    /// Slot this node occupies under its parent
    pub side: Side,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
    /// Distance from the root
    pub depth: usize,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Label for display; empty labels render as `(none)`.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            "(none)"
        } else {
            &self.label
        }
    }
}

/// Arena-based binary tree with a synthetic root.
///
/// Children are owned through the arena; `parent` is a plain index and
/// never keeps a node alive.
#[derive(Debug)]
pub struct TurnTree {
    arena: Arena<TreeNode>,
    root: Index,
}

impl TurnTree {
    pub fn new(root_label: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            label: root_label.into(),
            side: Side::Root,
            parent: None,
            left: None,
            right: None,
            depth: 0,
        });
        Self { arena, root }
    }

    /// Create two children under `parent` and return their indices.
    ///
    /// Existing children of `parent` are replaced.
    #[instrument(level = "trace", skip(self))]
    pub fn attach_pair(&mut self, parent: Index, left: &str, right: &str) -> (Index, Index) {
        let depth = self.arena.get(parent).map_or(0, |p| p.depth + 1);
        let left_idx = self.insert_child(parent, left, Side::Left, depth);
        let right_idx = self.insert_child(parent, right, Side::Right, depth);

        if let Some(node) = self.arena.get_mut(parent) {
            node.left = Some(left_idx);
            node.right = Some(right_idx);
        }
        (left_idx, right_idx)
    }

    fn insert_child(&mut self, parent: Index, label: &str, side: Side, depth: usize) -> Index {
        self.arena.insert(TreeNode {
            label: label.to_string(),
            side,
            parent: Some(parent),
            left: None,
            right: None,
            depth,
        })
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn parent_of(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of levels; a lone root has height 1.
    pub fn height(&self) -> usize {
        self.arena
            .iter()
            .map(|(_, node)| node.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Level-order (breadth-first) traversal.
    pub fn iter(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }

    /// In-order traversal: left subtree, node, right subtree.
    pub fn iter_inorder(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    /// Labels of the nodes without children, left to right.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.iter_inorder()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.label.as_str())
            .collect()
    }

    /// Assign each node its in-order horizontal index and its depth.
    #[instrument(level = "debug", skip(self))]
    pub fn compute_positions(&self) -> Layout {
        let mut layout = Layout::default();
        for (x, (idx, node)) in self.iter_inorder().enumerate() {
            layout.positions.insert(
                idx,
                Position {
                    x,
                    depth: node.depth,
                },
            );
            layout.order.push(idx);
        }
        layout
    }
}

/// Grid coordinates of a node: in-order column and depth row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub depth: usize,
}

/// Node positions of one tree, computed once and never updated.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    positions: HashMap<Index, Position>,
    order: Vec<Index>,
}

impl Layout {
    pub fn get(&self, idx: Index) -> Option<Position> {
        self.positions.get(&idx).copied()
    }

    /// Nodes with their positions, ordered by `x`.
    pub fn iter(&self) -> impl Iterator<Item = (Index, Position)> + '_ {
        self.order
            .iter()
            .filter_map(move |&idx| self.get(idx).map(|pos| (idx, pos)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of columns used.
    pub fn width(&self) -> usize {
        self.order.len()
    }
}

pub struct LevelOrderIterator<'a> {
    tree: &'a TurnTree,
    queue: VecDeque<Index>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(tree: &'a TurnTree) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(tree.root());
        Self { tree, queue }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.tree.get_node(current_idx) {
                self.queue.extend(node.left);
                self.queue.extend(node.right);
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct InOrderIterator<'a> {
    tree: &'a TurnTree,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a TurnTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: Some(tree.root()),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        // Descend leftwards, remembering the path
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.get_node(idx).and_then(|node| node.left);
        }

        let idx = self.stack.pop()?;
        let node = self.tree.get_node(idx)?;
        self.current = node.right;
        Some((idx, node))
    }
}
