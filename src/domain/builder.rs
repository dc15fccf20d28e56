//! Turn-tree builder: spreads a turn sequence over a binary tree level by level.

use std::collections::VecDeque;
use std::mem;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TurnTree;
use crate::domain::parser::TurnSequence;

/// Label of the synthetic root node.
pub const DEFAULT_ROOT_LABEL: &str = "Game";

/// Constructs a [`TurnTree`] from parsed turns.
///
/// Turn N's white and black moves become the left and right children of
/// the N-th parent slot in level order, starting with the root.
#[derive(Debug, Clone)]
pub struct TurnTreeBuilder {
    root_label: String,
}

impl Default for TurnTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnTreeBuilder {
    pub fn new() -> Self {
        Self::with_root_label(DEFAULT_ROOT_LABEL)
    }

    pub fn with_root_label(label: impl Into<String>) -> Self {
        Self {
            root_label: label.into(),
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    #[instrument(level = "debug", skip(self, turns), fields(turns = turns.len()))]
    pub fn build(&self, turns: &TurnSequence) -> TurnTree {
        let mut tree = TurnTree::new(self.root_label.as_str());
        let mut slots: VecDeque<Index> = VecDeque::from([tree.root()]);
        let mut next_level: VecDeque<Index> = VecDeque::new();

        for turn in turns {
            if slots.is_empty() {
                mem::swap(&mut slots, &mut next_level);
            }
            let Some(parent) = slots.pop_front() else {
                break;
            };

            let black = turn.black.as_ref().map_or("", |b| b.as_str());
            let (left, right) = tree.attach_pair(parent, turn.white.as_str(), black);
            next_level.push_back(left);
            next_level.push_back(right);
        }

        debug!(
            "built tree: {} nodes, height {}",
            tree.node_count(),
            tree.height()
        );
        tree
    }
}
