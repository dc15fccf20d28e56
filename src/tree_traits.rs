use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TurnTree;

/// Conversion into a `termtree` for plain-text tree display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TurnTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &TurnTree, node_idx: Index) -> Tree<String> {
            match tree.get_node(node_idx) {
                Some(node) => {
                    let leaves: Vec<_> = [node.left, node.right]
                        .into_iter()
                        .flatten()
                        .map(|child| build_tree(tree, child))
                        .collect();
                    Tree::new(node.display_label().to_string()).with_leaves(leaves)
                }
                None => Tree::new(String::new()),
            }
        }

        build_tree(self, self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_game, TurnTreeBuilder};

    #[test]
    fn test_to_tree_string_renders_levels() {
        let turns = parse_game("1. e4 e5 2. Nf3").unwrap();
        let tree = TurnTreeBuilder::new().build(&turns);

        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Game");
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().any(|l| l.ends_with("Nf3")));
        assert!(lines.iter().any(|l| l.ends_with("(none)")));
        assert!(lines.last().unwrap().ends_with("e5"));
    }
}
