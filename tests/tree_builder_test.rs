//! Tests for the turn tree builder and its layout

use std::collections::HashSet;

use generational_arena::Index;
use rstest::rstest;

use santree::domain::{parse_game, Side, TurnSequence, TurnTree, TurnTreeBuilder};
use santree::util::testing;

const OPENING: &str = "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 6. Re1 b5 7. Bb3";

fn build(text: &str) -> (TurnSequence, TurnTree) {
    testing::init_test_setup();
    let turns = parse_game(text).unwrap();
    let tree = TurnTreeBuilder::new().build(&turns);
    (turns, tree)
}

/// Depth a node gets when nodes are numbered 1.. in level order (root = 0).
fn level_of(level_order_number: usize) -> usize {
    (usize::BITS - 1 - level_order_number.leading_zeros()) as usize
}

#[rstest]
#[case("", 0)]
#[case("1. e4", 1)]
#[case("1. e4 e5 2. d4", 2)]
#[case(OPENING, 7)]
fn given_n_turns_when_building_then_tree_has_2n_plus_root(#[case] text: &str, #[case] n: usize) {
    let (turns, tree) = build(text);

    assert_eq!(turns.len(), n);
    assert_eq!(tree.node_count(), 2 * n + 1);
}

#[test]
fn given_turns_when_building_then_depths_follow_level_order() {
    let (_, tree) = build(OPENING);

    // Level-order traversal visits nodes in the order they were attached
    for (i, (_, node)) in tree.iter().enumerate() {
        assert_eq!(node.depth, level_of(i + 1), "node {} ({})", i, node.label);
    }
}

#[test]
fn given_turns_when_building_then_nth_turn_hangs_under_nth_slot() {
    let (turns, tree) = build(OPENING);

    let slots: Vec<Index> = tree.iter().map(|(idx, _)| idx).collect();
    for (n, turn) in turns.iter().enumerate() {
        let parent = tree.get_node(slots[n]).unwrap();
        let left = tree.get_node(parent.left.unwrap()).unwrap();
        let right = tree.get_node(parent.right.unwrap()).unwrap();

        assert_eq!(left.label, turn.white.as_str());
        assert_eq!(
            right.label,
            turn.black.as_ref().map(|b| b.as_str()).unwrap_or("")
        );
        assert_eq!(left.side, Side::Left);
        assert_eq!(right.side, Side::Right);
    }
}

#[test]
fn given_tree_when_computing_positions_then_columns_are_unique_and_inorder() {
    let (_, tree) = build(OPENING);

    let layout = tree.compute_positions();

    assert_eq!(layout.len(), tree.node_count());
    let xs: Vec<usize> = layout.iter().map(|(_, pos)| pos.x).collect();
    assert_eq!(xs, (0..tree.node_count()).collect::<Vec<_>>());
    let distinct: HashSet<usize> = xs.iter().copied().collect();
    assert_eq!(distinct.len(), xs.len());
}

#[test]
fn given_tree_when_computing_positions_then_subtrees_do_not_overlap() {
    let (_, tree) = build(OPENING);
    let layout = tree.compute_positions();

    for (idx, node) in tree.iter() {
        let x = layout.get(idx).unwrap().x;
        let pos = layout.get(idx).unwrap();
        assert_eq!(pos.depth, node.depth);

        // Every node of the left subtree sits left of the node, every node
        // of the right subtree sits right of it.
        for (child, is_left) in [(node.left, true), (node.right, false)] {
            let Some(child) = child else { continue };
            let mut stack = vec![child];
            while let Some(current) = stack.pop() {
                let cx = layout.get(current).unwrap().x;
                if is_left {
                    assert!(cx < x);
                } else {
                    assert!(cx > x);
                }
                let n = tree.get_node(current).unwrap();
                stack.extend(n.left);
                stack.extend(n.right);
            }
        }
    }
}

#[test]
fn given_tree_when_following_parent_links_then_every_path_reaches_root() {
    let (_, tree) = build(OPENING);

    for (idx, node) in tree.iter() {
        let mut steps = 0;
        let mut current = idx;
        while let Some(parent) = tree.parent_of(current) {
            let p = tree.get_node(parent).unwrap();
            assert!(p.left == Some(current) || p.right == Some(current));
            current = parent;
            steps += 1;
        }
        assert_eq!(current, tree.root());
        assert_eq!(steps, node.depth);
    }
}

#[test]
fn given_empty_game_when_computing_positions_then_root_is_alone_at_origin() {
    let (_, tree) = build("");

    let layout = tree.compute_positions();

    assert_eq!(layout.len(), 1);
    let pos = layout.get(tree.root()).unwrap();
    assert_eq!((pos.x, pos.depth), (0, 0));
}
