//! Plain-text views of parse results (no colors, so they can be asserted on)

use itertools::Itertools;

use crate::application::services::PositionedTree;
use crate::domain::{Side, TurnSequence};

/// Turn table: the root label, then one `number white black` row per turn.
pub fn turn_table(turns: &TurnSequence, root_label: &str) -> String {
    let width = turns
        .iter()
        .map(|t| t.white.as_str().len())
        .chain(std::iter::once("White".len()))
        .max()
        .unwrap_or(0);

    let header = format!("{:>6}  {:<width$}  Black", "Turn", "White");
    let rows = turns.iter().map(|t| {
        let black = t.black.as_ref().map(|b| b.as_str()).unwrap_or("");
        format!("{:>6}  {:<width$}  {}", t.number, t.white.as_str(), black)
            .trim_end()
            .to_string()
    });

    std::iter::once(header)
        .chain(std::iter::once(root_label.to_string()))
        .chain(rows)
        .join("\n")
}

/// One node of the layout view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    pub x: usize,
    pub depth: usize,
    pub side: Side,
    pub label: String,
    /// Label of the parent node, found through the parent back-reference
    pub parent: Option<String>,
}

/// Nodes in column order with their positions.
pub fn layout_rows(positioned: &PositionedTree) -> Vec<LayoutRow> {
    let tree = &positioned.tree;
    positioned
        .layout
        .iter()
        .filter_map(|(idx, pos)| {
            let node = tree.get_node(idx)?;
            let parent = node
                .parent
                .and_then(|p| tree.get_node(p))
                .map(|p| p.display_label().to_string());
            Some(LayoutRow {
                x: pos.x,
                depth: pos.depth,
                side: node.side,
                label: node.display_label().to_string(),
                parent,
            })
        })
        .collect()
}
