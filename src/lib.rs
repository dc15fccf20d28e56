//! Validate chess games written in Standard Algebraic Notation (SAN) and lay
//! them out as turn tables or level-order turn trees.
//!
//! ```ignore
//! let turns = santree::parse_game("1. e4 e5 2. Nf3 Nc6")?;
//! let tree = santree::TurnTreeBuilder::new().build(&turns);
//! let layout = tree.compute_positions();
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use domain::{
    parse_game, DomainError, GameParser, Layout, MoveNotation, ParseOptions, Position, Turn,
    TurnSequence, TurnTree, TurnTreeBuilder,
};
