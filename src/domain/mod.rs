//! Domain layer: grammar, parser and turn tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod tokenizer;

pub use arena::{Layout, Position, Side, TreeNode, TurnTree};
pub use builder::{TurnTreeBuilder, DEFAULT_ROOT_LABEL};
pub use error::{DomainError, DomainResult};
pub use grammar::{GrammarOptions, MoveCategory, MoveGrammar, MoveNotation, Rejection};
pub use parser::{parse_game, GameParser, ParseOptions, Turn, TurnSequence};
pub use tokenizer::{tokenize, TokenCursor};
